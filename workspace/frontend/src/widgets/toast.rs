use yew::prelude::*;

use crate::settings;

#[derive(Clone, PartialEq)]
pub enum ToastType {
    Success,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Success => "alert-success",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "fas fa-check-circle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub add_toast: Callback<(String, ToastType)>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.add_toast.emit((message, ToastType::Success));
    }

    pub fn show_error(&self, message: String) {
        self.add_toast.emit((message, ToastType::Error));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    // Dismiss timers must see the current list, not a render snapshot
    let toasts = use_mut_ref(Vec::<Toast>::new);
    let next_id = use_mut_ref(|| 0usize);
    let trigger = use_force_update();

    let remove_toast = {
        let toasts = toasts.clone();
        let trigger = trigger.clone();

        Callback::from(move |id: usize| {
            toasts.borrow_mut().retain(|t| t.id != id);
            trigger.force_update();
        })
    };

    let add_toast = {
        let toasts = toasts.clone();
        let remove_toast = remove_toast.clone();

        Callback::from(move |(message, toast_type): (String, ToastType)| {
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };

            toasts.borrow_mut().push(Toast {
                id,
                message,
                toast_type,
            });
            trigger.force_update();

            let remove_toast = remove_toast.clone();
            let duration = settings::get_settings().toast_duration_ms;
            gloo_timers::callback::Timeout::new(duration, move || remove_toast.emit(id)).forget();
        })
    };

    let context = ToastContext { add_toast };
    let visible = toasts.borrow().clone();

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for visible.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let remove_toast = remove_toast.clone();
                        Callback::from(move |_| remove_toast.emit(id))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}
