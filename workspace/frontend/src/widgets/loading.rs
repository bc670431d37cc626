use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InlineSpinnerProps {
    #[prop_or_default]
    pub text: Option<String>,
}

/// Small spinner sized to sit inside a button.
#[function_component(InlineSpinner)]
pub fn inline_spinner(props: &InlineSpinnerProps) -> Html {
    html! {
        <>
            <span class="loading loading-spinner loading-sm"></span>
            {if let Some(text) = &props.text {
                html! { <span>{text}</span> }
            } else {
                html! {}
            }}
        </>
    }
}
