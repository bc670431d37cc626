use session::{
    dashboard_charts, Completion, Field, FormState, PredictionSession, PredictionTransport,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::chart::PredictionChart;
use super::export::ExportButton;
use super::input_panel::InputPanel;
use super::stats::PredictionStats;
use crate::api_client::BrowserTransport;
use crate::settings;
use crate::widgets::error::PredictionErrorPanel;
use crate::widgets::toast::ToastContext;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let form = use_mut_ref(FormState::new);
    let session = use_mut_ref(PredictionSession::new);
    let trigger = use_force_update();
    let toast_ctx = use_context::<ToastContext>();

    let on_input = {
        let form = form.clone();
        let trigger = trigger.clone();
        Callback::from(move |(field, value): (Field, String)| {
            form.borrow_mut().set_field(field, value);
            trigger.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let session = session.clone();
        let trigger = trigger.clone();

        Callback::from(move |_: ()| {
            let pending = form.borrow().submit(&mut session.borrow_mut());
            let Some(pending) = pending else {
                log::debug!("Prediction already in flight, ignoring submit");
                return;
            };
            trigger.force_update();

            let session = session.clone();
            let trigger = trigger.clone();
            let toast_ctx = toast_ctx.clone();
            spawn_local(async move {
                let transport = BrowserTransport::from_settings(&settings::get_settings());
                let outcome = transport.predict(&pending.request).await;

                let completion = session.borrow_mut().complete(pending.id, outcome);
                let failure = match completion {
                    Completion::Failed => session.borrow().last_error().map(ToString::to_string),
                    Completion::Succeeded | Completion::Discarded => None,
                };
                if let (Some(toast_ctx), Some(reason)) = (&toast_ctx, failure) {
                    toast_ctx.show_error(format!("Prediction failed: {}", reason));
                }
                trigger.force_update();
            });
        })
    };

    let readings = form.borrow().readings().clone();
    let current = session.borrow();
    let in_flight = current.is_in_flight();

    let body = match (current.result(), current.last_error()) {
        (Some(result), _) => {
            let charts = dashboard_charts(&result);
            html! {
                <>
                    <PredictionStats irradiation={readings.get(Field::Irradiation).to_string()} result={result.clone()} />
                    {if charts.is_empty() {
                        html! {
                            <div class="alert mt-6">
                                <i class="fas fa-info-circle"></i>
                                <span>{"The service returned no hourly predictions."}</span>
                            </div>
                        }
                    } else {
                        html! {
                            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                                {for charts.into_iter().map(|spec| {
                                    let id = spec.id;
                                    html! { <PredictionChart key={id} {spec} /> }
                                })}
                            </div>
                        }
                    }}
                    <div class="flex justify-end mt-4">
                        <ExportButton {result} />
                    </div>
                </>
            }
        }
        (None, Some(e)) => html! {
            <PredictionErrorPanel
                error={e.clone()}
                on_retry={on_submit.clone()}
                {in_flight}
            />
        },
        (None, None) => html! {},
    };

    html! {
        <div class="min-h-screen bg-base-200">
            <div class="container mx-auto px-4 py-8 max-w-7xl space-y-6">
                <div>
                    <h1 class="text-3xl font-bold">{"Solar AI Forecast"}</h1>
                    <p class="text-sm text-gray-500">{"Hourly power predictions from live sensor readings"}</p>
                </div>
                <InputPanel {readings} {in_flight} {on_input} {on_submit} />
                {body}
            </div>
        </div>
    }
}
