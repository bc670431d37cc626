use session::{Field, InputReadings};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::widgets::loading::InlineSpinner;

#[derive(Properties, PartialEq)]
pub struct InputPanelProps {
    pub readings: InputReadings,
    pub in_flight: bool,
    pub on_input: Callback<(Field, String)>,
    pub on_submit: Callback<()>,
}

#[function_component(InputPanel)]
pub fn input_panel(props: &InputPanelProps) -> Html {
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <form class="card-body" onsubmit={on_submit}>
                <h2 class="card-title">{"Sensor Readings"}</h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    {for Field::ALL.iter().map(|&field| {
                        let on_input = props.on_input.clone();
                        let oninput = Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            on_input.emit((field, input.value()));
                        });

                        html! {
                            <label class="form-control w-full" key={field.wire_name()}>
                                <div class="label">
                                    <span class="label-text">{field.label()}</span>
                                </div>
                                <input
                                    type="number"
                                    step="any"
                                    name={field.wire_name()}
                                    class="input input-bordered w-full"
                                    value={props.readings.get(field).to_string()}
                                    {oninput}
                                />
                            </label>
                        }
                    })}
                </div>
                <div class="card-actions justify-end mt-4">
                    <button type="submit" class="btn btn-primary" disabled={props.in_flight}>
                        {if props.in_flight {
                            html! { <InlineSpinner text={Some("Processing...".to_string())} /> }
                        } else {
                            html! { <><i class="fas fa-bolt"></i>{" Predict"}</> }
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
