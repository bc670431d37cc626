use std::rc::Rc;

use session::PredictionResult;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PredictionStatsProps {
    /// Irradiation as currently entered in the form.
    pub irradiation: AttrValue,
    pub result: Rc<PredictionResult>,
}

#[function_component(PredictionStats)]
pub fn prediction_stats(props: &PredictionStatsProps) -> Html {
    let irradiation = if props.irradiation.is_empty() {
        "—".to_string()
    } else {
        format!("{} W/m²", props.irradiation)
    };

    let headline = props
        .result
        .headline_power_display()
        .map(|power| format!("{} kW", power))
        .unwrap_or_else(|| "—".to_string());

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Irradiation"}</div>
                    <div class="stat-value text-warning">{irradiation}</div>
                    <div class="stat-desc">{"Input reading"}</div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Predicted Power"}</div>
                    <div class="stat-value text-success">{headline}</div>
                    <div class="stat-desc">{"First forecast hour"}</div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"System Efficiency"}</div>
                    <div class="stat-value text-primary">
                        {format!("{} %", props.result.system_efficiency_display())}
                    </div>
                </div>
            </div>
        </div>
    }
}
