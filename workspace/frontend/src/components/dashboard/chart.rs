use serde::Serialize;
use serde_json::{json, Value};
use session::{Axis, ChartSpec, SeriesKind};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    pub fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

#[derive(Properties, PartialEq)]
pub struct PredictionChartProps {
    pub spec: ChartSpec,
}

#[function_component(PredictionChart)]
pub fn prediction_chart(props: &PredictionChartProps) -> Html {
    let chart_ref = use_node_ref();

    use_effect_with((chart_ref.clone(), props.spec.clone()), move |(chart_ref, spec)| {
        if let Some(element) = chart_ref.cast::<Element>() {
            let div_id = element.id();
            if !div_id.is_empty() {
                let plotted = to_js(&plot_traces(spec)).and_then(|data| {
                    let layout = to_js(&plot_layout(spec))?;
                    let config = to_js(&json!({"responsive": true, "displayModeBar": false}))?;
                    Ok((data, layout, config))
                });

                match plotted {
                    Ok((data, layout, config)) => {
                        log::debug!("Plotting {} with {} series", div_id, spec.series.len());
                        newPlot(&div_id, data, layout, config);
                    }
                    Err(e) => log::error!("Failed to prepare chart {}: {}", div_id, e),
                }
            }
        }
        || ()
    });

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{props.spec.title}</h2>
                <div ref={chart_ref} id={props.spec.id} class="chart-container" style="height: 320px;"></div>
            </div>
        </div>
    }
}

// Plain JS objects, not Maps, so Plotly can read them
fn to_js(value: &Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn plot_traces(spec: &ChartSpec) -> Value {
    let traces: Vec<Value> = spec
        .series
        .iter()
        .map(|series| {
            let mut trace = match series.kind {
                SeriesKind::Bar => json!({
                    "type": "bar",
                    "marker": {"color": series.color},
                }),
                SeriesKind::Line => json!({
                    "type": "scatter",
                    "mode": "lines+markers",
                    "line": {"color": series.color, "width": 2.5},
                }),
            };
            trace["name"] = json!(series.name);
            trace["x"] = json!(series.x);
            // Missing values become nulls, which Plotly draws as gaps
            trace["y"] = json!(series.y);
            if series.axis == Axis::Right {
                trace["yaxis"] = json!("y2");
            }
            trace
        })
        .collect();

    Value::Array(traces)
}

fn plot_layout(spec: &ChartSpec) -> Value {
    let mut layout = json!({
        "margin": {"t": 10, "r": 50, "l": 50, "b": 40},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "xaxis": {"showgrid": false, "title": {"text": "Hour"}},
        "yaxis": {"showgrid": true, "gridcolor": "#eee"},
        "showlegend": spec.series.len() > 1,
        "legend": {"orientation": "h", "y": -0.2},
    });

    if let Some(title) = spec.left_axis_title {
        layout["yaxis"]["title"] = json!({"text": title});
    }
    if spec.has_right_axis() {
        layout["yaxis2"] = json!({
            "overlaying": "y",
            "side": "right",
            "showgrid": false,
            "title": {"text": spec.right_axis_title.unwrap_or_default()},
        });
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{HourLabel, HourlyRecord};
    use session::{dashboard_charts, PredictionResult};

    fn record(hour: i64, predicted: f64, actual: Option<f64>) -> HourlyRecord {
        HourlyRecord {
            hour: HourLabel::Ordinal(hour),
            predicted_power: predicted,
            actual_power: actual,
            module_temp: 30.0,
            efficiency: 75.0,
        }
    }

    #[test]
    fn test_comparison_chart_keeps_gaps_as_nulls() {
        let result = PredictionResult::new(
            vec![record(8, 5.6, Some(5.04)), record(9, 6.0, None)],
            80.0,
        );
        let charts = dashboard_charts(&result);
        let traces = plot_traces(&charts[1]);

        assert_eq!(traces[1]["y"], json!([5.04, null]));
        assert_eq!(traces[0]["type"], "scatter");
        assert_eq!(traces[0]["x"], json!(["8", "9"]));
    }

    #[test]
    fn test_efficiency_series_uses_secondary_axis() {
        let result = PredictionResult::new(vec![record(8, 5.6, None)], 80.0);
        let charts = dashboard_charts(&result);
        let spec = &charts[2];

        let traces = plot_traces(spec);
        let layout = plot_layout(spec);

        assert_eq!(traces[1]["yaxis"], "y2");
        assert!(traces[0].get("yaxis").is_none());
        assert_eq!(layout["yaxis2"]["side"], "right");
        assert_eq!(layout["yaxis2"]["title"]["text"], "Efficiency (%)");
    }

    #[test]
    fn test_single_axis_chart_has_no_secondary_axis() {
        let result = PredictionResult::new(vec![record(8, 5.6, None)], 80.0);
        let layout = plot_layout(&dashboard_charts(&result)[0]);

        assert!(layout.get("yaxis2").is_none());
        assert_eq!(layout["showlegend"], false);
    }
}
