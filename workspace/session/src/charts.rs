//! Chart-ready series derived from a prediction result.
//!
//! The x-axis of every chart is the record order of the response.

use common::HourlyRecord;

use crate::result::PredictionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    Line,
}

/// Which y-axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: &'static str,
    pub kind: SeriesKind,
    pub axis: Axis,
    pub color: &'static str,
    pub x: Vec<String>,
    /// `None` marks a gap, never a zero.
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Stable element id for the rendering surface.
    pub id: &'static str,
    pub title: &'static str,
    pub left_axis_title: Option<&'static str>,
    pub right_axis_title: Option<&'static str>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn has_right_axis(&self) -> bool {
        self.series.iter().any(|s| s.axis == Axis::Right)
    }
}

fn hours(records: &[HourlyRecord]) -> Vec<String> {
    records.iter().map(|r| r.hour.to_string()).collect()
}

fn series(
    records: &[HourlyRecord],
    name: &'static str,
    kind: SeriesKind,
    axis: Axis,
    color: &'static str,
    value: impl Fn(&HourlyRecord) -> Option<f64>,
) -> ChartSeries {
    ChartSeries {
        name,
        kind,
        axis,
        color,
        x: hours(records),
        y: records.iter().map(value).collect(),
    }
}

/// Predicted power per hour, as bars.
pub fn hourly_power_chart(result: &PredictionResult) -> ChartSpec {
    ChartSpec {
        id: "chart-hourly-power",
        title: "Hourly Predicted Power Output",
        left_axis_title: None,
        right_axis_title: None,
        series: vec![series(
            result.records(),
            "Predicted Power",
            SeriesKind::Bar,
            Axis::Left,
            "#10b981",
            |r| Some(r.predicted_power),
        )],
    }
}

/// Predicted against historical power; hours without history are gaps.
pub fn power_comparison_chart(result: &PredictionResult) -> ChartSpec {
    let records = result.records();
    ChartSpec {
        id: "chart-power-comparison",
        title: "Historical vs Predicted Power",
        left_axis_title: None,
        right_axis_title: None,
        series: vec![
            series(records, "Predicted Power", SeriesKind::Line, Axis::Left, "#10b981", |r| {
                Some(r.predicted_power)
            }),
            series(records, "Historical Power", SeriesKind::Line, Axis::Left, "#ef4444", |r| {
                r.actual_power
            }),
        ],
    }
}

/// Module temperature (left axis) against efficiency (right axis).
pub fn temperature_efficiency_chart(result: &PredictionResult) -> ChartSpec {
    let records = result.records();
    ChartSpec {
        id: "chart-temperature-efficiency",
        title: "Temperature vs Efficiency Trend",
        left_axis_title: Some("Temp (°C)"),
        right_axis_title: Some("Efficiency (%)"),
        series: vec![
            series(records, "Temperature", SeriesKind::Line, Axis::Left, "#3b82f6", |r| {
                Some(r.module_temp)
            }),
            series(records, "Efficiency", SeriesKind::Line, Axis::Right, "#f59e0b", |r| {
                Some(r.efficiency)
            }),
        ],
    }
}

/// All dashboard charts, or none when the forecast is empty.
pub fn dashboard_charts(result: &PredictionResult) -> Vec<ChartSpec> {
    if result.is_empty() {
        return Vec::new();
    }
    vec![
        hourly_power_chart(result),
        power_comparison_chart(result),
        temperature_efficiency_chart(result),
    ]
}
