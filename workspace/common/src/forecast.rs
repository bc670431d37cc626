use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Identifies a forecast point on the x-axis.
///
/// The service sends an hour of day (`8`, `10`, ...), but fractional numbers
/// and textual labels are accepted as well. Non-integer numbers keep the
/// service's own rendering (`8.0` stays `8.0`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HourLabel {
    Ordinal(i64),
    Number(Number),
    Label(String),
}

impl fmt::Display for HourLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourLabel::Ordinal(hour) => write!(f, "{}", hour),
            HourLabel::Number(number) => write!(f, "{}", number),
            HourLabel::Label(label) => f.write_str(label),
        }
    }
}

/// One entry of the hourly forecast sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyRecord {
    pub hour: HourLabel,
    pub predicted_power: f64,
    /// Historical ground truth, absent when the service has none for this hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_power: Option<f64>,
    pub module_temp: f64,
    pub efficiency: f64,
}

/// The canonical fields of an [`HourlyRecord`], named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Hour,
    PredictedPower,
    ActualPower,
    ModuleTemp,
    Efficiency,
}

impl RecordField {
    pub const ALL: [RecordField; 5] = [
        RecordField::Hour,
        RecordField::PredictedPower,
        RecordField::ActualPower,
        RecordField::ModuleTemp,
        RecordField::Efficiency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecordField::Hour => "hour",
            RecordField::PredictedPower => "predicted_power",
            RecordField::ActualPower => "actual_power",
            RecordField::ModuleTemp => "module_temp",
            RecordField::Efficiency => "efficiency",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One column of the exported table: a canonical field, or a key the service
/// sent that has no typed counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Field(RecordField),
    Extra(String),
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Field(field) => field.name(),
            Column::Extra(key) => key,
        }
    }
}
