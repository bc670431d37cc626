//! Wire types shared between the dashboard frontend and the command line client.
//! These structs mirror the prediction service's request/response payloads so
//! every consumer deserializes the same shapes.

mod converters;
mod environment;
mod forecast;

pub use converters::{columns, extra_fields, field_order, record_from_object};
pub use environment::{Environment, UnknownEnvironment};
pub use forecast::{Column, HourLabel, HourlyRecord, RecordField};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Path of the manual-input prediction endpoint, relative to the service base URL.
pub const PREDICT_MANUAL_PATH: &str = "/api/predict/manual";

/// Raw JSON object of a single hourly prediction, in the order the service sent its keys.
pub type RawRecord = Map<String, Value>;

/// Request body for the manual prediction endpoint.
///
/// Values are the raw field texts exactly as entered; the service parses and
/// validates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ManualPredictionRequest {
    pub ambient_temp: String,
    pub module_temp: String,
    pub irradiation: String,
}

/// Response body of the manual prediction endpoint.
///
/// Predictions are kept as raw objects so the key order of the first record
/// survives until export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManualPredictionResponse {
    pub predictions: Vec<RawRecord>,
    pub system_efficiency: f64,
}

/// Failure body returned by the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceErrorBody {
    pub error: String,
}

/// Joins a base URL and an endpoint path with exactly one slash between them.
pub fn predict_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
