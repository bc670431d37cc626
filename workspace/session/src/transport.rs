//! The seam between a [`crate::PredictionSession`] and the remote predictor.

use async_trait::async_trait;
use common::{ManualPredictionRequest, ManualPredictionResponse, ServiceErrorBody};
use tracing::{debug, warn};

use crate::error::{PredictionError, Result};

/// Performs one request against the prediction service.
///
/// Futures are not required to be `Send`, so browser transports qualify.
/// Implementations bound the wait themselves and report expiry as
/// [`PredictionError::Timeout`].
#[async_trait(?Send)]
pub trait PredictionTransport {
    async fn predict(&self, request: &ManualPredictionRequest) -> Result<ManualPredictionResponse>;
}

/// Classifies a raw HTTP answer from the prediction service.
///
/// Non-success statuses carry the service's `error` text when the body has one.
pub fn decode_response(status: u16, body: &str) -> Result<ManualPredictionResponse> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ServiceErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| "no error detail".to_string());
        warn!(status, %message, "Prediction service returned an error status");
        return Err(PredictionError::HttpStatus { status, message });
    }

    match serde_json::from_str::<ManualPredictionResponse>(body) {
        Ok(response) => {
            debug!(records = response.predictions.len(), "Decoded prediction response");
            Ok(response)
        }
        Err(e) => {
            if let Ok(service_error) = serde_json::from_str::<ServiceErrorBody>(body) {
                return Err(PredictionError::MalformedResponse(format!(
                    "service reported: {}",
                    service_error.error
                )));
            }
            Err(PredictionError::MalformedResponse(e.to_string()))
        }
    }
}
