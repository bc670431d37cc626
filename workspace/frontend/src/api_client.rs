use async_trait::async_trait;
use common::{ManualPredictionRequest, ManualPredictionResponse};
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use session::{decode_response, PredictionError, PredictionTransport};

use crate::settings::AppSettings;

/// Calls the prediction service with `fetch`, racing each request against a timer.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserTransport {
    url: String,
    timeout_ms: u32,
}

impl BrowserTransport {
    pub fn new(url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            url: url.into(),
            timeout_ms,
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.predict_url(), settings.request_timeout_ms)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl PredictionTransport for BrowserTransport {
    async fn predict(
        &self,
        request: &ManualPredictionRequest,
    ) -> Result<ManualPredictionResponse, PredictionError> {
        let call = Box::pin(post_prediction(&self.url, request));
        let timer = Box::pin(TimeoutFuture::new(self.timeout_ms));

        match select(call, timer).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right(((), _)) => {
                log::error!("POST {} - timed out after {} ms", self.url, self.timeout_ms);
                Err(PredictionError::Timeout {
                    after_ms: u64::from(self.timeout_ms),
                })
            }
        }
    }
}

async fn post_prediction(
    url: &str,
    body: &ManualPredictionRequest,
) -> Result<ManualPredictionResponse, PredictionError> {
    log::debug!("POST request to: {}", url);

    let response = Request::post(url)
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", url, error_msg);
            PredictionError::Transport(error_msg)
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("POST {} - {}", url, error_msg);
            PredictionError::Transport(error_msg)
        })?;

    let status = response.status();
    log::trace!("POST {} - Response {} received, reading body", url, status);

    let text = response.text().await.map_err(|e| {
        let error_msg = format!("Failed to read response: {}", e);
        log::error!("POST {} - {}", url, error_msg);
        PredictionError::Transport(error_msg)
    })?;

    let decoded = decode_response(status, &text);
    match &decoded {
        Ok(payload) => log::info!(
            "POST {} - Success ({} predictions)",
            url,
            payload.predictions.len()
        ),
        Err(e) => log::error!("POST {} - {}", url, e),
    }
    decoded
}
