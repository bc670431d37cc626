use async_trait::async_trait;
use common::{predict_url, ManualPredictionRequest, ManualPredictionResponse, PREDICT_MANUAL_PATH};
use reqwest::Client;
use session::{decode_response, PredictionError, PredictionTransport};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::ClientConfig;

/// Prediction transport over HTTP for native builds
pub struct HttpTransport {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Returns a transport for the service configured in `config`
    ///
    /// # Arguments
    ///
    /// * 'config' - resolved client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            url: predict_url(&config.api_base_url, PREDICT_MANUAL_PATH),
            timeout: config.request_timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_error(&self, e: reqwest::Error) -> PredictionError {
        let err = if e.is_timeout() {
            PredictionError::Timeout { after_ms: self.timeout.as_millis() as u64 }
        } else {
            PredictionError::Transport(e.to_string())
        };
        error!("POST {} - {}", self.url, err);
        err
    }
}

#[async_trait(?Send)]
impl PredictionTransport for HttpTransport {
    async fn predict(
        &self,
        request: &ManualPredictionRequest,
    ) -> Result<ManualPredictionResponse, PredictionError> {
        debug!("POST request to: {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;
        debug!("POST {} - status {}, {} bytes", self.url, status, body.len());

        decode_response(status, &body)
    }
}
