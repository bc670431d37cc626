use anyhow::{bail, Result};
use common::Environment;
use std::time::Duration;
use tracing::debug;

/// Default bound on one prediction request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolved settings for talking to the prediction service
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Deployment environment the base URL was selected for
    pub environment: Environment,
    /// Base URL of the prediction service, without the endpoint path
    pub api_base_url: String,
    /// Upper bound on a single request
    pub request_timeout: Duration,
}

/// Load a `.env` file from the working directory if there is one
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Resolve the client configuration.
///
/// An explicit base URL wins; otherwise the environment's default is used.
/// Production has no default and must be configured.
pub fn resolve_client_config(
    environment: Environment,
    api_base_url: Option<String>,
    request_timeout: Duration,
) -> Result<ClientConfig> {
    if request_timeout.is_zero() {
        bail!("request timeout must be greater than zero");
    }

    let api_base_url = match api_base_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => url.trim().to_string(),
        None => match environment.default_api_base_url() {
            Some(url) => url.to_string(),
            None => bail!(
                "SOLAR_API_BASE_URL must be set for the {} environment",
                environment
            ),
        },
    };

    debug!(%environment, %api_base_url, ?request_timeout, "Resolved client configuration");
    Ok(ClientConfig { environment, api_base_url, request_timeout })
}
