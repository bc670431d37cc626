use common::{predict_url, Environment, PREDICT_MANUAL_PATH};
use log::Level;
use web_sys::window;

/// Base URL baked in at build time, e.g. `SOLAR_API_BASE_URL=https://api.example.com trunk build`
const BUILD_API_BASE_URL: Option<&str> = option_env!("SOLAR_API_BASE_URL");

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Where the dashboard is running
    pub environment: Environment,

    /// Prediction service base URL (e.g., "http://localhost:5000")
    pub api_base_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Request timeout in milliseconds
    pub request_timeout_ms: u32,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            api_base_url: String::new(),
            log_level: Level::Info,
            request_timeout_ms: 30000,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

impl AppSettings {
    /// Create settings from the build environment, window location and localStorage
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            settings.api_base_url = BUILD_API_BASE_URL.unwrap_or_default().to_string();
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

            if settings.debug_mode {
                settings.environment = Environment::Development;
                settings.log_level = Level::Debug;
            }
        }

        // Same-origin deployments need no explicit base URL
        let origin = window.location().origin().unwrap_or_default();
        settings.api_base_url = resolve_base_url(BUILD_API_BASE_URL, settings.environment, &origin);

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(base_url)) = storage.get_item("solar_api_base_url") {
                if !base_url.trim().is_empty() {
                    settings.api_base_url = base_url.trim().to_string();
                }
            }

            if let Ok(Some(log_level)) = storage.get_item("solar_log_level") {
                settings.log_level = parse_level(&log_level).unwrap_or(settings.log_level);
            }

            if let Ok(Some(timeout)) = storage.get_item("solar_request_timeout_ms") {
                match timeout.parse::<u32>() {
                    Ok(timeout_val) if timeout_val > 0 => settings.request_timeout_ms = timeout_val,
                    _ => {}
                }
            }
        }

        settings
    }

    /// Full URL of the manual prediction endpoint
    pub fn predict_url(&self) -> String {
        predict_url(&self.api_base_url, PREDICT_MANUAL_PATH)
    }
}

fn resolve_base_url(build: Option<&str>, environment: Environment, origin: &str) -> String {
    build
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .or_else(|| environment.default_api_base_url())
        .unwrap_or(origin)
        .to_string()
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
