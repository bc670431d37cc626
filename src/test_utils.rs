#[cfg(test)]
pub mod test_utils {
    use crate::config::ClientConfig;
    use axum::{
        extract::State,
        http::StatusCode,
        response::Json,
        routing::post,
        Router,
    };
    use common::{Environment, PREDICT_MANUAL_PATH};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// A prediction service running on an ephemeral local port
    pub struct StubPredictor {
        pub base_url: String,
        hits: Arc<AtomicUsize>,
        handle: JoinHandle<()>,
    }

    impl StubPredictor {
        /// Number of requests the stub has answered
        pub fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }

        pub fn config(&self, request_timeout: Duration) -> ClientConfig {
            ClientConfig {
                environment: Environment::Development,
                api_base_url: self.base_url.clone(),
                request_timeout,
            }
        }
    }

    impl Drop for StubPredictor {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    /// How the stub answers `POST /api/predict/manual`
    #[derive(Clone)]
    pub enum Behaviour {
        /// Hourly forecast computed from the readings, like the real service
        Model,
        /// Fixed status and JSON body
        Fixed(StatusCode, Value),
        /// Sleep before answering with the model
        Slow(Duration),
    }

    #[derive(Clone)]
    struct StubState {
        behaviour: Behaviour,
        hits: Arc<AtomicUsize>,
    }

    /// Start a stub prediction service with the given behaviour
    pub async fn spawn_predictor(behaviour: Behaviour) -> StubPredictor {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = StubState { behaviour, hits: hits.clone() };
        let app = Router::new()
            .route(PREDICT_MANUAL_PATH, post(manual_prediction))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub predictor");
        let addr = listener.local_addr().expect("Stub predictor has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub predictor crashed");
        });

        StubPredictor { base_url: format!("http://{}", addr), hits, handle }
    }

    /// Base URL on which nothing is listening
    pub async fn unused_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    async fn manual_prediction(
        State(state): State<StubState>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        state.hits.fetch_add(1, Ordering::SeqCst);

        match state.behaviour {
            Behaviour::Model => model_response(&body),
            Behaviour::Fixed(status, value) => (status, Json(value)),
            Behaviour::Slow(delay) => {
                tokio::time::sleep(delay).await;
                model_response(&body)
            }
        }
    }

    /// Mirrors the service's synthetic hourly model, including its failure on unparsable input
    fn model_response(body: &Value) -> (StatusCode, Json<Value>) {
        let reading = |key: &str, default: f64| -> Result<f64, String> {
            match body.get(key) {
                None => Ok(default),
                Some(Value::Number(n)) => n.as_f64().ok_or_else(|| format!("bad number for {}", key)),
                Some(Value::String(s)) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("could not convert string to float: '{}'", s)),
                Some(other) => Err(format!("float() argument must be a string or a number, not '{}'", other)),
            }
        };

        let parsed = reading("ambient_temp", 25.0)
            .and_then(|_| reading("module_temp", 28.0))
            .and_then(|module| reading("irradiation", 80.0).map(|irr| (module, irr)));
        let (module, irradiation) = match parsed {
            Ok(values) => values,
            Err(error) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": error })));
            }
        };

        let round2 = |v: f64| (v * 100.0).round() / 100.0;
        let base_power = irradiation * 0.01;
        let predictions: Vec<Value> = [8, 10, 12, 14, 16, 18]
            .iter()
            .map(|h| {
                let predicted = base_power * (0.6 + 0.1 * (h % 5) as f64);
                let actual = predicted * (0.9 + 0.05 * ((h % 3) - 1) as f64);
                json!({
                    "actual_power": round2(actual),
                    "efficiency": round2(predicted / base_power * 100.0),
                    "hour": h,
                    "module_temp": module + (h % 5) as f64,
                    "predicted_power": round2(predicted),
                })
            })
            .collect();

        let efficiency = predictions
            .iter()
            .map(|p| p["efficiency"].as_f64().unwrap_or_default())
            .sum::<f64>()
            / predictions.len() as f64;

        (
            StatusCode::OK,
            Json(json!({ "predictions": predictions, "system_efficiency": round2(efficiency) })),
        )
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set. Keep the returned guard alive for the
    /// duration of the test.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}
