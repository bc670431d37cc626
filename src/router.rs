use crate::handlers::health::health_check;
use crate::schemas::AppState;
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

/// Create application router serving the dashboard bundle
pub fn create_router(state: AppState) -> Router {
    let dashboard = ServeDir::new(&state.static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/health", get(health_check))
        .fallback_service(dashboard)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30))),
        )
        .with_state(state)
}
