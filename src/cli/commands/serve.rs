use anyhow::Result;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use crate::router::create_router;
use crate::schemas::AppState;

pub async fn serve(bind_address: &str, static_dir: &Path) -> Result<()> {
    trace!("Entering serve function");
    info!("Solar dashboard host starting up");
    debug!("Static directory: {}", static_dir.display());
    debug!("Bind address: {}", bind_address);

    if !static_dir.join("index.html").is_file() {
        warn!(
            "No index.html in {}, build the dashboard first (trunk build workspace/frontend/index.html)",
            static_dir.display()
        );
    }

    let state = AppState { static_dir: static_dir.to_path_buf() };

    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Solar dashboard available on http://{}", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
