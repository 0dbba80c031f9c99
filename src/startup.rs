use tracing_subscriber::EnvFilter;

use crate::{error::AppError, router};

/// Installs the global tracing subscriber.
///
/// The filter is read from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Serves the health check router on all interfaces.
///
/// Runs until the listener fails. It should be called from within a tokio::spawn task
/// so the Discord client keeps running when the port cannot be bound.
///
/// # Arguments
/// - `port` - TCP port to listen on
///
/// # Returns
/// - `Err(AppError::IoErr)` if binding or serving fails
pub async fn serve_health(port: u16) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    tracing::info!("Health server listening on port {}", port);

    axum::serve(listener, router::router()).await?;

    Ok(())
}
