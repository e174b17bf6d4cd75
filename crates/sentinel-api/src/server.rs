//! Listener setup for the control API.

use std::net::SocketAddr;
use std::sync::Arc;

use sentinel_core::config::ServerConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Bind `host:port` from `config` and serve the control API on it.
///
/// # Errors
///
/// [`ServerError::Bind`] for an unparseable address or a failed bind,
/// [`ServerError::Serve`] if accepting connections fails.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let environment = state.environment();
    let router = build_router(state, &config.cors);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, %environment, "Control API listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Listener failures.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The address is invalid or could not be bound.
    #[error("bind error: {0}")]
    Bind(String),

    /// Accepting connections failed.
    #[error("serve error: {0}")]
    Serve(String),
}
