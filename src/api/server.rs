//! HTTP server lifecycle — binds the listener and serves the API router.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::router::api_router;
use crate::state::AppState;

/// Bind `addr` and serve the API until the process is stopped.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind API server on {addr}: {e}"))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;
    tracing::info!(%local_addr, "API server listening");

    axum::serve(listener, api_router(state))
        .await
        .map_err(|e| format!("API server error: {e}"))
}
