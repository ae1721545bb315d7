//! Request logging middleware.
//!
//! Logs every request with method and path on the way in, and status
//! plus duration on the way out.

use std::time::Instant;

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

pub async fn log_requests(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    tracing::info!(%method, path, "incoming request");

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::info!(%method, path, status, elapsed_ms, "outgoing response");

    response
}
