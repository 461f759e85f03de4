use std::convert::Infallible;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// Logs method, path, status and latency for every request
pub async fn request_log_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<Response, Infallible> {
    let start: Instant = Instant::now();
    let method: String = req.method().to_string();
    let path: String = req.uri().path().to_string();

    let response: Response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    Ok(response)
}
