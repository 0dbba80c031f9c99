use axum::{http::header, response::IntoResponse, Router};

/// Health check router for hosting platforms that expect a `web` process.
///
/// Every request, regardless of path or method, is answered by the fallback with
/// `200 OK` and a plain text body.
pub fn router() -> Router {
    Router::new().fallback(health)
}

async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "OK\n")
}
