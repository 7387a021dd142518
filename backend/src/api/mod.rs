//! API module
//!
//! HTTP handlers and the router that wires them together with the request-id,
//! tracing and CORS layers.

pub mod chat;
pub mod health;
pub mod utils;

use crate::state::AppState;
use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Header carrying the per-request correlation id, in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tag every request with a correlation id and log its outcome
///
/// A caller-supplied `x-request-id` is reused, otherwise a v4 UUID is minted.
/// The id is echoed on the response so widget-side logs can be matched to
/// backend logs.
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let span = info_span!("chat_request", request_id = %request_id, %method, %path);
    let mut response = next.run(request).instrument(span).await;

    let elapsed_ms = started.elapsed().as_millis();
    let status = response.status().as_u16();
    if status >= 500 {
        warn!(request_id = %request_id, %method, %path, status, elapsed_ms, "Request failed");
    } else {
        info!(request_id = %request_id, %method, %path, status, elapsed_ms, "Request served");
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/chat/message", post(chat::chat_message))
        .route("/v1/health", get(health::health))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // The widget is embedded on arbitrary host pages
        .with_state(state)
}
