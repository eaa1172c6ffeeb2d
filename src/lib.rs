//! corsgate: same-origin-bypassing HTTP forwarding proxy.
//!
//! Accepts a request whose path encodes an arbitrary absolute target URL,
//! replays it against the target, and returns the response with permissive
//! CORS headers and embedded resource references rewritten to flow back
//! through the proxy. Re-exports modules needed by integration tests in
//! `tests/`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use axum::Router;

pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod proxy;
pub mod usage;

/// Shared application state passed to handlers. Holds only immutable
/// configuration and the upstream client; the proxy is stateless between
/// requests.
pub struct AppState {
    pub config: config::Config,
    pub upstream: proxy::upstream::UpstreamClient,
}

pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/", get(usage::usage_page))
        // Proxy: catch everything else, any method
        .fallback(any(proxy::handler::proxy_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
}

/// Middleware: injects a unique x-request-id into every response so clients
/// can correlate errors with proxy logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}
