use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, Uri};
use axum::response::Response;

use crate::codec::{self, PROXY_PREFIX};
use crate::config::Config;
use crate::errors::AppError;
use crate::proxy::classify::{self, Strategy};
use crate::proxy::{headers as header_rules, markup, redirect, source, RewriteContext};
use crate::AppState;

/// The single request-handling boundary: every proxied exchange and every
/// failure is converted to a response here.
#[tracing::instrument(skip(state, headers, body), fields(req_id = %uuid::Uuid::new_v4()))]
pub async fn proxy_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let raw = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let encoded_target = raw.strip_prefix(PROXY_PREFIX).ok_or_else(|| {
        AppError::InvalidUrl(format!("path must start with {PROXY_PREFIX}"))
    })?;
    let target = codec::decode(encoded_target)?;

    let ctx = RewriteContext {
        proxy_origin: proxy_origin(&headers, &state.config),
        base: target.clone(),
    };

    let upstream_headers = header_rules::sanitize_request_headers(&headers);
    let request_body = if method == Method::GET || method == Method::HEAD {
        None
    } else {
        Some(body)
    };

    tracing::debug!(target = %target, %method, "forwarding upstream");

    let upstream_resp = tokio::time::timeout(
        Duration::from_secs(state.config.upstream_timeout_secs),
        state
            .upstream
            .forward(method, target.as_str(), upstream_headers, request_body),
    )
    .await
    .map_err(|_| AppError::Upstream("upstream request timed out".to_string()))??;

    let status = upstream_resp.status();
    let resp_headers = upstream_resp.headers().clone();
    let resp_body = upstream_resp
        .bytes()
        .await
        .map_err(|e| AppError::Upstream(format!("upstream body read failed: {e}")))?;

    let strategy = classify::classify(status, &resp_headers, &target);
    tracing::debug!(status = %status, ?strategy, "relaying upstream response");

    let (out_headers, out_body) = match strategy {
        Strategy::Redirect => {
            let mut out = header_rules::sanitize_response_headers(&resp_headers, false);
            let location = resp_headers
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok());
            if let Some(rewritten) = location.and_then(|l| redirect::rewrite_location(l, &ctx)) {
                if let Ok(value) = rewritten.parse() {
                    out.insert(header::LOCATION, value);
                }
            }
            (out, Bytes::new())
        }
        Strategy::Markup => {
            let rewritten = markup::rewrite_html(&String::from_utf8_lossy(&resp_body), &ctx)?;
            (
                header_rules::sanitize_response_headers(&resp_headers, true),
                Bytes::from(rewritten),
            )
        }
        Strategy::SourceText => {
            let rewritten = source::rewrite_source(&String::from_utf8_lossy(&resp_body), &ctx);
            (
                header_rules::sanitize_response_headers(&resp_headers, true),
                Bytes::from(rewritten),
            )
        }
        Strategy::Passthrough => (
            header_rules::sanitize_response_headers(&resp_headers, false),
            resp_body,
        ),
    };

    let mut response = Response::builder()
        .status(status)
        .body(Body::from(out_body))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("response build failed: {e}")))?;
    *response.headers_mut() = out_headers;

    Ok(response)
}

/// Scheme+host actually serving the client, used as the base of every
/// proxy-addressed URL written into rewritten content.
fn proxy_origin(headers: &HeaderMap, config: &Config) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    match headers.get(header::HOST).and_then(|v| v.to_str().ok()) {
        Some(host) => format!("{scheme}://{host}"),
        None => format!("http://localhost:{}", config.port),
    }
}
