//! HTTP client for replaying requests against the target origin.
//!
//! Redirect following is disabled: redirects must be observed and rewritten,
//! never transparently resolved. Any status code is a legitimate response;
//! only network-level failures surface as errors.

use std::time::Duration;

use axum::http::{HeaderMap, Method};
use bytes::Bytes;
use reqwest::redirect::Policy;

use crate::errors::AppError;

pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(Policy::none())
            .pool_max_idle_per_host(32)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Issues exactly one upstream call; no retries.
    pub async fn forward(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<reqwest::Response, AppError> {
        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        request.send().await.map_err(|e| {
            tracing::warn!("Upstream request failed: {}", e);
            AppError::Upstream(e.to_string())
        })
    }
}
