//! Bidirectional mapping between an absolute target URL and the proxy's
//! own path space.
//!
//! `encode` is the only producer of proxy-addressed URLs embedded in
//! rewritten content; `decode` is the single entry point translating
//! client-supplied paths into the value used for forwarding and base-URL
//! resolution.

use url::Url;

use crate::errors::AppError;

/// Fixed literal after which the percent-encoded target URL appears.
pub const PROXY_PREFIX: &str = "/cors/";

/// Percent-encodes the full absolute URL and appends it to the prefix.
pub fn encode(url: &Url) -> String {
    format!("{}{}", PROXY_PREFIX, urlencoding::encode(url.as_str()))
}

/// Decodes the prefix-stripped remainder of an inbound path into a target
/// URL. A bare host is coerced to `http://` before validation; an explicit
/// scheme other than `http`/`https` is rejected.
pub fn decode(raw: &str) -> Result<Url, AppError> {
    let decoded = urlencoding::decode(raw)
        .map_err(|_| AppError::InvalidUrl("target is not valid percent-encoding".to_string()))?;
    let decoded = decoded.trim();

    if decoded.is_empty() {
        return Err(AppError::InvalidUrl("empty target URL".to_string()));
    }

    let lower = decoded.to_ascii_lowercase();
    let url = if lower.starts_with("http://") || lower.starts_with("https://") {
        Url::parse(decoded)
    } else if decoded.contains("://") {
        return Err(AppError::InvalidUrl(format!(
            "unsupported scheme in target: {decoded}"
        )));
    } else {
        Url::parse(&format!("http://{decoded}"))
    }
    .map_err(|e| AppError::InvalidUrl(format!("unparseable target URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::InvalidUrl(format!(
            "unsupported scheme: {other}"
        ))),
    }
}
