//! Selects exactly one rewrite strategy for an upstream response.

use axum::http::{header, HeaderMap, StatusCode};
use url::Url;

/// The closed set of client-facing response treatments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Redirect,
    Markup,
    SourceText,
    Passthrough,
}

const SOURCE_EXTENSIONS: [&str; 4] = ["js", "ts", "mjs", "cjs"];
const SOURCE_CONTENT_TYPES: [&str; 3] = ["javascript", "typescript", "text/plain"];

/// First match wins; the redirect check must come before any content-type
/// branch so redirect bodies (often text/html) stay inside the proxy.
pub fn classify(status: StatusCode, headers: &HeaderMap, target: &Url) -> Strategy {
    if status.is_redirection() && headers.contains_key(header::LOCATION) {
        return Strategy::Redirect;
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.contains("text/html") {
        return Strategy::Markup;
    }

    let extension = std::path::Path::new(target.path())
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    if SOURCE_EXTENSIONS.contains(&extension)
        && SOURCE_CONTENT_TYPES.iter().any(|t| content_type.contains(t))
    {
        return Strategy::SourceText;
    }

    Strategy::Passthrough
}
