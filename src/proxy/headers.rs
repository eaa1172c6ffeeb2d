//! Header filtering for both legs of a proxied exchange.
//!
//! Inbound headers are misleading once the request target changes (`host`,
//! `origin`, `referer`) or are recomputed by the client library
//! (`content-length`). `accept-encoding` is dropped so the upstream answers
//! with an identity-encoded body the rewriters can operate on.

use axum::http::header::{self, HeaderMap, HeaderValue};

const STRIPPED_REQUEST_HEADERS: [&str; 7] = [
    "host",
    "origin",
    "referer",
    "content-length",
    "accept-encoding",
    "connection",
    "transfer-encoding",
];

/// Client headers minus the strip-list, ready to forward upstream.
pub fn sanitize_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in inbound {
        if STRIPPED_REQUEST_HEADERS.contains(&name.as_str()) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Forces the permissive CORS header set. Applied to every response the
/// proxy emits, including errors and redirects.
pub fn force_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("*"),
    );
}

/// Upstream headers ready for the client: everything copied verbatim except
/// `content-length` (recomputed from the final body) and hop-by-hop
/// headers; `content-encoding` is dropped only when a rewrite strategy
/// altered the body bytes. CORS headers are forced on last, overriding
/// whatever the upstream sent.
pub fn sanitize_response_headers(upstream: &HeaderMap, body_rewritten: bool) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in upstream {
        match name.as_str() {
            "content-length" | "transfer-encoding" | "connection" => continue,
            "content-encoding" if body_rewritten => continue,
            _ => {
                out.append(name.clone(), value.clone());
            }
        }
    }
    force_cors(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn strips_identifying_request_headers() {
        let inbound = headers(&[
            ("host", "proxy.local"),
            ("origin", "http://evil.example"),
            ("referer", "http://evil.example/page"),
            ("content-length", "42"),
            ("accept", "text/html"),
            ("x-custom", "kept"),
        ]);
        let out = sanitize_request_headers(&inbound);
        assert!(!out.contains_key("host"));
        assert!(!out.contains_key("origin"));
        assert!(!out.contains_key("referer"));
        assert!(!out.contains_key("content-length"));
        assert_eq!(out.get("accept").unwrap(), "text/html");
        assert_eq!(out.get("x-custom").unwrap(), "kept");
    }

    #[test]
    fn forces_permissive_cors() {
        let out = sanitize_response_headers(&HeaderMap::new(), false);
        assert_eq!(out.get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(out.get("access-control-allow-headers").unwrap(), "*");
        assert_eq!(out.get("access-control-expose-headers").unwrap(), "*");
    }

    #[test]
    fn overrides_upstream_cors() {
        let upstream = headers(&[("access-control-allow-origin", "https://only.example")]);
        let out = sanitize_response_headers(&upstream, false);
        assert_eq!(out.get("access-control-allow-origin").unwrap(), "*");
    }

    #[test]
    fn always_drops_content_length() {
        let upstream = headers(&[("content-length", "1234"), ("content-type", "text/html")]);
        let out = sanitize_response_headers(&upstream, false);
        assert!(!out.contains_key("content-length"));
        assert_eq!(out.get("content-type").unwrap(), "text/html");
    }

    #[test]
    fn drops_content_encoding_only_for_rewritten_bodies() {
        let upstream = headers(&[("content-encoding", "gzip")]);
        assert!(sanitize_response_headers(&upstream, true)
            .get("content-encoding")
            .is_none());
        assert_eq!(
            sanitize_response_headers(&upstream, false)
                .get("content-encoding")
                .unwrap(),
            "gzip"
        );
    }
}
