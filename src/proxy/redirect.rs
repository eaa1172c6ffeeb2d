//! Keeps redirect chains inside the proxy.

use crate::proxy::RewriteContext;

/// Resolves a `location` header value (relative or absolute) against the
/// target URL and returns its proxy-addressed replacement. `None` when the
/// value does not resolve to an http(s) URL; the original header is then
/// left untouched.
pub fn rewrite_location(location: &str, ctx: &RewriteContext) -> Option<String> {
    ctx.proxy_reference(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn ctx() -> RewriteContext {
        RewriteContext {
            proxy_origin: "http://127.0.0.1:3000".to_string(),
            base: Url::parse("https://example.com/old").unwrap(),
        }
    }

    #[test]
    fn resolves_relative_redirects() {
        let got = rewrite_location("/new", &ctx()).unwrap();
        assert_eq!(
            got,
            format!(
                "http://127.0.0.1:3000/cors/{}",
                urlencoding::encode("https://example.com/new")
            )
        );
    }

    #[test]
    fn resolves_absolute_redirects() {
        let got = rewrite_location("https://other.example/landing", &ctx()).unwrap();
        assert_eq!(
            got,
            format!(
                "http://127.0.0.1:3000/cors/{}",
                urlencoding::encode("https://other.example/landing")
            )
        );
    }

    #[test]
    fn leaves_unresolvable_locations_alone() {
        assert!(rewrite_location("mailto:admin@example.com", &ctx()).is_none());
    }
}
