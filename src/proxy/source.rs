//! Source-text rewriting for JS/TS-like bodies.
//!
//! Two passes over the same text: delimiter-bounded absolute URLs, then
//! dynamic-import calls. No relative-URL resolution happens here: the base
//! of a dynamically constructed string is not generally knowable, so only
//! strings that are already absolute are touched. Candidates that already
//! point at the proxy are skipped, which keeps the rewrite idempotent.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

use crate::proxy::RewriteContext;

// An absolute http(s) URL bounded on the left by a quote, backtick, or
// opening paren. The right delimiter is whatever stops the URL character
// class and stays in place.
static DELIMITED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?P<open>["'`(])(?P<url>https?://[^\s"'`()]+)"#).unwrap()
});

// import("URL") / import('URL') / import(`URL`). The regex crate has no
// backreferences, so each quote style is its own alternative.
static DYNAMIC_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"import\(\s*(?:"(?P<dq>https?://[^"]+)"|'(?P<sq>https?://[^']+)'|`(?P<bq>https?://[^`]+)`)\s*\)"#,
    )
    .unwrap()
});

pub fn rewrite_source(body: &str, ctx: &RewriteContext) -> String {
    let pass_one = DELIMITED_URL.replace_all(body, |caps: &Captures| {
        let open = &caps["open"];
        match proxied_literal(&caps["url"], ctx) {
            Some(proxied) => format!("{open}{proxied}"),
            None => caps[0].to_string(),
        }
    });

    DYNAMIC_IMPORT
        .replace_all(&pass_one, |caps: &Captures| {
            let (quote, raw) = if let Some(m) = caps.name("dq") {
                ('"', m.as_str())
            } else if let Some(m) = caps.name("sq") {
                ('\'', m.as_str())
            } else if let Some(m) = caps.name("bq") {
                ('`', m.as_str())
            } else {
                return caps[0].to_string();
            };
            match proxied_literal(raw, ctx) {
                Some(proxied) => format!("import({quote}{proxied}{quote})"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Proxy-addressed form of an absolute URL literal. `None` leaves the match
/// verbatim: the candidate fails to parse, or it already points at the
/// proxy and rewriting it again would double-encode.
fn proxied_literal(raw: &str, ctx: &RewriteContext) -> Option<String> {
    if raw.starts_with(&ctx.proxy_origin) {
        return None;
    }
    let url = Url::parse(raw).ok()?;
    Some(ctx.proxied(&url))
}
