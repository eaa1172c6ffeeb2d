pub mod classify;
pub mod handler;
pub mod headers;
pub mod markup;
pub mod redirect;
pub mod source;
pub mod upstream;

use url::Url;

use crate::codec;

/// Per-request rewriting context: the origin actually serving the client
/// and the target URL used as the base for resolving relative references.
/// One per request, never shared or cached.
pub struct RewriteContext {
    pub proxy_origin: String,
    pub base: Url,
}

impl RewriteContext {
    /// Proxy-addressed form of an absolute URL.
    pub fn proxied(&self, url: &Url) -> String {
        format!("{}{}", self.proxy_origin, codec::encode(url))
    }

    /// Resolves a reference found in a body against the target base and
    /// returns its proxy-addressed form. `None` for references that do not
    /// resolve to an http(s) URL (mailto:, javascript:, data:, garbage);
    /// those are left untouched by the rewriters.
    pub fn proxy_reference(&self, reference: &str) -> Option<String> {
        let absolute = self.base.join(reference).ok()?;
        match absolute.scheme() {
            "http" | "https" => Some(self.proxied(&absolute)),
            _ => None,
        }
    }
}
