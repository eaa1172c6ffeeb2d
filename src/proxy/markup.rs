//! Structured-markup rewriting.
//!
//! Parses the body as HTML and rewrites resource-bearing attributes so the
//! document keeps functioning behind the proxy. Individual references that
//! fail to resolve are left untouched; only a parser-level failure aborts
//! the rewrite.

use lol_html::html_content::Element;
use lol_html::{element, rewrite_str, RewriteStrSettings};

use crate::errors::AppError;
use crate::proxy::RewriteContext;

pub fn rewrite_html(body: &str, ctx: &RewriteContext) -> Result<String, AppError> {
    rewrite_str(
        body,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("img[src]", |el| {
                    rewrite_attribute(el, "src", ctx);
                    Ok(())
                }),
                element!("script[src]", |el| {
                    rewrite_attribute(el, "src", ctx);
                    Ok(())
                }),
                element!("link[href]", |el| {
                    rewrite_attribute(el, "href", ctx);
                    Ok(())
                }),
                element!("a[href]", |el| {
                    rewrite_attribute(el, "href", ctx);
                    Ok(())
                }),
                element!("form[action]", |el| {
                    rewrite_attribute(el, "action", ctx);
                    Ok(())
                }),
                element!("img[srcset]", |el| {
                    rewrite_srcset_attribute(el, ctx);
                    Ok(())
                }),
                element!("source[srcset]", |el| {
                    rewrite_srcset_attribute(el, ctx);
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("markup rewrite failed: {e}")))
}

fn rewrite_attribute(el: &mut Element, attribute: &str, ctx: &RewriteContext) {
    if let Some(value) = el.get_attribute(attribute) {
        if let Some(proxied) = ctx.proxy_reference(&value) {
            el.set_attribute(attribute, &proxied).ok();
        }
    }
}

fn rewrite_srcset_attribute(el: &mut Element, ctx: &RewriteContext) {
    if let Some(value) = el.get_attribute("srcset") {
        el.set_attribute("srcset", &rewrite_srcset(&value, ctx)).ok();
    }
}

/// Rewrites each `url descriptor?` candidate of a srcset value, preserving
/// descriptors and rejoining with `, `.
fn rewrite_srcset(value: &str, ctx: &RewriteContext) -> String {
    value
        .split(',')
        .map(|candidate| {
            let candidate = candidate.trim();
            let mut parts = candidate.splitn(2, char::is_whitespace);
            let url_part = parts.next().unwrap_or("");
            let descriptor = parts.next().map(str::trim);
            let rewritten = ctx
                .proxy_reference(url_part)
                .unwrap_or_else(|| url_part.to_string());
            match descriptor {
                Some(descriptor) => format!("{rewritten} {descriptor}"),
                None => rewritten,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn ctx() -> RewriteContext {
        RewriteContext {
            proxy_origin: "http://127.0.0.1:3000".to_string(),
            base: Url::parse("https://example.com/dir/page.html").unwrap(),
        }
    }

    fn proxied(target: &str) -> String {
        format!("http://127.0.0.1:3000/cors/{}", urlencoding::encode(target))
    }

    #[test]
    fn rewrites_img_src() {
        let out = rewrite_html(r#"<img src="/logo.png">"#, &ctx()).unwrap();
        assert!(out.contains(&proxied("https://example.com/logo.png")), "{out}");
    }

    #[test]
    fn rewrites_script_link_anchor_form() {
        let html = concat!(
            r#"<script src="app.js"></script>"#,
            r#"<link rel="stylesheet" href="/style.css">"#,
            r#"<a href="https://other.example/page">x</a>"#,
            r#"<form action="/submit"></form>"#,
        );
        let out = rewrite_html(html, &ctx()).unwrap();
        assert!(out.contains(&proxied("https://example.com/dir/app.js")));
        assert!(out.contains(&proxied("https://example.com/style.css")));
        assert!(out.contains(&proxied("https://other.example/page")));
        assert!(out.contains(&proxied("https://example.com/submit")));
    }

    #[test]
    fn rewrites_srcset_preserving_descriptors() {
        let out = rewrite_html(r#"<img srcset="a.png 1x, /b.png 2x">"#, &ctx()).unwrap();
        let expected = format!(
            "{} 1x, {} 2x",
            proxied("https://example.com/dir/a.png"),
            proxied("https://example.com/b.png")
        );
        assert!(out.contains(&expected), "{out}");
    }

    #[test]
    fn rewrites_source_srcset() {
        let out = rewrite_html(r#"<picture><source srcset="hero.webp"></picture>"#, &ctx()).unwrap();
        assert!(out.contains(&proxied("https://example.com/dir/hero.webp")));
    }

    #[test]
    fn leaves_non_http_references_alone() {
        let html = r#"<a href="mailto:a@b.c">m</a><a href="javascript:void(0)">j</a>"#;
        let out = rewrite_html(html, &ctx()).unwrap();
        assert!(out.contains(r#"href="mailto:a@b.c""#));
        assert!(out.contains(r#"href="javascript:void(0)""#));
    }

    #[test]
    fn leaves_elements_without_target_attributes_alone() {
        let html = r#"<img alt="decorative"><a name="anchor">x</a>"#;
        let out = rewrite_html(html, &ctx()).unwrap();
        assert_eq!(out, html);
    }
}
