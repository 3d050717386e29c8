//! Lexical HTML link rewriting.
//!
//! Three ordered passes over the document text:
//! 1. `href="/`, `src="/`, `action="/` (not `//`) → `…="/proxy/<origin>/`
//! 2. a quoted literal `<origin>` → quoted `/proxy/<origin>`
//! 3. `content="/` (not `//`) → `content="/proxy/<origin>/`
//!
//! These are text substitutions, not a parse tree. Matches inside inline
//! scripts or comments are rewritten too.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static ATTRIBUTE_RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(href|src|action)="/(/?)"#).expect("attribute pattern compiles")
});

static CONTENT_RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(content)="/(/?)"#).expect("content pattern compiles")
});

/// Rewrite `html` so references to `target_origin` route through the proxy.
///
/// Total: input the patterns do not recognise passes through unchanged.
pub fn rewrite(html: &str, target_origin: &str) -> String {
    let prefix = format!("/proxy/{}", target_origin);

    let pass_one = rewrite_root_relative(&ATTRIBUTE_RELATIVE, html, &prefix);
    let pass_two = rewrite_quoted_origin(&pass_one, target_origin, &prefix);
    rewrite_root_relative(&CONTENT_RELATIVE, &pass_two, &prefix)
}

fn rewrite_root_relative(pattern: &Regex, text: &str, prefix: &str) -> String {
    pattern
        .replace_all(text, |caps: &Captures| {
            // `//host` is protocol-relative, leave it alone
            if !caps[2].is_empty() {
                return caps[0].to_string();
            }
            format!("{}=\"{}/", &caps[1], prefix)
        })
        .into_owned()
}

fn rewrite_quoted_origin(text: &str, target_origin: &str, prefix: &str) -> String {
    if target_origin.is_empty() {
        return text.to_string();
    }
    let pattern = format!(r#"(?i)(["']){}"#, regex::escape(target_origin));
    match Regex::new(&pattern) {
        Ok(origin) => origin
            .replace_all(text, |caps: &Captures| format!("{}{}", &caps[1], prefix))
            .into_owned(),
        Err(e) => {
            tracing::debug!(error = %e, origin = target_origin, "Skipping origin rewrite");
            text.to_string()
        }
    }
}

/// True when a `content-type` value denotes HTML.
pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}
