//! HTML content sanitizer
//!
//! A denylist filter run over rendered template bodies before they are
//! handed to the email provider. It removes:
//! - `<script>...</script>` and `<iframe>...</iframe>` blocks
//! - `javascript:` URI schemes in attribute values
//! - inline `on*=` event-handler attributes
//!
//! This is pattern matching, not an HTML parser. It catches malformed or
//! careless template content; it is not a security boundary and a determined
//! author can get markup past it (e.g. unterminated tags or entity-encoded
//! schemes). The event-handler pattern is not tied to tag context, so prose
//! shaped like an attribute (` onward=far`) is stripped too.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    script: Regex,
    iframe: Regex,
    js_scheme: Regex,
    event_handler: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        script: Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"),
        iframe: Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe\s*>").expect("valid regex"),
        js_scheme: Regex::new(r#"(?i)(=\s*["']?\s*)javascript\s*:"#).expect("valid regex"),
        event_handler: Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#)
            .expect("valid regex"),
    })
}

/// Strip denylisted constructs from an HTML string
pub fn sanitize_html(html: &str) -> String {
    let p = patterns();
    let html = p.script.replace_all(html, "");
    let html = p.iframe.replace_all(&html, "");
    let html = p.js_scheme.replace_all(&html, "$1");
    let html = p.event_handler.replace_all(&html, "");
    html.into_owned()
}
