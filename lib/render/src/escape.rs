//! Entity escaping for the three HTML-significant characters.

/// Escapes `&`, `<` and `>`.
///
/// `&` is replaced first so the entities produced for `<` and `>` are not
/// escaped a second time.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Reverses [`escape_html`] for display on surfaces that do not parse markup.
#[must_use]
pub fn unescape_html(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Escapes a value for use inside a double-quoted attribute.
pub(crate) fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;").replace('\'', "&#39;")
}
