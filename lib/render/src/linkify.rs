//! Link recognition over escaped text.

use crate::escape::escape_html;
use crate::markup::{Link, LinkKind, Rendered, Segment};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// The local host alternative matches the development server at
/// `http://localhost:8000`.
///
/// Alternation order sets priority when two patterns could start at the same
/// offset. A page path always starts with `/` and a URL with `h`, so the only
/// real tie is local host versus generic URL.
///
/// External URLs stop at whitespace, quotes and entity starts other than
/// `&amp;`, which keeps an escaped `<`/`>` outside the link and makes attribute
/// breakout impossible.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<local>http://localhost:8000(?P<local_path>/[A-Za-z0-9_-]*\.?[A-Za-z0-9_]*)?)",
        r#"|(?P<url>https?://(?:[^\s<>"'&]|&amp;)+)"#,
        r"|(?P<page>/[A-Za-z0-9_-]+\.html)",
    ))
    .expect("link pattern is a valid regex")
});

/// Escapes `raw` and turns recognized spans into links.
#[must_use]
pub fn linkify(raw: &str) -> Rendered {
    let escaped = escape_html(raw);
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in LINK_PATTERN.captures_iter(&escaped) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            segments.push(Segment::Text(escaped[cursor..whole.start()].to_string()));
        }
        segments.push(Segment::Link(link_from(&caps, whole.as_str())));
        cursor = whole.end();
    }

    if cursor < escaped.len() {
        segments.push(Segment::Text(escaped[cursor..].to_string()));
    }

    Rendered::from_segments(segments)
}

/// Escapes `raw` without recognizing any links.
#[must_use]
pub fn render_plain(raw: &str) -> Rendered {
    let escaped = escape_html(raw);
    if escaped.is_empty() {
        return Rendered::default();
    }
    Rendered::from_segments(vec![Segment::Text(escaped)])
}

fn link_from(caps: &Captures<'_>, matched: &str) -> Link {
    if caps.name("local").is_some() {
        let href = caps
            .name("local_path")
            .map_or_else(|| "/".to_string(), |path| path.as_str().to_string());
        return Link {
            href,
            text: matched.to_string(),
            kind: LinkKind::LocalHost,
        };
    }
    let kind = if caps.name("url").is_some() {
        LinkKind::External
    } else {
        LinkKind::PagePath
    };
    Link {
        href: matched.to_string(),
        text: matched.to_string(),
        kind,
    }
}
