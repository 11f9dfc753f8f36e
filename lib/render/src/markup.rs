//! Rendered content as a sequence of text and link segments.

use crate::escape::{escape_attribute, unescape_html};

/// Which recognizer produced a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Root-relative dashboard page such as `/signals.html`.
    PagePath,
    /// Absolute URL on the local development host, rewritten to its path.
    LocalHost,
    /// Any other `http`/`https` URL.
    External,
}

/// A recognized link. Both fields hold already-escaped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Link target.
    pub href: String,
    /// Text shown for the link.
    pub text: String,
    /// Recognizer that produced the link.
    pub kind: LinkKind,
}

/// One piece of rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Escaped text outside any link.
    Text(String),
    /// A link span.
    Link(Link),
}

/// Sanitized content ready for a view.
///
/// Every byte of the source text is contained, escaped, in exactly one
/// segment, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    segments: Vec<Segment>,
}

impl Rendered {
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns the segments in display order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the links in display order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Link(link) => Some(link),
            Segment::Text(_) => None,
        })
    }

    /// Renders the segments as markup.
    ///
    /// Links open in a new browsing context.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Link(link) => {
                    out.push_str("<a href=\"");
                    out.push_str(&escape_attribute(&link.href));
                    out.push_str("\" class=\"chat-link\" target=\"_blank\" rel=\"noopener noreferrer\">");
                    out.push_str(&link.text);
                    out.push_str("</a>");
                }
            }
        }
        out
    }

    /// Returns the unescaped display text with link markup dropped.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Link(link) => out.push_str(&link.text),
            }
        }
        unescape_html(&out)
    }
}
