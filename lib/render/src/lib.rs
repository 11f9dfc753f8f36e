//! Safe rendering of chat message content.
//!
//! Assistant output is untrusted. It is turned into markup by an ordered
//! pipeline:
//!
//! 1. **Escape** `&`, `<` and `>` over the whole string.
//! 2. **Page paths** such as `/signals.html` become links to that path.
//! 3. **Local host URLs** (`http://localhost:8000` plus an optional path)
//!    become links to the path portion, defaulting to `/`.
//! 4. **External URLs** (`http://` or `https://`) become links to themselves.
//!
//! Passes 2-4 run as one leftmost-first scan over the escaped text, so a
//! span claimed by one pattern is never seen by another and anchors are
//! never nested. User and system messages only go through step 1.

pub mod escape;
pub mod linkify;
pub mod markup;

pub use escape::{escape_html, unescape_html};
pub use linkify::{linkify, render_plain};
pub use markup::{Link, LinkKind, Rendered, Segment};
