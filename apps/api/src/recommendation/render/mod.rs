//! Renderers consuming a `ParsedRecommendation`.
//!
//! Both targets share the bullet-vs-paragraph decision (`Subsection::layout`)
//! and label sections by position through their `TitleSet`.

pub mod email;
pub mod tree;

use crate::recommendation::parser::ParsedRecommendation;

pub use email::EmailHtmlRenderer;
pub use tree::{CareTree, CareTreeRenderer};

pub trait Renderer {
    type Output;

    fn render(&self, parsed: &ParsedRecommendation) -> Self::Output;
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
