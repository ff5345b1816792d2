//! Section formatter: splits one section's text into headed subsections and
//! decides, per subsection, whether it reads as a bullet list or a paragraph.

use serde::{Deserialize, Serialize};

use crate::recommendation::titles::is_section_title;

/// A colon-terminated sub-label and the lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    pub heading: String,
    pub content: Vec<String>,
}

/// How a subsection's content is laid out. Both renderers take this from
/// `Subsection::layout` and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLayout<'a> {
    Bullets(&'a [String]),
    Paragraph(&'a str),
}

impl Subsection {
    /// `None` for a subsection with no content; it is never rendered.
    pub fn layout(&self) -> Option<ContentLayout<'_>> {
        match self.content.as_slice() {
            [] => None,
            [only] if !only.contains(':') => Some(ContentLayout::Paragraph(only)),
            lines => Some(ContentLayout::Bullets(lines)),
        }
    }

    pub fn is_renderable(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Removes `**` emphasis everywhere and a `* ` bullet marker at line start.
fn strip_markdown_line(line: &str) -> String {
    let line = line.replace("**", "");
    let trimmed = line.trim();
    trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("*\t"))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Splits a section's text into subsections.
///
/// A line ending in `:` opens a subsection unless it repeats `section_title`
/// or any registered section title, in which case the line is dropped.
/// Content lines seen before the first heading are discarded.
pub fn split_into_subsections(section_text: &str, section_title: &str) -> Vec<Subsection> {
    let mut subsections: Vec<Subsection> = Vec::new();

    let lines = section_text
        .split('\n')
        .map(strip_markdown_line)
        .filter(|line| !line.is_empty());

    for line in lines {
        if let Some(heading) = line.strip_suffix(':') {
            if heading == section_title || is_section_title(heading) {
                continue;
            }
            subsections.push(Subsection {
                heading: heading.to_string(),
                content: Vec::new(),
            });
        } else if let Some(current) = subsections.last_mut() {
            current.content.push(line);
        }
    }

    subsections
}
