//! Render-ready tree for the plant detail page.

use serde::Serialize;

use crate::recommendation::formatter::ContentLayout;
use crate::recommendation::parser::ParsedRecommendation;
use crate::recommendation::render::Renderer;
use crate::recommendation::titles::TitleSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubsectionBody {
    Items(Vec<String>),
    Paragraph(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSubsection {
    pub heading: String,
    #[serde(flatten)]
    pub body: SubsectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSection {
    pub section_title: String,
    pub subsections: Vec<TreeSubsection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareTree {
    pub has_guidance: bool,
    /// Set only when `has_guidance` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub intro_text: String,
    pub sections: Vec<TreeSection>,
    pub conclusion_label: String,
    pub conclusion_text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct CareTreeRenderer {
    pub titles: TitleSet,
}

impl Default for CareTreeRenderer {
    fn default() -> Self {
        Self {
            titles: TitleSet::UI,
        }
    }
}

impl CareTreeRenderer {
    pub fn new(titles: TitleSet) -> Self {
        Self { titles }
    }
}

impl Renderer for CareTreeRenderer {
    type Output = CareTree;

    fn render(&self, parsed: &ParsedRecommendation) -> CareTree {
        if !parsed.has_guidance() {
            return CareTree {
                has_guidance: false,
                placeholder: Some(self.titles.placeholder.to_string()),
                intro_text: String::new(),
                sections: Vec::new(),
                conclusion_label: self.titles.conclusion.to_string(),
                conclusion_text: String::new(),
            };
        }

        let sections = parsed
            .sections
            .iter()
            .filter_map(|section| {
                let subsections: Vec<TreeSubsection> = section
                    .subsections
                    .iter()
                    .filter_map(|sub| {
                        let body = match sub.layout()? {
                            ContentLayout::Bullets(items) => SubsectionBody::Items(items.to_vec()),
                            ContentLayout::Paragraph(text) => {
                                SubsectionBody::Paragraph(text.to_string())
                            }
                        };
                        Some(TreeSubsection {
                            heading: sub.heading.clone(),
                            body,
                        })
                    })
                    .collect();

                if subsections.is_empty() {
                    return None;
                }
                Some(TreeSection {
                    section_title: self.titles.title(section.kind).to_string(),
                    subsections,
                })
            })
            .collect();

        CareTree {
            has_guidance: true,
            placeholder: None,
            intro_text: parsed.intro_text.clone(),
            sections,
            conclusion_label: self.titles.conclusion.to_string(),
            conclusion_text: parsed.conclusion_text.clone(),
        }
    }
}
