//! Inline-styled HTML for the reminder e-mail body. No external stylesheet.

use crate::recommendation::formatter::{ContentLayout, Subsection};
use crate::recommendation::parser::{ParsedRecommendation, Section};
use crate::recommendation::render::{escape_html, Renderer};
use crate::recommendation::titles::TitleSet;

const TEXT_STYLE: &str = "color: #333333; line-height: 1.6; font-size: 14px;";
const INTRO_STYLE: &str = "color: #333333; line-height: 1.6; margin-bottom: 24px; font-size: 14px;";
const BLOCK_STYLE: &str = "margin-bottom: 24px;";
const SECTION_HEADING_STYLE: &str =
    "font-size: 16px; font-weight: 600; color: #1B5E20; margin-bottom: 8px; text-transform: uppercase;";
const SUBSECTION_STYLE: &str = "margin-left: 16px; margin-bottom: 16px;";
const SUBSECTION_HEADING_STYLE: &str = "font-size: 14px; font-weight: 600; color: #333333;";
const LIST_STYLE: &str =
    "list-style-type: disc; margin-left: 24px; color: #333333; line-height: 1.6; margin-top: 4px; font-size: 14px;";
const PARAGRAPH_STYLE: &str = "color: #333333; line-height: 1.6; margin-top: 4px; font-size: 14px;";

#[derive(Debug, Clone, Copy)]
pub struct EmailHtmlRenderer {
    pub titles: TitleSet,
}

impl Default for EmailHtmlRenderer {
    fn default() -> Self {
        Self {
            titles: TitleSet::EMAIL,
        }
    }
}

impl EmailHtmlRenderer {
    pub fn new(titles: TitleSet) -> Self {
        Self { titles }
    }

    fn render_subsection(&self, subsection: &Subsection, html: &mut String) {
        let Some(layout) = subsection.layout() else {
            return;
        };

        html.push_str(&format!(r#"<div style="{SUBSECTION_STYLE}">"#));
        if !subsection.heading.is_empty() {
            html.push_str(&format!(
                r#"<h5 style="{SUBSECTION_HEADING_STYLE}">{}</h5>"#,
                escape_html(&subsection.heading)
            ));
        }
        match layout {
            ContentLayout::Bullets(items) => {
                html.push_str(&format!(r#"<ul style="{LIST_STYLE}">"#));
                for item in items {
                    html.push_str(&format!("<li>{}</li>", escape_html(item)));
                }
                html.push_str("</ul>");
            }
            ContentLayout::Paragraph(text) => {
                html.push_str(&format!(
                    r#"<p style="{PARAGRAPH_STYLE}">{}</p>"#,
                    escape_html(text)
                ));
            }
        }
        html.push_str("</div>");
    }

    fn render_section(&self, section: &Section, html: &mut String) {
        if !section.is_renderable() {
            return;
        }

        html.push_str(&format!(
            r#"<div style="{BLOCK_STYLE}"><h4 style="{SECTION_HEADING_STYLE}">{}</h4>"#,
            escape_html(self.titles.title(section.kind))
        ));
        for subsection in &section.subsections {
            self.render_subsection(subsection, html);
        }
        html.push_str("</div>");
    }
}

impl Renderer for EmailHtmlRenderer {
    type Output = String;

    fn render(&self, parsed: &ParsedRecommendation) -> String {
        if !parsed.has_guidance() {
            return format!(
                r#"<p style="{TEXT_STYLE}">{}</p>"#,
                escape_html(self.titles.placeholder)
            );
        }

        let mut html = format!(
            r#"<p style="{INTRO_STYLE}">{}</p>"#,
            escape_html(&parsed.intro_text)
        );

        for section in &parsed.sections {
            self.render_section(section, &mut html);
        }

        html.push_str(&format!(
            r#"<div style="{BLOCK_STYLE}"><h4 style="{SECTION_HEADING_STYLE}">{}</h4><p style="{TEXT_STYLE}">{}</p></div>"#,
            escape_html(self.titles.conclusion),
            escape_html(&parsed.conclusion_text)
        ));

        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::parser::{PlantContext, RecommendationParser};
    use crate::recommendation::patterns::RecommendationPatterns;

    fn parse(raw: Option<&str>) -> ParsedRecommendation {
        let parser = RecommendationParser::new(RecommendationPatterns::indonesian().unwrap());
        let ctx = PlantContext {
            plant_name: "Monty".to_string(),
            species: "Monstera".to_string(),
            location: "Bandung".to_string(),
            light: "sedang".to_string(),
            temperature: 24.5,
        };
        parser.parse(raw, &ctx)
    }

    const RAW: &str = "1. Jadwal:\nSiram pagi.\nFrekuensi: 2x seminggu.\n2. Jenis Pupuk:\nPupuk NPK seimbang.\n3. Pengabutan:\nWaktu: pagi hari.";

    #[test]
    fn test_empty_recommendation_renders_placeholder() {
        for raw in [None, Some(""), Some("   ")] {
            let html = EmailHtmlRenderer::default().render(&parse(raw));
            assert!(html.contains("Tidak ada panduan perawatan yang tersedia."));
            assert!(!html.contains("<h4"));
        }
    }

    #[test]
    fn test_sections_use_email_titles() {
        let html = EmailHtmlRenderer::default().render(&parse(Some(RAW)));
        assert!(html.contains("Jadwal Penyiraman dan Cara Menjaga Kelembapan Tanah"));
        assert!(html.contains("Frekuensi Pemupukan, Jenis Pupuk, dan Unsur Hara"));
        assert!(html.contains("Cara Menjaga Kelembapan Udara dan Tips Tambahan"));
        assert!(html.contains(">Kesimpulan</h4>"));
    }

    #[test]
    fn test_bullets_and_paragraphs() {
        let html = EmailHtmlRenderer::default().render(&parse(Some(RAW)));
        // Two lines -> list.
        assert!(html.contains("<li>Siram pagi.</li><li>Frekuensi: 2x seminggu.</li>"));
        // One line, no colon -> paragraph.
        assert!(html.contains(&format!(r#"<p style="{PARAGRAPH_STYLE}">Pupuk NPK seimbang.</p>"#)));
        // One line with a colon -> list.
        assert!(html.contains("<li>Waktu: pagi hari.</li>"));
    }

    #[test]
    fn test_conclusion_rendered_even_when_synthesized() {
        let html = EmailHtmlRenderer::default().render(&parse(Some(RAW)));
        assert!(html.ends_with(
            "Dengan perawatan yang tepat, tanaman Monty (Monstera) Anda akan tumbuh sehat dan subur.</p></div>"
        ));
    }

    #[test]
    fn test_section_without_subsections_is_omitted() {
        let raw = "1. Jadwal:\nSiram pagi.\n2. Pupuk tanpa judul.\n3. Udara tanpa judul.";
        let html = EmailHtmlRenderer::default().render(&parse(Some(raw)));
        assert!(html.contains("Jadwal Penyiraman dan Cara Menjaga Kelembapan Tanah"));
        assert!(!html.contains("Frekuensi Pemupukan"));
        assert!(!html.contains("Cara Menjaga Kelembapan Udara dan Tips Tambahan"));
    }

    #[test]
    fn test_ai_text_is_escaped() {
        let raw = "1. Catatan <penting>:\nGunakan pupuk <script>x</script> & air.";
        let html = EmailHtmlRenderer::default().render(&parse(Some(raw)));
        assert!(html.contains("Catatan &lt;penting&gt;"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt; &amp; air."));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_custom_title_set() {
        let html = EmailHtmlRenderer::new(TitleSet::CANONICAL).render(&parse(Some(RAW)));
        assert!(html.contains("Watering &amp; Soil Moisture"));
        assert!(html.contains(">Conclusion</h4>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let r = EmailHtmlRenderer::default();
        assert_eq!(r.render(&parse(Some(RAW))), r.render(&parse(Some(RAW))));
    }
}
