//! Recommendation parser: turns a raw generative-model recommendation into an
//! intro, three positional sections and a conclusion.
//!
//! Pure and total: any input, including `None`, yields a renderable result.
//! The raw string stays the durable artifact; this runs on every read.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::recommendation::formatter::{split_into_subsections, Subsection};
use crate::recommendation::patterns::RecommendationPatterns;
use crate::recommendation::titles::{SectionKind, TitleSet, SECTION_COUNT};

/// Plant attributes used only to synthesize fallback intro/conclusion text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantContext {
    pub plant_name: String,
    pub species: String,
    pub location: String,
    pub light: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceStatus {
    Available,
    /// Raw text was absent or blank. Renderers show their placeholder.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Canonical title for this position.
    pub title: String,
    /// Segment text assigned to this position, after the 4th-into-3rd merge.
    pub raw_text: String,
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn is_renderable(&self) -> bool {
        self.subsections.iter().any(Subsection::is_renderable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecommendation {
    pub status: GuidanceStatus,
    pub intro_text: String,
    /// Exactly `SECTION_COUNT` entries when guidance is available, empty otherwise.
    pub sections: Vec<Section>,
    pub conclusion_text: String,
}

impl ParsedRecommendation {
    fn unavailable() -> Self {
        Self {
            status: GuidanceStatus::Unavailable,
            intro_text: String::new(),
            sections: Vec::new(),
            conclusion_text: String::new(),
        }
    }

    pub fn has_guidance(&self) -> bool {
        self.status == GuidanceStatus::Available
    }
}

/// Fills `{plant_name}`, `{species}`, `{location}`, `{light}`, `{temperature}`.
fn fill_template(template: &str, ctx: &PlantContext) -> String {
    template
        .replace("{plant_name}", &ctx.plant_name)
        .replace("{species}", &ctx.species)
        .replace("{location}", &ctx.location)
        .replace("{light}", &ctx.light)
        .replace("{temperature}", &ctx.temperature.to_string())
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationParser {
    patterns: RecommendationPatterns,
}

impl RecommendationParser {
    pub fn new(patterns: RecommendationPatterns) -> Self {
        Self { patterns }
    }

    pub fn parse(&self, raw: Option<&str>, ctx: &PlantContext) -> ParsedRecommendation {
        let raw = match raw.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return ParsedRecommendation::unavailable(),
        };

        let (intro_text, rest) = self.extract_intro(raw, ctx);
        let (conclusion_text, body) = self.extract_conclusion(&rest, ctx);
        let segments = self.segment(&body);

        let sections = SectionKind::ALL
            .iter()
            .map(|&kind| {
                let title = TitleSet::CANONICAL.title(kind);
                let raw_text = segments.get(kind.index()).cloned().unwrap_or_default();
                Section {
                    kind,
                    title: title.to_string(),
                    subsections: split_into_subsections(&raw_text, title),
                    raw_text,
                }
            })
            .collect();

        ParsedRecommendation {
            status: GuidanceStatus::Available,
            intro_text,
            sections,
            conclusion_text,
        }
    }

    fn extract_intro(&self, raw: &str, ctx: &PlantContext) -> (String, String) {
        match self.patterns.intro.find(raw) {
            Some(m) => {
                let sentence = m.as_str();
                let intro = sentence
                    .strip_prefix(self.patterns.intro_preamble.as_str())
                    .unwrap_or(sentence);
                let rest = raw[m.end()..].trim().to_string();
                (capitalize_first(intro), rest)
            }
            None => {
                debug!("Intro pattern not matched; synthesizing intro for {}", ctx.plant_name);
                (fill_template(&self.patterns.fallback_intro, ctx), raw.to_string())
            }
        }
    }

    fn extract_conclusion(&self, text: &str, ctx: &PlantContext) -> (String, String) {
        match self.patterns.conclusion.find(text) {
            Some(m) => {
                let conclusion = self
                    .patterns
                    .conclusion_rewrites
                    .iter()
                    .fold(m.as_str().to_string(), |acc, rewrite| {
                        acc.replace(
                            &rewrite.find,
                            &rewrite.replace.replace("{species}", &ctx.species),
                        )
                    });
                let remaining = format!("{}{}", &text[..m.start()], &text[m.end()..]);
                (conclusion, remaining.trim().to_string())
            }
            None => {
                debug!("Conclusion pattern not matched; synthesizing conclusion for {}", ctx.plant_name);
                (fill_template(&self.patterns.fallback_conclusion, ctx), text.to_string())
            }
        }
    }

    /// Splits on the ordinal delimiter, drops blank segments and folds the 4th
    /// segment into the 3rd. Anything past that is not returned.
    fn segment(&self, body: &str) -> Vec<String> {
        let mut segments: Vec<String> = self
            .patterns
            .ordinal_delimiter
            .split(body)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.len() > SECTION_COUNT {
            let fourth = segments.remove(SECTION_COUNT);
            let third = &mut segments[SECTION_COUNT - 1];
            third.push_str("\n\n");
            third.push_str(&fourth);
        }
        segments.truncate(SECTION_COUNT);
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL_RAW: &str = "Tentu, berikut adalah rekomendasi perawatan rinci untuk tanaman ini:\n1. Sirami 2x sehari.\n2. Pupuk NPK sebulan sekali.\n3. Jaga kelembapan udara.\nDengan perawatan yang tepat, tanaman mawar Anda akan tumbuh subur dan menghasilkan bunga yang indah di dalam ruangan.";

    const STRUCTURED_RAW: &str = "Tentu, berikut adalah rekomendasi perawatan rinci untuk tanaman Monstera Anda:

1. **Jadwal Penyiraman dan Cara Menjaga Kelembapan Tanah:**
**Frekuensi:**
* Siram 1-2 kali seminggu.
**Cara Menyiram:**
* Siram hingga air keluar dari lubang pot.
* Buang air yang tertampung di tatakan.

2. **Frekuensi Pemupukan, Jenis Pupuk, dan Unsur Hara:**
**Jenis Pupuk:**
Pupuk NPK seimbang.

3. **Cara Menjaga Kelembapan Udara:**
**Pengabutan:**
* Semprot daun setiap pagi.
* Letakkan nampan berisi kerikil dan air.

Dengan perawatan yang tepat, tanaman mawar Anda akan tumbuh subur dan menghasilkan bunga yang indah di dalam ruangan.";

    fn parser() -> RecommendationParser {
        RecommendationParser::new(RecommendationPatterns::indonesian().unwrap())
    }

    fn ctx() -> PlantContext {
        PlantContext {
            plant_name: "Monty".to_string(),
            species: "Monstera".to_string(),
            location: "Jakarta".to_string(),
            light: "terang tidak langsung".to_string(),
            temperature: 27.0,
        }
    }

    #[test]
    fn test_empty_inputs_yield_no_sections() {
        let p = parser();
        for raw in [None, Some(""), Some("   "), Some("\n\t ")] {
            let parsed = p.parse(raw, &ctx());
            assert!(parsed.sections.is_empty(), "input {raw:?}");
            assert_eq!(parsed.status, GuidanceStatus::Unavailable);
            assert!(!parsed.has_guidance());
        }
    }

    #[test]
    fn test_canonical_conclusion_rewritten_for_species() {
        let parsed = parser().parse(Some(CANONICAL_RAW), &ctx());
        let c = &parsed.conclusion_text;
        assert!(c.contains("tanaman Monstera Anda"), "{c}");
        assert!(c.contains("tumbuh sehat dan subur"), "{c}");
        assert!(!c.contains("mawar"));
        assert!(!c.contains("bunga yang indah di dalam ruangan"));
    }

    #[test]
    fn test_conclusion_with_internal_period_is_kept_whole() {
        let raw = "1. **A:**\na\n2. **B:**\nb\n3. **C:**\nc\nDengan perawatan yang tepat, tanaman mawar Anda (Rosa sp.) akan tumbuh subur dan menghasilkan bunga yang indah di dalam ruangan.";
        let parsed = parser().parse(Some(raw), &ctx());

        assert_eq!(
            parsed.conclusion_text,
            "Dengan perawatan yang tepat, tanaman Monstera Anda (Rosa sp.) akan tumbuh sehat dan subur."
        );
        for section in &parsed.sections {
            assert!(!section.raw_text.contains("bunga yang indah di dalam ruangan"));
            for sub in &section.subsections {
                assert!(sub.content.iter().all(|line| !line.contains("di dalam ruangan")));
            }
        }
        assert_eq!(parsed.sections[2].subsections.len(), 1);
        assert_eq!(parsed.sections[2].subsections[0].content, vec!["c".to_string()]);
    }

    #[test]
    fn test_canonical_intro_drops_preamble() {
        let parsed = parser().parse(Some(CANONICAL_RAW), &ctx());
        assert_eq!(
            parsed.intro_text,
            "Rekomendasi perawatan rinci untuk tanaman ini:"
        );
    }

    #[test]
    fn test_canonical_segments_assigned_by_position() {
        let parsed = parser().parse(Some(CANONICAL_RAW), &ctx());
        assert_eq!(parsed.sections.len(), 3);
        assert_eq!(parsed.sections[0].raw_text, "Sirami 2x sehari.");
        assert_eq!(parsed.sections[1].raw_text, "Pupuk NPK sebulan sekali.");
        assert_eq!(parsed.sections[2].raw_text, "Jaga kelembapan udara.");
        assert_eq!(parsed.sections[0].title, "Watering & Soil Moisture");
        assert_eq!(parsed.sections[2].kind, SectionKind::Humidity);
        // No sub-headings, so nothing renderable.
        assert!(parsed.sections.iter().all(|s| !s.is_renderable()));
    }

    #[test]
    fn test_fallback_intro_and_conclusion_use_context() {
        let raw = "1. Jadwal:\nSiram pagi.\n2. Pupuk:\nNPK.\n3. Udara:\nSemprot.";
        let parsed = parser().parse(Some(raw), &ctx());
        assert_eq!(
            parsed.intro_text,
            "Rekomendasi perawatan rinci untuk tanaman Monty (Monstera) Anda di Jakarta dengan kondisi cahaya terang tidak langsung dan suhu 27°C:"
        );
        assert_eq!(
            parsed.conclusion_text,
            "Dengan perawatan yang tepat, tanaman Monty (Monstera) Anda akan tumbuh sehat dan subur."
        );
        assert!(parsed.conclusion_text.contains("Monstera"));
    }

    #[test]
    fn test_context_does_not_change_parsed_sections() {
        let other = PlantContext {
            plant_name: "Lain".to_string(),
            species: "Ficus".to_string(),
            ..PlantContext::default()
        };
        let a = parser().parse(Some(STRUCTURED_RAW), &ctx());
        let b = parser().parse(Some(STRUCTURED_RAW), &other);
        assert_eq!(a.sections, b.sections);
        assert_eq!(a.intro_text, b.intro_text);
    }

    #[test]
    fn test_fourth_segment_merged_into_third() {
        let raw = "1. A:\na\n2. B:\nb\n3. C:\nc\n4. D:\nd";
        let parsed = parser().parse(Some(raw), &ctx());
        assert_eq!(parsed.sections.len(), 3);
        assert_eq!(parsed.sections[2].raw_text, "C:\nc\n\nD:\nd");
        let headings: Vec<_> = parsed.sections[2]
            .subsections
            .iter()
            .map(|s| s.heading.as_str())
            .collect();
        assert_eq!(headings, vec!["C", "D"]);
    }

    #[test]
    fn test_segments_past_fourth_are_dropped() {
        let raw = "1. A\n2. B\n3. C\n4. D\n5. E\n6. F";
        let parsed = parser().parse(Some(raw), &ctx());
        assert_eq!(parsed.sections.len(), 3);
        assert_eq!(parsed.sections[2].raw_text, "C\n\nD");
        assert!(parsed
            .sections
            .iter()
            .all(|s| !s.raw_text.contains('E') && !s.raw_text.contains('F')));
    }

    #[test]
    fn test_fewer_segments_leave_trailing_sections_empty() {
        let raw = "1. Jadwal:\nSiram pagi.";
        let parsed = parser().parse(Some(raw), &ctx());
        assert_eq!(parsed.sections.len(), 3);
        assert!(parsed.sections[0].is_renderable());
        assert!(parsed.sections[1].raw_text.is_empty());
        assert!(parsed.sections[2].subsections.is_empty());
    }

    #[test]
    fn test_text_without_ordinals_is_one_segment() {
        let parsed = parser().parse(Some("Siram saja secukupnya."), &ctx());
        assert_eq!(parsed.sections[0].raw_text, "Siram saja secukupnya.");
        assert!(parsed.sections[1].raw_text.is_empty());
    }

    #[test]
    fn test_structured_recommendation_subsections() {
        let parsed = parser().parse(Some(STRUCTURED_RAW), &ctx());
        let watering = &parsed.sections[0];
        assert_eq!(watering.subsections.len(), 2);
        assert_eq!(watering.subsections[0].heading, "Frekuensi");
        assert_eq!(
            watering.subsections[0].content,
            vec!["Siram 1-2 kali seminggu.".to_string()]
        );
        assert_eq!(watering.subsections[1].heading, "Cara Menyiram");
        assert_eq!(watering.subsections[1].content.len(), 2);

        let fertilizing = &parsed.sections[1];
        assert_eq!(fertilizing.subsections.len(), 1);
        assert_eq!(fertilizing.subsections[0].heading, "Jenis Pupuk");

        // "Cara Menjaga Kelembapan Udara:" is a title alias and is dropped.
        let humidity = &parsed.sections[2];
        assert_eq!(humidity.subsections.len(), 1);
        assert_eq!(humidity.subsections[0].heading, "Pengabutan");
        assert_eq!(humidity.subsections[0].content.len(), 2);
        assert!(!humidity.raw_text.contains("Dengan perawatan"));
    }

    #[test]
    fn test_inline_labels_before_first_heading_are_lost() {
        let raw = "1. **Jadwal Penyiraman dan Cara Menjaga Kelembapan Tanah:**\n* **Frekuensi:** Siram 1-2 kali seminggu.\n* **Cara:** Siram perlahan.";
        let parsed = parser().parse(Some(raw), &ctx());
        assert!(parsed.sections[0].subsections.is_empty());
        assert!(!parsed.sections[0].is_renderable());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let p = parser();
        for raw in [CANONICAL_RAW, STRUCTURED_RAW, "1. x", "garbage: ::: 1.2.3."] {
            assert_eq!(p.parse(Some(raw), &ctx()), p.parse(Some(raw), &ctx()));
        }
    }

    #[test]
    fn test_malformed_input_never_panics() {
        let p = parser();
        for raw in ["1. ", "1. 2. 3. 4. 5. ", ":", "**", "* \n* \n", "Dengan perawatan yang tepat,."] {
            let parsed = p.parse(Some(raw), &ctx());
            assert!(parsed.has_guidance());
            assert_eq!(parsed.sections.len(), 3);
        }
    }
}
