//! Pattern table: the regexes and sentence templates that give structure to
//! free-text care recommendations.
//!
//! Control flow in `parser` never embeds a literal; swapping the generative
//! model's phrasing means building a different `RecommendationPatterns`.

use anyhow::{Context, Result};
use regex::Regex;

/// Leading boilerplate sentence, ending in a colon.
pub const INTRO_PATTERN: &str = r"^Tentu, berikut adalah rekomendasi perawatan[^:\n]*:";

/// Preamble removed from a matched intro before it is displayed.
pub const INTRO_PREAMBLE: &str = "Tentu, berikut adalah ";

/// Closing sentence, searched in the text left after the intro is removed.
/// Runs to the last period on its line so abbreviations inside it stay attached.
pub const CONCLUSION_PATTERN: &str = r"Dengan perawatan yang tepat,[^\n]*\.";

/// Ordinal list marker ("1. ", "2. ", ...) separating the per-section segments.
pub const ORDINAL_DELIMITER: &str = r"\d+\.\s";

/// Used when the intro pattern does not match.
pub const FALLBACK_INTRO_TEMPLATE: &str = "Rekomendasi perawatan rinci untuk tanaman {plant_name} ({species}) Anda di {location} dengan kondisi cahaya {light} dan suhu {temperature}°C:";

/// Used when the conclusion pattern does not match.
pub const FALLBACK_CONCLUSION_TEMPLATE: &str =
    "Dengan perawatan yang tepat, tanaman {plant_name} ({species}) Anda akan tumbuh sehat dan subur.";

/// A literal substitution applied to a matched conclusion.
/// `replace` may carry `{species}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConclusionRewrite {
    pub find: String,
    pub replace: String,
}

impl ConclusionRewrite {
    pub fn new(find: &str, replace: &str) -> Self {
        Self {
            find: find.to_string(),
            replace: replace.to_string(),
        }
    }
}

/// The sample-species clauses the model copies from its few-shot example.
fn default_rewrites() -> Vec<ConclusionRewrite> {
    vec![
        ConclusionRewrite::new("tanaman mawar Anda", "tanaman {species} Anda"),
        ConclusionRewrite::new(
            "tumbuh subur dan menghasilkan bunga yang indah di dalam ruangan",
            "tumbuh sehat dan subur",
        ),
    ]
}

/// Compiled pattern set consumed by `RecommendationParser`.
#[derive(Debug, Clone)]
pub struct RecommendationPatterns {
    pub intro: Regex,
    pub intro_preamble: String,
    pub conclusion: Regex,
    pub ordinal_delimiter: Regex,
    pub conclusion_rewrites: Vec<ConclusionRewrite>,
    pub fallback_intro: String,
    pub fallback_conclusion: String,
}

impl RecommendationPatterns {
    /// The Indonesian pattern set matching the care prompt in `prompts`.
    pub fn indonesian() -> Result<Self> {
        Ok(Self {
            intro: Regex::new(INTRO_PATTERN).context("failed to compile intro pattern")?,
            intro_preamble: INTRO_PREAMBLE.to_string(),
            conclusion: Regex::new(CONCLUSION_PATTERN)
                .context("failed to compile conclusion pattern")?,
            ordinal_delimiter: Regex::new(ORDINAL_DELIMITER)
                .context("failed to compile ordinal delimiter")?,
            conclusion_rewrites: default_rewrites(),
            fallback_intro: FALLBACK_INTRO_TEMPLATE.to_string(),
            fallback_conclusion: FALLBACK_CONCLUSION_TEMPLATE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesian_patterns_compile() {
        assert!(RecommendationPatterns::indonesian().is_ok());
    }

    #[test]
    fn test_intro_pattern_only_matches_at_start() {
        let p = RecommendationPatterns::indonesian().unwrap();
        assert!(p
            .intro
            .is_match("Tentu, berikut adalah rekomendasi perawatan rinci untuk tanaman ini:\n1. A"));
        assert!(!p
            .intro
            .is_match("Halo. Tentu, berikut adalah rekomendasi perawatan untuk tanaman ini:"));
    }

    #[test]
    fn test_intro_pattern_stops_at_first_colon() {
        let p = RecommendationPatterns::indonesian().unwrap();
        let m = p
            .intro
            .find("Tentu, berikut adalah rekomendasi perawatan Anda: 1. Jadwal: pagi")
            .unwrap();
        assert_eq!(m.as_str(), "Tentu, berikut adalah rekomendasi perawatan Anda:");
    }

    #[test]
    fn test_conclusion_pattern_stays_on_its_line() {
        let p = RecommendationPatterns::indonesian().unwrap();
        let m = p
            .conclusion
            .find("x\nDengan perawatan yang tepat, tanaman Anda (Rosa sp.) akan subur.\nSelamat berkebun.")
            .unwrap();
        assert_eq!(
            m.as_str(),
            "Dengan perawatan yang tepat, tanaman Anda (Rosa sp.) akan subur."
        );
    }

    #[test]
    fn test_ordinal_delimiter_requires_trailing_whitespace() {
        let p = RecommendationPatterns::indonesian().unwrap();
        assert!(p.ordinal_delimiter.is_match("1. Siram"));
        assert!(p.ordinal_delimiter.is_match("12.\tSiram"));
        assert!(!p.ordinal_delimiter.is_match("suhu 25.5 derajat"));
    }
}
