//! Section titles per render target.
//!
//! Position is the only identity a section has: index 0 is always watering,
//! 1 fertilizing, 2 air humidity. Each target labels those three slots with
//! its own wording.

use serde::{Deserialize, Serialize};

/// Number of displayed sections. Fixed product decision.
pub const SECTION_COUNT: usize = 3;

/// The three fixed thematic slots, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Watering,
    Fertilizing,
    Humidity,
}

impl SectionKind {
    pub const ALL: [SectionKind; SECTION_COUNT] = [
        SectionKind::Watering,
        SectionKind::Fertilizing,
        SectionKind::Humidity,
    ];

    pub fn index(self) -> usize {
        match self {
            SectionKind::Watering => 0,
            SectionKind::Fertilizing => 1,
            SectionKind::Humidity => 2,
        }
    }
}

/// Labels a render target uses for the three sections and the closing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleSet {
    pub sections: [&'static str; SECTION_COUNT],
    pub conclusion: &'static str,
    /// Shown instead of the whole guide when there is no recommendation.
    pub placeholder: &'static str,
}

impl TitleSet {
    /// Language-neutral labels. Used as the `title` on parsed sections.
    pub const CANONICAL: TitleSet = TitleSet {
        sections: [
            "Watering & Soil Moisture",
            "Fertilizing & Nutrients",
            "Air Humidity & Additional Tips",
        ],
        conclusion: "Conclusion",
        placeholder: "No care guidance available yet.",
    };

    /// Reminder e-mail wording.
    pub const EMAIL: TitleSet = TitleSet {
        sections: [
            "Jadwal Penyiraman dan Cara Menjaga Kelembapan Tanah",
            "Frekuensi Pemupukan, Jenis Pupuk, dan Unsur Hara",
            "Cara Menjaga Kelembapan Udara dan Tips Tambahan",
        ],
        conclusion: "Kesimpulan",
        placeholder: "Tidak ada panduan perawatan yang tersedia.",
    };

    /// Plant detail page wording.
    pub const UI: TitleSet = TitleSet {
        sections: [
            "Penyiraman & Kelembapan Tanah",
            "Pemupukan & Nutrisi",
            "Kelembapan Udara & Tips Tambahan",
        ],
        conclusion: "Kesimpulan",
        placeholder: "Belum ada panduan perawatan.",
    };

    pub fn title(&self, kind: SectionKind) -> &'static str {
        self.sections[kind.index()]
    }
}

/// Every registered title set. Headings equal to any of these titles are
/// redundant regardless of which target ends up rendering the guide.
pub const ALL_TITLE_SETS: [TitleSet; 3] = [TitleSet::CANONICAL, TitleSet::EMAIL, TitleSet::UI];

/// Short forms the model writes as sub-headings in place of a full title.
pub const TITLE_ALIASES: &[&str] = &["Cara Menjaga Kelembapan Udara"];

/// True when `heading` just repeats a section title.
pub fn is_section_title(heading: &str) -> bool {
    ALL_TITLE_SETS
        .iter()
        .flat_map(|set| set.sections.iter())
        .chain(TITLE_ALIASES.iter())
        .any(|&title| title == heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_index_matches_position() {
        for (i, kind) in SectionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_targets_label_same_slot_differently() {
        assert_eq!(
            TitleSet::EMAIL.title(SectionKind::Watering),
            "Jadwal Penyiraman dan Cara Menjaga Kelembapan Tanah"
        );
        assert_eq!(
            TitleSet::UI.title(SectionKind::Watering),
            "Penyiraman & Kelembapan Tanah"
        );
    }

    #[test]
    fn test_is_section_title_covers_all_targets() {
        assert!(is_section_title("Watering & Soil Moisture"));
        assert!(is_section_title("Frekuensi Pemupukan, Jenis Pupuk, dan Unsur Hara"));
        assert!(is_section_title("Kelembapan Udara & Tips Tambahan"));
        assert!(is_section_title("Cara Menjaga Kelembapan Udara"));
    }

    #[test]
    fn test_is_section_title_is_case_sensitive() {
        assert!(!is_section_title("watering & soil moisture"));
        assert!(!is_section_title("Frekuensi Penyiraman"));
    }
}
