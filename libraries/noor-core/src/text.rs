//! Text helpers for Quranic display: Bismillah handling, script detection
//! and reading direction.

use crate::types::{Ayah, SurahId};

/// The opening phrase providers prepend to the first ayah of most surahs.
pub const BISMILLAH: &str = "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ";

/// Translation editions rendered right-to-left.
const RTL_EDITIONS: &[&str] = &["ur.jalandhry", "ar"];

/// Reading direction for a block of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    /// Direction for a translation edition code such as `en.asad`
    pub fn for_edition(edition: &str) -> Self {
        if RTL_EDITIONS.contains(&edition) {
            TextDirection::RightToLeft
        } else {
            TextDirection::LeftToRight
        }
    }

    pub fn is_rtl(self) -> bool {
        self == TextDirection::RightToLeft
    }
}

/// Ayah text prepared for display.
///
/// The provider embeds the Bismillah in ayah 1 of every surah. It is a
/// separate verse only in Al-Fatihah (1) and absent from At-Tawbah (9), so it
/// is stripped from ayah 1 everywhere else.
pub fn display_text(surah: SurahId, ayah: &Ayah) -> String {
    if ayah.number_in_surah == 1 && surah.get() != 1 && surah.get() != 9 {
        ayah.text.replacen(BISMILLAH, "", 1).trim().to_string()
    } else {
        ayah.text.clone()
    }
}

/// Whether the string contains any character from the Arabic block
/// (U+0600..=U+06FF).
pub fn contains_arabic(s: &str) -> bool {
    s.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Whether a search query should go to the provider's full-text search
/// instead of the local name filter: Arabic script and longer than two
/// characters.
pub fn wants_remote_search(query: &str) -> bool {
    contains_arabic(query) && query.chars().count() > 2
}
