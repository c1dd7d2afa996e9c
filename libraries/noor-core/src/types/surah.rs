/// Surah and ayah reference data
use super::ids::SurahId;
use serde::{Deserialize, Serialize};

/// Where a surah was revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevelationType {
    Meccan,
    Medinan,
}

impl RevelationType {
    pub fn as_str(self) -> &'static str {
        match self {
            RevelationType::Meccan => "Meccan",
            RevelationType::Medinan => "Medinan",
        }
    }
}

/// Surah metadata as published by the Quran provider
///
/// Immutable reference data. Field names follow the provider's JSON so the
/// type can be deserialized straight out of the `/surah` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
    /// Surah identifier (1-114)
    pub number: SurahId,

    /// Arabic name
    pub name: String,

    /// Transliterated name (e.g. "Al-Faatiha")
    pub english_name: String,

    /// Meaning of the name (e.g. "The Opening")
    pub english_name_translation: String,

    /// Meccan or Medinan
    pub revelation_type: RevelationType,

    /// Number of ayahs in the surah
    pub number_of_ayahs: u32,
}

impl Surah {
    /// Local, case-insensitive match used by the surah search box.
    ///
    /// `query` must already be lowercased and trimmed. Matches a substring of
    /// the English name or its translation, or the exact surah number.
    pub fn matches_query(&self, query: &str) -> bool {
        self.english_name.to_lowercase().contains(query)
            || self.english_name_translation.to_lowercase().contains(query)
            || self.number.to_string() == query
    }
}

/// A single ayah of text (Arabic or translated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    /// 1-based position within the surah
    pub number_in_surah: u32,

    /// Ayah text
    pub text: String,
}

/// Keep only the surahs whose numbers appear in `numbers`, preserving the
/// order of `surahs`.
pub fn filter_by_numbers(surahs: &[Surah], numbers: &[SurahId]) -> Vec<Surah> {
    surahs
        .iter()
        .filter(|s| numbers.contains(&s.number))
        .cloned()
        .collect()
}

/// Filter surahs with the local matcher.
///
/// An empty (or whitespace-only) query returns the full list.
pub fn filter_surahs(surahs: &[Surah], query: &str) -> Vec<Surah> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return surahs.to_vec();
    }
    surahs
        .iter()
        .filter(|s| s.matches_query(&query))
        .cloned()
        .collect()
}
