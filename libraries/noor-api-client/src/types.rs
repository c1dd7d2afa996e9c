//! Types for provider requests and responses.

use noor_core::{Ayah, PrayerTimes, PrayerTimings, SurahId};
use serde::Deserialize;
use std::time::Duration;

/// Public Quran provider (surah list, text, translations, audio, search)
pub const DEFAULT_QURAN_URL: &str = "https://api.alquran.cloud/v1";

/// Public prayer-times provider (timings, Qibla)
pub const DEFAULT_PRAYER_URL: &str = "https://api.aladhan.com/v1";

/// Edition with per-ayah recitation audio (Mishary Alafasy)
pub const DEFAULT_RECITATION_EDITION: &str = "ar.alafasy";

/// Edition with the Uthmani Arabic text
pub const DEFAULT_TEXT_EDITION: &str = "quran-uthmani";

/// Configuration for connecting to the providers.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the Quran provider (e.g., "https://api.alquran.cloud/v1")
    pub quran_url: String,
    /// Base URL of the prayer-times provider
    pub prayer_url: String,
    /// Edition requested for recitation audio
    pub recitation_edition: String,
    /// Edition requested for Arabic text and search
    pub text_edition: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Create a config for the given base URLs with default editions.
    pub fn new(quran_url: impl Into<String>, prayer_url: impl Into<String>) -> Self {
        Self {
            quran_url: quran_url.into(),
            prayer_url: prayer_url.into(),
            recitation_edition: DEFAULT_RECITATION_EDITION.to_string(),
            text_edition: DEFAULT_TEXT_EDITION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_QURAN_URL, DEFAULT_PRAYER_URL)
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// Wrapper around every provider response: `{ code, status, data }`.
///
/// `data` is kept as raw JSON because error responses carry a message string
/// there instead of the payload.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub code: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

// =============================================================================
// Quran Types
// =============================================================================

/// One edition of a surah (`/surah/{n}/{edition}`).
#[derive(Debug, Deserialize)]
pub struct SurahEdition {
    pub ayahs: Vec<Ayah>,
}

/// Recitation edition of a surah (`/surah/{n}/ar.alafasy`).
#[derive(Debug, Deserialize)]
pub(crate) struct AudioEdition {
    pub ayahs: Vec<AudioAyah>,
}

/// One ayah of a recitation edition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AudioAyah {
    pub audio: String,
}

/// Full-text search results (`/search/{keyword}/all/{edition}`).
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub count: usize,
    pub matches: Vec<SearchMatch>,
}

impl SearchResults {
    /// Matched surah numbers, deduplicated, in first-seen order.
    pub fn surah_numbers(&self) -> Vec<SurahId> {
        let mut numbers = Vec::new();
        for m in &self.matches {
            if !numbers.contains(&m.surah.number) {
                numbers.push(m.surah.number);
            }
        }
        numbers
    }
}

/// A single ayah matching a search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    #[serde(default)]
    pub number_in_surah: u32,
    #[serde(default)]
    pub text: String,
    pub surah: SurahRef,
}

/// Surah reference inside a search match.
#[derive(Debug, Deserialize)]
pub struct SurahRef {
    pub number: SurahId,
}

// =============================================================================
// Prayer Types
// =============================================================================

/// Payload of the timings endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct TimingsData {
    pub timings: PrayerTimings,
    pub date: DateInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DateInfo {
    pub hijri: HijriDate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HijriDate {
    pub date: String,
}

impl From<TimingsData> for PrayerTimes {
    fn from(data: TimingsData) -> Self {
        PrayerTimes {
            timings: data.timings,
            hijri_date: data.date.hijri.date,
        }
    }
}

/// Payload of the Qibla endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct QiblaData {
    pub direction: f64,
}
