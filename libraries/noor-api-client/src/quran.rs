//! Quran provider operations: surah list, text, translations, audio, search.

use crate::client::{endpoint, get_data};
use crate::error::Result;
use crate::types::{AudioEdition, SearchResults, SurahEdition};
use noor_core::{Ayah, Surah, SurahId};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Quran provider client.
pub struct QuranClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    text_edition: &'a str,
    recitation_edition: &'a str,
}

impl<'a> QuranClient<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a Url,
        text_edition: &'a str,
        recitation_edition: &'a str,
    ) -> Self {
        Self {
            http,
            base_url,
            text_edition,
            recitation_edition,
        }
    }

    /// Get metadata for all 114 surahs.
    pub async fn list_surahs(&self) -> Result<Vec<Surah>> {
        let url = endpoint(self.base_url, &["surah"])?;
        let surahs: Vec<Surah> = get_data(self.http, url).await?;

        debug!(count = surahs.len(), "Fetched surah list");
        Ok(surahs)
    }

    /// Get the Arabic text of a surah.
    pub async fn surah_text(&self, surah: SurahId) -> Result<Vec<Ayah>> {
        self.edition(surah, self.text_edition).await
    }

    /// Get a translation of a surah.
    ///
    /// # Arguments
    /// * `surah` - Surah to translate
    /// * `language` - Provider edition code (e.g. "ur.jalandhry", "en.asad")
    pub async fn translation(&self, surah: SurahId, language: &str) -> Result<Vec<Ayah>> {
        self.edition(surah, language).await
    }

    /// Get the per-ayah recitation clip URLs of a surah, in ayah order.
    pub async fn surah_audio(&self, surah: SurahId) -> Result<Vec<String>> {
        let number = surah.to_string();
        let url = endpoint(self.base_url, &["surah", &number, self.recitation_edition])?;
        debug!(surah = %surah, edition = %self.recitation_edition, "Fetching surah audio");

        let edition: AudioEdition = get_data(self.http, url).await?;
        Ok(edition.ayahs.into_iter().map(|a| a.audio).collect())
    }

    /// Full-text search over the Arabic text.
    ///
    /// A search with no hits is reported by the provider as "not found"; that
    /// case returns empty results rather than an error.
    pub async fn search(&self, keyword: &str) -> Result<SearchResults> {
        let url = endpoint(self.base_url, &["search", keyword, "all", self.text_edition])?;
        debug!(keyword = %keyword, "Searching text");

        match get_data::<SearchResults>(self.http, url).await {
            Ok(results) => {
                debug!(count = results.matches.len(), "Search finished");
                Ok(results)
            }
            Err(e) if e.is_not_found() => Ok(SearchResults {
                count: 0,
                matches: Vec::new(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn edition(&self, surah: SurahId, edition: &str) -> Result<Vec<Ayah>> {
        let number = surah.to_string();
        let url = endpoint(self.base_url, &["surah", &number, edition])?;
        debug!(surah = %surah, edition = %edition, "Fetching surah edition");

        let data: SurahEdition = get_data(self.http, url).await?;
        Ok(data.ayahs)
    }
}
