//! Noor Verse Provider Client
//!
//! HTTP client library for the public Quran and prayer-times providers.
//!
//! # Features
//!
//! - **Quran**: surah list, Uthmani text, translations, recitation audio, search
//! - **Prayer**: daily timings by coordinates or city, Qibla bearing
//! - **Resolver**: surah to ordered per-ayah recitation clips
//!
//! Every provider response is wrapped in a `{ code, status, data }` envelope;
//! any code other than 200 is reported as [`ClientError::Provider`]. Nothing
//! is retried.
//!
//! # Example
//!
//! ```ignore
//! use noor_api_client::{NoorClient, ProviderConfig};
//! use noor_core::Coordinates;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NoorClient::new(ProviderConfig::default())?;
//!
//!     let surahs = client.quran().list_surahs().await?;
//!     println!("{} surahs", surahs.len());
//!
//!     let qibla = client.prayer().qibla(Coordinates::new(22.5726, 88.3639)).await?;
//!     println!("Qibla at {}°", qibla.display_degrees());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod prayer;
mod quran;
mod resolver;
mod types;

// Re-export main types
pub use client::NoorClient;
pub use error::{ClientError, Result};
pub use types::{
    ProviderConfig, SearchMatch, SearchResults, SurahEdition, SurahRef, DEFAULT_PRAYER_URL,
    DEFAULT_QURAN_URL, DEFAULT_RECITATION_EDITION, DEFAULT_TEXT_EDITION,
};

// Re-export sub-clients for direct use if needed
pub use prayer::PrayerClient;
pub use quran::QuranClient;
pub use resolver::AudioSequenceResolver;
