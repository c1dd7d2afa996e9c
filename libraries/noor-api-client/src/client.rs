//! Main provider client.

use crate::error::{ClientError, Result};
use crate::prayer::PrayerClient;
use crate::quran::QuranClient;
use crate::resolver::AudioSequenceResolver;
use crate::types::{Envelope, ProviderConfig};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the Quran and prayer-times providers.
///
/// Owns one HTTP connection pool shared by the borrowed sub-clients.
///
/// # Example
///
/// ```ignore
/// use noor_api_client::{NoorClient, ProviderConfig};
/// use noor_core::SurahId;
///
/// let client = NoorClient::new(ProviderConfig::default())?;
///
/// let surahs = client.quran().list_surahs().await?;
/// println!("{} surahs", surahs.len());
///
/// let sequence = client.resolver().resolve(SurahId::new(112)?, surahs.get(111)).await?;
/// println!("{} clips", sequence.len());
/// ```
pub struct NoorClient {
    http: Client,
    quran_url: Url,
    prayer_url: Url,
    config: ProviderConfig,
}

impl NoorClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let quran_url = parse_base_url(&config.quran_url)?;
        let prayer_url = parse_base_url(&config.prayer_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("NoorVerse/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            quran_url,
            prayer_url,
            config,
        })
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Quran provider operations.
    pub fn quran(&self) -> QuranClient<'_> {
        QuranClient::new(
            &self.http,
            &self.quran_url,
            &self.config.text_edition,
            &self.config.recitation_edition,
        )
    }

    /// Prayer-times provider operations.
    pub fn prayer(&self) -> PrayerClient<'_> {
        PrayerClient::new(&self.http, &self.prayer_url)
    }

    /// Audio sequence resolution on top of the Quran provider.
    pub fn resolver(&self) -> AudioSequenceResolver<'_> {
        AudioSequenceResolver::new(self.quran())
    }
}

/// Validate a provider base URL: non-empty, http(s), no trailing slash.
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))
}

/// Append path segments to a base URL.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(format!("{base} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET `url` and unwrap the provider envelope into `T`.
///
/// Any envelope code other than 200 becomes [`ClientError::Provider`], even
/// when the HTTP status itself is a success.
pub(crate) async fn get_data<T: DeserializeOwned>(http: &Client, url: Url) -> Result<T> {
    debug!(url = %url, "Provider request");

    let response = http.get(url.clone()).send().await?;
    let status = response.status();
    let body = response.text().await?;

    let envelope: Envelope = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(ClientError::Provider {
                code: status.as_u16(),
                status: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Err(e) => {
            return Err(ClientError::Parse(format!(
                "Failed to parse envelope from {}: {}",
                url.path(),
                e
            )));
        }
    };

    if envelope.code != 200 {
        debug!(url = %url, code = envelope.code, status = %envelope.status, "Provider refused request");
        return Err(ClientError::Provider {
            code: envelope.code,
            status: envelope.status,
        });
    }

    serde_json::from_value(envelope.data).map_err(|e| {
        ClientError::Parse(format!("Unexpected payload from {}: {}", url.path(), e))
    })
}
