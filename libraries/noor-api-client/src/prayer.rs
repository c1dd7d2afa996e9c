//! Prayer-times provider operations.

use crate::client::{endpoint, get_data};
use crate::error::Result;
use crate::types::{QiblaData, TimingsData};
use noor_core::{Coordinates, PrayerTimes, QiblaDirection};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Prayer-times provider client.
pub struct PrayerClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

impl<'a> PrayerClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    /// Get the day's timings for a position.
    ///
    /// # Arguments
    /// * `at` - Position
    /// * `timestamp` - Unix timestamp selecting the day
    /// * `method` - Calculation method id
    pub async fn timings_by_coords(
        &self,
        at: Coordinates,
        timestamp: i64,
        method: u8,
    ) -> Result<PrayerTimes> {
        let mut url = endpoint(self.base_url, &["timings", &timestamp.to_string()])?;
        url.query_pairs_mut()
            .append_pair("latitude", &at.latitude.to_string())
            .append_pair("longitude", &at.longitude.to_string())
            .append_pair("method", &method.to_string());
        debug!(location = %at, timestamp, "Fetching timings by coordinates");

        let data: TimingsData = get_data(self.http, url).await?;
        Ok(data.into())
    }

    /// Get today's timings for a city.
    pub async fn timings_by_city(
        &self,
        city: &str,
        country: &str,
        method: u8,
    ) -> Result<PrayerTimes> {
        let mut url = endpoint(self.base_url, &["timingsByCity"])?;
        url.query_pairs_mut()
            .append_pair("city", city)
            .append_pair("country", country)
            .append_pair("method", &method.to_string());
        debug!(city = %city, country = %country, "Fetching timings by city");

        let data: TimingsData = get_data(self.http, url).await?;
        Ok(data.into())
    }

    /// Get the Qibla bearing for a position, in degrees from true north.
    pub async fn qibla(&self, at: Coordinates) -> Result<QiblaDirection> {
        let url = endpoint(
            self.base_url,
            &["qibla", &at.latitude.to_string(), &at.longitude.to_string()],
        )?;
        debug!(location = %at, "Fetching Qibla direction");

        let data: QiblaData = get_data(self.http, url).await?;
        Ok(QiblaDirection(data.direction))
    }
}
