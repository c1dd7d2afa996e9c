/// Prayer timings, hijri date and location types
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The daily timings shown on the prayer screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// Every displayed timing in chronological order
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw timings as returned by the prayer provider.
///
/// Values may carry a timezone suffix, e.g. `"05:30 (+0530)"`; use
/// [`clean_time`] before display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrayerTimings {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl PrayerTimings {
    /// Raw value for one prayer
    pub fn get(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }

    /// `(prayer, cleaned time)` pairs in display order
    pub fn cleaned(&self) -> Vec<(Prayer, String)> {
        Prayer::ALL
            .iter()
            .map(|&p| (p, clean_time(self.get(p)).to_string()))
            .collect()
    }
}

/// Timings for one day plus the matching hijri date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub timings: PrayerTimings,
    /// Hijri date as formatted by the provider (e.g. "14-09-1445")
    pub hijri_date: String,
}

/// Strip the provider's timezone suffix: `"05:30 (+0530)"` becomes `"05:30"`.
pub fn clean_time(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or("")
}

/// The next timing after `now`, wrapping around to Fajr after Isha.
///
/// Timings that cannot be parsed as `HH:MM` are skipped.
pub fn next_prayer(timings: &PrayerTimings, now: NaiveTime) -> Prayer {
    Prayer::ALL
        .iter()
        .copied()
        .find(|&p| {
            NaiveTime::parse_from_str(clean_time(timings.get(p)), "%H:%M")
                .map(|t| now < t)
                .unwrap_or(false)
        })
        .unwrap_or(Prayer::Fajr)
}

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both values are finite and inside the valid degree ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// How the current location was obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationSource {
    /// Reported by the device (GPS or user-supplied coordinates)
    Device(Coordinates),
    /// Configured fallback used when no position is available
    Fallback { label: String, coordinates: Coordinates },
    /// Looked up by city name
    City { city: String, country: String },
}
