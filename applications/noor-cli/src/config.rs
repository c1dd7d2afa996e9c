/// Application configuration
use crate::error::{CliError, Result};
use noor_api_client::{
    ProviderConfig, DEFAULT_PRAYER_URL, DEFAULT_QURAN_URL, DEFAULT_RECITATION_EDITION,
    DEFAULT_TEXT_EDITION,
};
use noor_core::Coordinates;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "noor.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NoorConfig {
    #[serde(default = "default_providers")]
    pub providers: ProviderSettings,

    #[serde(default = "default_prayer")]
    pub prayer: PrayerSettings,

    #[serde(default = "default_translation")]
    pub translation: TranslationSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    #[serde(default = "default_quran_url")]
    pub quran_url: String,

    #[serde(default = "default_prayer_url")]
    pub prayer_url: String,

    #[serde(default = "default_recitation_edition")]
    pub recitation_edition: String,

    #[serde(default = "default_text_edition")]
    pub text_edition: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrayerSettings {
    /// Calculation method id understood by the prayer provider
    #[serde(default = "default_method")]
    pub method: u8,

    /// Country used for city lookups when none is given
    #[serde(default = "default_country")]
    pub country: String,

    /// Location used when no coordinates are available
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    #[serde(default = "default_longitude")]
    pub default_longitude: f64,

    #[serde(default = "default_location_label")]
    pub default_label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationSettings {
    #[serde(default = "default_language")]
    pub default_language: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// How long the simulated device pretends each clip lasts
    #[serde(default = "default_simulated_clip_ms")]
    pub simulated_clip_ms: u64,
}

impl Default for NoorConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            prayer: default_prayer(),
            translation: default_translation(),
            playback: default_playback(),
        }
    }
}

impl NoorConfig {
    /// Load configuration from file and environment
    ///
    /// Sources, lowest precedence first: built-in defaults, the config file
    /// (`path`, or `noor.toml` in the working directory if present), then
    /// `NOOR_` environment variables with `__` between section and key
    /// (e.g. `NOOR_PRAYER__METHOD=2`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            // An explicit path must exist
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with NOOR_)
        settings = settings.add_source(
            config::Environment::with_prefix("NOOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("providers.quran_url", &self.providers.quran_url),
            ("providers.prayer_url", &self.providers.prayer_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CliError::Config(format!(
                    "{name} must start with http:// or https:// (got {url:?})"
                )));
            }
        }

        if self.providers.timeout_secs == 0 {
            return Err(CliError::Config(
                "providers.timeout_secs must be greater than 0".to_string(),
            ));
        }

        // Provider methods are 0-23, 99 is "custom"
        if self.prayer.method > 23 && self.prayer.method != 99 {
            return Err(CliError::Config(format!(
                "prayer.method {} is not a known calculation method",
                self.prayer.method
            )));
        }

        if !self.default_location().is_valid() {
            return Err(CliError::Config(format!(
                "prayer default location {} is not a valid coordinate",
                self.default_location()
            )));
        }

        if self.translation.default_language.trim().is_empty() {
            return Err(CliError::Config(
                "translation.default_language cannot be empty".to_string(),
            ));
        }

        if self.playback.simulated_clip_ms == 0 {
            return Err(CliError::Config(
                "playback.simulated_clip_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Provider client settings
    pub fn provider_config(&self) -> ProviderConfig {
        let mut config = ProviderConfig::new(&self.providers.quran_url, &self.providers.prayer_url)
            .with_timeout(Duration::from_secs(self.providers.timeout_secs));
        config.recitation_edition = self.providers.recitation_edition.clone();
        config.text_edition = self.providers.text_edition.clone();
        config
    }

    /// Fallback location for prayer times and Qibla
    pub fn default_location(&self) -> Coordinates {
        Coordinates::new(self.prayer.default_latitude, self.prayer.default_longitude)
    }

    /// Clip length of the simulated device
    pub fn simulated_clip(&self) -> Duration {
        Duration::from_millis(self.playback.simulated_clip_ms)
    }
}

// Default values
fn default_providers() -> ProviderSettings {
    ProviderSettings {
        quran_url: default_quran_url(),
        prayer_url: default_prayer_url(),
        recitation_edition: default_recitation_edition(),
        text_edition: default_text_edition(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_quran_url() -> String {
    DEFAULT_QURAN_URL.to_string()
}

fn default_prayer_url() -> String {
    DEFAULT_PRAYER_URL.to_string()
}

fn default_recitation_edition() -> String {
    DEFAULT_RECITATION_EDITION.to_string()
}

fn default_text_edition() -> String {
    DEFAULT_TEXT_EDITION.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_prayer() -> PrayerSettings {
    PrayerSettings {
        method: default_method(),
        country: default_country(),
        default_latitude: default_latitude(),
        default_longitude: default_longitude(),
        default_label: default_location_label(),
    }
}

fn default_method() -> u8 {
    1
}

fn default_country() -> String {
    "India".to_string()
}

fn default_latitude() -> f64 {
    22.5726
}

fn default_longitude() -> f64 {
    88.3639
}

fn default_location_label() -> String {
    "Kolkata".to_string()
}

fn default_translation() -> TranslationSettings {
    TranslationSettings {
        default_language: default_language(),
    }
}

fn default_language() -> String {
    "ur.jalandhry".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        simulated_clip_ms: default_simulated_clip_ms(),
    }
}

fn default_simulated_clip_ms() -> u64 {
    1500
}
