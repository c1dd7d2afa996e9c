/// Core domain types for Noor Verse
pub mod audio;
pub mod ids;
pub mod prayer;
pub mod qibla;
pub mod range;
pub mod surah;

pub use audio::AudioSequence;
pub use ids::SurahId;
pub use prayer::{
    clean_time, next_prayer, Coordinates, LocationSource, Prayer, PrayerTimes, PrayerTimings,
};
pub use qibla::{OrientationReading, QiblaDirection};
pub use range::{ayah_to_index, full_range, index_to_ayah, make_range, PlaybackRange};
pub use surah::{filter_by_numbers, filter_surahs, Ayah, RevelationType, Surah};
