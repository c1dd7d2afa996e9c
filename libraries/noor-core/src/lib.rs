//! Noor Verse Core
//!
//! Platform-agnostic domain types, addressing rules and the presentation
//! interface shared by every Noor Verse crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Surah`, `Ayah`, `AudioSequence`, `PlaybackRange`, prayer and Qibla types
//! - **Addressing**: 1-based ayah numbers outside, 0-based sequence indices inside
//! - **Range Validation**: `make_range` turns raw user input into a `PlaybackRange`
//! - **Presentation**: the `Presenter` capability trait
//! - **Error Handling**: `NoorError`, `RangeError` and the `Result` alias
//!
//! # Example
//!
//! ```rust
//! use noor_core::{make_range, RangeError};
//!
//! // Empty inputs select the whole surah
//! let range = make_range("", "", 10).unwrap();
//! assert_eq!((range.start_ayah(), range.end_ayah()), (1, 10));
//! assert_eq!(range.start_index(), 0);
//!
//! // Reversed bounds are rejected, never swapped
//! assert_eq!(
//!     make_range("5", "3", 10),
//!     Err(RangeError::Order { start: 5, end: 3 })
//! );
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod presenter;
pub mod text;
pub mod types;

pub use error::{NoorError, RangeError, Result};
pub use presenter::{Field, Presenter, Region, Severity, TranslationCard, View};
pub use text::TextDirection;

pub use types::{
    // Quran
    Ayah, AudioSequence, RevelationType, Surah, SurahId,
    // Addressing
    make_range, full_range, ayah_to_index, index_to_ayah, PlaybackRange,
    // Prayer & Qibla
    Coordinates, LocationSource, OrientationReading, Prayer, PrayerTimes, PrayerTimings,
    QiblaDirection,
};
