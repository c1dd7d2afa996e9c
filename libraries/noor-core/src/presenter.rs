//! Presentation capability interface
//!
//! The application core never touches widgets directly. Everything it shows
//! goes through a [`Presenter`], which a terminal, web or native front end
//! implements.

use crate::text::TextDirection;
use crate::types::{Prayer, Surah, SurahId};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    SurahList,
    Reader,
    Prayer,
    Qibla,
}

/// Display regions that can hold a loading placeholder or an inline message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    SurahList,
    Mushaf,
    Translation,
    Playback,
    Prayer,
    Qibla,
}

/// Single-value fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Title of the surah open in the reader
    SurahTitle,
    /// Highest ayah number accepted by the range inputs
    AyahLimit,
    /// Description of where prayer times are computed for
    Location,
    HijriDate,
    QiblaDegrees,
    /// Needle rotation relative to the current heading
    QiblaNeedle,
    /// Ayah currently being recited, empty when idle
    NowPlaying,
}

/// How an inline message should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// One ayah of a translation with its Arabic original
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCard {
    pub ayah: u32,
    pub arabic: String,
    pub translation: String,
}

/// Typed capability interface exposed by the presentation layer
pub trait Presenter {
    /// Switch to a top-level screen
    fn show_view(&mut self, view: View);

    /// Replace a region's content with a loading placeholder
    fn show_loading(&mut self, region: Region, message: &str);

    /// Replace a region's content with an inline message
    fn show_message(&mut self, region: Region, severity: Severity, message: &str);

    /// Set a single-value field
    fn set_field(&mut self, field: Field, value: &str);

    fn render_surah_list(&mut self, surahs: &[Surah]);

    /// Render a surah's Arabic text as `(ayah number, display text)` pairs
    fn render_mushaf(&mut self, surah: SurahId, ayahs: &[(u32, String)]);

    fn render_translation(&mut self, cards: &[TranslationCard], direction: TextDirection);

    /// Render cleaned timings and highlight the upcoming one
    fn render_prayer_times(&mut self, timings: &[(Prayer, String)], next: Prayer);
}
