/// Plain-text presenter for the terminal
use noor_core::{
    Field, Prayer, Presenter, Region, Severity, Surah, SurahId, TextDirection, TranslationCard,
    View,
};
use std::fmt;
use std::io::Write;
use tracing::{debug, warn};

/// Right-to-left mark, prefixed to RTL lines so terminals that honour bidi
/// controls align them correctly
const RLM: char = '\u{200F}';

/// Writes everything the controller shows to `out`, one line per item
pub struct TerminalPresenter<W: Write> {
    out: W,
    errors: usize,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, errors: 0 }
    }

    /// Number of error messages shown so far
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{args}") {
            warn!(error = %e, "Failed to write output");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_view(&mut self, view: View) {
        debug!(view = ?view, "View");
    }

    fn show_loading(&mut self, region: Region, message: &str) {
        debug!(region = ?region, "{message}");
    }

    fn show_message(&mut self, region: Region, severity: Severity, message: &str) {
        match severity {
            Severity::Info => self.line(format_args!("{message}")),
            Severity::Error => {
                self.errors += 1;
                debug!(region = ?region, "Error shown");
                self.line(format_args!("error: {message}"));
            }
        }
    }

    fn set_field(&mut self, field: Field, value: &str) {
        if value.is_empty() {
            return;
        }
        let label = match field {
            Field::SurahTitle => "Surah",
            Field::AyahLimit => "Ayahs",
            Field::Location => "Location",
            Field::HijriDate => "Hijri date",
            Field::QiblaDegrees => "Qibla",
            Field::QiblaNeedle => "Needle",
            Field::NowPlaying => "Now playing",
        };
        self.line(format_args!("{label}: {value}"));
    }

    fn render_surah_list(&mut self, surahs: &[Surah]) {
        for s in surahs {
            self.line(format_args!(
                "{:>3}. {:<18} {:<28} {:>3} ayahs  {:<7}  {}",
                s.number.get(),
                s.english_name,
                s.english_name_translation,
                s.number_of_ayahs,
                s.revelation_type.as_str(),
                s.name
            ));
        }
    }

    fn render_mushaf(&mut self, _surah: SurahId, ayahs: &[(u32, String)]) {
        for (number, text) in ayahs {
            self.line(format_args!("{RLM}{text} \u{FD3F}{number}\u{FD3E}"));
        }
    }

    fn render_translation(&mut self, cards: &[TranslationCard], direction: TextDirection) {
        let mark = if direction.is_rtl() {
            RLM.to_string()
        } else {
            String::new()
        };
        for card in cards {
            self.line(format_args!("[{}] {RLM}{}", card.ayah, card.arabic));
            self.line(format_args!("    {mark}{}", card.translation));
        }
    }

    fn render_prayer_times(&mut self, timings: &[(Prayer, String)], next: Prayer) {
        for (prayer, time) in timings {
            let marker = if *prayer == next { "  <- next" } else { "" };
            self.line(format_args!("{:<8} {time}{marker}", prayer.name()));
        }
    }
}
