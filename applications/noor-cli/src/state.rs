/// Application state owned by the controller
use noor_core::{
    AudioSequence, Coordinates, LocationSource, PrayerTimes, QiblaDirection, Surah, SurahId, View,
};

/// Everything the controller knows between user actions
#[derive(Debug)]
pub struct AppState {
    /// Surah list as last fetched (empty until loaded)
    pub surahs: Vec<Surah>,

    /// Surah open in the reader
    pub current: Option<CurrentSurah>,

    /// Screen on display
    pub view: View,

    /// Bumped by every open-surah action; late results from older actions
    /// are discarded
    pub view_generation: u64,

    /// Where prayer times and Qibla are computed for
    pub location: Option<LocationSource>,

    /// Qibla bearing for the coordinates it was fetched for
    pub qibla: Option<(Coordinates, QiblaDirection)>,

    /// Last prayer timings shown
    pub prayer_times: Option<PrayerTimes>,
}

/// Surah open in the reader and the state of its recitation audio
#[derive(Debug)]
pub struct CurrentSurah {
    pub surah: Surah,
    pub audio: AudioStatus,
}

#[derive(Debug)]
pub enum AudioStatus {
    /// Resolve in flight
    Pending,
    Ready(AudioSequence),
    /// Resolve failed; playback must not be attempted
    Unavailable(String),
}

impl AppState {
    pub fn new() -> Self {
        Self {
            surahs: Vec::new(),
            current: None,
            view: View::SurahList,
            view_generation: 0,
            location: None,
            qibla: None,
            prayer_times: None,
        }
    }

    /// Metadata for a surah from the cached list
    pub fn surah(&self, id: SurahId) -> Option<&Surah> {
        self.surahs.iter().find(|s| s.number == id)
    }

    /// Sequence usable for playing the current surah.
    ///
    /// `None` unless the sequence is ready and belongs to the surah on
    /// display.
    pub fn playable_sequence(&self) -> Option<&AudioSequence> {
        let current = self.current.as_ref()?;
        match &current.audio {
            AudioStatus::Ready(sequence) if sequence.surah() == current.surah.number => {
                Some(sequence)
            }
            _ => None,
        }
    }

    /// Coordinates from the recorded location, if it has any
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self.location.as_ref()? {
            LocationSource::Device(c) => Some(*c),
            LocationSource::Fallback { coordinates, .. } => Some(*coordinates),
            LocationSource::City { .. } => None,
        }
    }

    /// Cached Qibla bearing for `at`
    pub fn cached_qibla(&self, at: Coordinates) -> Option<QiblaDirection> {
        self.qibla
            .filter(|(cached_at, _)| *cached_at == at)
            .map(|(_, direction)| direction)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
