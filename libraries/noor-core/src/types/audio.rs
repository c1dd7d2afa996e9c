/// Per-ayah recitation audio
use super::ids::SurahId;
use super::range::{index_to_ayah, PlaybackRange};
use serde::{Deserialize, Serialize};

/// Ordered clip locators for one surah, one per ayah.
///
/// Index `i` holds the clip for ayah `i + 1`. The sequence is tagged with the
/// surah it belongs to so a session can never play another surah's audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSequence {
    surah: SurahId,
    clips: Vec<String>,
}

impl AudioSequence {
    /// Create a sequence for `surah` from clip URIs in ayah order
    pub fn new(surah: SurahId, clips: Vec<String>) -> Self {
        Self { surah, clips }
    }

    /// Surah this sequence belongs to
    pub fn surah(&self) -> SurahId {
        self.surah
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clip at a 0-based index
    pub fn clip(&self, index: usize) -> Option<&str> {
        self.clips.get(index).map(String::as_str)
    }

    /// Clip for a 1-based ayah number
    pub fn clip_for_ayah(&self, ayah: u32) -> Option<&str> {
        if ayah == 0 {
            return None;
        }
        self.clip((ayah - 1) as usize)
    }

    /// Whether every ayah of `range` has a clip in this sequence
    pub fn covers(&self, range: &PlaybackRange) -> bool {
        range.end_index() < self.clips.len()
    }

    /// Iterate `(ayah_number, clip)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.clips
            .iter()
            .enumerate()
            .map(|(i, clip)| (index_to_ayah(i), clip.as_str()))
    }

    /// All clips, in ayah order
    pub fn clips(&self) -> &[String] {
        &self.clips
    }
}
