//! Audio sequence resolution

use crate::error::Result;
use crate::quran::QuranClient;
use noor_core::{AudioSequence, Surah, SurahId};
use tracing::{info, warn};

/// Resolves a surah to its ordered per-ayah recitation clips.
///
/// Every call fetches afresh; nothing is cached between surahs. A failed
/// resolve is an error the caller must treat as "audio unavailable" and must
/// not retry automatically.
pub struct AudioSequenceResolver<'a> {
    quran: QuranClient<'a>,
}

impl<'a> AudioSequenceResolver<'a> {
    pub(crate) fn new(quran: QuranClient<'a>) -> Self {
        Self { quran }
    }

    /// Resolve `surah` to an [`AudioSequence`].
    ///
    /// When `metadata` for the surah is known, the clip count is checked
    /// against its ayah count. A mismatch is logged and the sequence is
    /// returned as the provider sent it.
    pub async fn resolve(&self, surah: SurahId, metadata: Option<&Surah>) -> Result<AudioSequence> {
        let clips = self.quran.surah_audio(surah).await?;
        let sequence = AudioSequence::new(surah, clips);

        match metadata.filter(|m| m.number == surah) {
            Some(m) if m.number_of_ayahs as usize != sequence.len() => {
                warn!(
                    surah = %surah,
                    expected = m.number_of_ayahs,
                    actual = sequence.len(),
                    "Recitation clip count does not match ayah count"
                );
            }
            _ => {}
        }

        info!(surah = %surah, clips = sequence.len(), "Resolved recitation");
        Ok(sequence)
    }
}
