//! Error types for playback scheduling

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The playback device rejected a source or a play request
    #[error("Playback device error: {0}")]
    Device(String),

    /// Sequence holds no clips
    #[error("Audio sequence is empty")]
    EmptySequence,

    /// Range reaches past the end of the sequence
    #[error("Ayah {end} is outside the audio sequence ({len} clips)")]
    RangeOutOfBounds { end: u32, len: usize },
}

impl PlaybackError {
    /// Create a device error
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
