/// Core error types for Noor Verse
use thiserror::Error;

/// Result type alias using `NoorError`
pub type Result<T> = std::result::Result<T, NoorError>;

/// Core error type for Noor Verse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoorError {
    /// Surah number outside 1..=114
    #[error("Surah number out of range: {0} (expected 1-114)")]
    InvalidSurah(i64),

    /// Ayah range could not be built
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NoorError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Errors produced by [`make_range`](crate::make_range).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Start ayah is after end ayah once both are clamped
    #[error("Start ayah {start} cannot be greater than end ayah {end}")]
    Order { start: u32, end: u32 },

    /// The surah has no ayahs to address
    #[error("Surah has no ayahs")]
    EmptySurah,
}
