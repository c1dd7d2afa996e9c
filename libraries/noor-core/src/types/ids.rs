/// ID types for Noor Verse entities
use crate::error::{NoorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Surah identifier
///
/// Surahs are addressed 1-based, 1 through 114. The only way to obtain a
/// `SurahId` is through a validating constructor, so any value in hand is
/// addressable at the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SurahId(u16);

impl SurahId {
    /// First surah (Al-Fatihah)
    pub const FIRST: SurahId = SurahId(1);

    /// Last surah (An-Nas)
    pub const LAST: SurahId = SurahId(114);

    /// Number of surahs in the Quran
    pub const COUNT: u16 = 114;

    /// Create a new surah ID, rejecting numbers outside 1..=114
    pub fn new(number: u16) -> Result<Self> {
        if (1..=Self::COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(NoorError::InvalidSurah(i64::from(number)))
        }
    }

    /// Get the 1-based surah number
    pub fn get(self) -> u16 {
        self.0
    }

    /// Iterate over every surah ID in order
    pub fn all() -> impl Iterator<Item = SurahId> {
        (1..=Self::COUNT).map(SurahId)
    }
}

impl TryFrom<u16> for SurahId {
    type Error = NoorError;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SurahId> for u16 {
    fn from(id: SurahId) -> Self {
        id.0
    }
}

impl FromStr for SurahId {
    type Err = NoorError;

    fn from_str(s: &str) -> Result<Self> {
        let number: i64 = s
            .trim()
            .parse()
            .map_err(|_| NoorError::invalid_input(format!("not a surah number: {s:?}")))?;
        u16::try_from(number)
            .map_err(|_| NoorError::InvalidSurah(number))
            .and_then(Self::new)
    }
}

impl fmt::Display for SurahId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
