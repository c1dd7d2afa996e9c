/// Ayah range addressing and validation
use crate::error::RangeError;
use serde::Serialize;
use std::fmt;

/// A validated, inclusive range of ayahs within one surah.
///
/// Ayahs are addressed 1-based. The only constructor is [`make_range`], so a
/// `PlaybackRange` always satisfies `1 <= start <= end <= ayah_count` for the
/// ayah count it was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlaybackRange {
    start: u32,
    end: u32,
}

impl PlaybackRange {
    /// First ayah of the range (1-based)
    pub fn start_ayah(&self) -> u32 {
        self.start
    }

    /// Last ayah of the range (1-based, inclusive)
    pub fn end_ayah(&self) -> u32 {
        self.end
    }

    /// Sequence index of the first ayah (0-based)
    pub fn start_index(&self) -> usize {
        ayah_to_index(self.start)
    }

    /// Sequence index of the last ayah (0-based, inclusive)
    pub fn end_index(&self) -> usize {
        ayah_to_index(self.end)
    }

    /// Number of ayahs covered
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Always false: a validated range covers at least one ayah
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the range covers the given 1-based ayah
    pub fn contains(&self, ayah: u32) -> bool {
        (self.start..=self.end).contains(&ayah)
    }

    /// 1-based ayah numbers in order
    pub fn ayahs(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for PlaybackRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Convert a 1-based ayah number to a 0-based sequence index.
///
/// # Panics
/// Panics in debug builds if `ayah` is 0.
pub fn ayah_to_index(ayah: u32) -> usize {
    debug_assert!(ayah >= 1, "ayah numbers are 1-based");
    (ayah - 1) as usize
}

/// Convert a 0-based sequence index to a 1-based ayah number.
pub fn index_to_ayah(index: usize) -> u32 {
    index as u32 + 1
}

/// Build a range for a surah with `ayah_count` ayahs from raw user input.
///
/// - Each bound is read as the integer at the start of its input, so
///   `"3.5"` is 3 and `"5abc"` is 5.
/// - A bound with no leading integer, or one that reads as 0, takes its
///   default: 1 for `start_input`, `ayah_count` for `end_input`.
/// - Start is floored to 1, end is ceiled to `ayah_count`.
/// - If the clamped start is after the clamped end, the call fails with
///   [`RangeError::Order`]. The bounds are never swapped.
pub fn make_range(
    start_input: &str,
    end_input: &str,
    ayah_count: u32,
) -> Result<PlaybackRange, RangeError> {
    if ayah_count == 0 {
        return Err(RangeError::EmptySurah);
    }

    let count = i64::from(ayah_count);
    let start = parse_bound(start_input).unwrap_or(1).max(1);
    let end = parse_bound(end_input).unwrap_or(count).min(count);

    if start > end {
        return Err(RangeError::Order {
            start: clamp_u32(start),
            end: clamp_u32(end),
        });
    }

    // 1 <= start <= end <= count <= u32::MAX here
    Ok(PlaybackRange {
        start: start as u32,
        end: end as u32,
    })
}

/// The whole surah as a range.
pub fn full_range(ayah_count: u32) -> Result<PlaybackRange, RangeError> {
    make_range("", "", ayah_count)
}

/// Leading integer of `input` (optional sign, then digits), ignoring
/// whatever follows. `None` when there are no digits or the value is 0.
fn parse_bound(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    match (seen, value) {
        (false, _) | (_, 0) => None,
        (_, v) if negative => Some(-v),
        (_, v) => Some(v),
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_cover_whole_surah() {
        let range = make_range("", "", 10).unwrap();
        assert_eq!(range.start_ayah(), 1);
        assert_eq!(range.end_ayah(), 10);
        assert_eq!(range.len(), 10);
    }

    #[test]
    fn test_unparseable_inputs_use_defaults() {
        let range = make_range("abc", "  ", 7).unwrap();
        assert_eq!((range.start_ayah(), range.end_ayah()), (1, 7));

        let range = make_range("x5", "-", 7).unwrap();
        assert_eq!((range.start_ayah(), range.end_ayah()), (1, 7));
    }

    #[test]
    fn test_leading_integer_is_kept() {
        let range = make_range("3.5", "5abc", 7).unwrap();
        assert_eq!((range.start_ayah(), range.end_ayah()), (3, 5));

        let range = make_range(" +2 ayahs", "4 ", 7).unwrap();
        assert_eq!((range.start_ayah(), range.end_ayah()), (2, 4));
    }

    #[test]
    fn test_zero_takes_the_default() {
        let range = make_range("", "0", 7).unwrap();
        assert_eq!((range.start_ayah(), range.end_ayah()), (1, 7));

        let range = make_range("00", "-0", 7).unwrap();
        assert_eq!((range.start_ayah(), range.end_ayah()), (1, 7));
    }

    #[test]
    fn test_huge_input_saturates() {
        let range = make_range("2", "99999999999999999999999", 286).unwrap();
        assert_eq!((range.start_ayah(), range.end_ayah()), (2, 286));
    }

    #[test]
    fn test_clamping() {
        let range = make_range("-4", "999", 286).unwrap();
        assert_eq!((range.start_ayah(), range.end_ayah()), (1, 286));

        let range = make_range("0", "5", 7).unwrap();
        assert_eq!(range.start_ayah(), 1);
    }

    #[test]
    fn test_reversed_bounds_are_rejected() {
        assert_eq!(
            make_range("5", "3", 10),
            Err(RangeError::Order { start: 5, end: 3 })
        );
    }

    #[test]
    fn test_start_beyond_count_is_rejected_after_clamping() {
        // end defaults to 7, start stays 9
        assert_eq!(
            make_range("9", "", 7),
            Err(RangeError::Order { start: 9, end: 7 })
        );
    }

    #[test]
    fn test_end_below_one_is_rejected() {
        assert_eq!(
            make_range("", "-2", 7),
            Err(RangeError::Order { start: 1, end: 0 })
        );
    }

    #[test]
    fn test_empty_surah() {
        assert_eq!(make_range("", "", 0), Err(RangeError::EmptySurah));
    }

    #[test]
    fn test_index_mapping() {
        let range = make_range("3", "5", 7).unwrap();
        assert_eq!(range.start_index(), 2);
        assert_eq!(range.end_index(), 4);
        assert_eq!(index_to_ayah(range.start_index()), 3);
        assert!(range.contains(4));
        assert!(!range.contains(6));
        assert_eq!(range.ayahs().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(range.to_string(), "3-5");
    }
}
