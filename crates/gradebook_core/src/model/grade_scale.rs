//! Fixed letter/numeric grade scale.
//!
//! # Responsibility
//! - Map numeric grades (`0..=100`) to one of eleven letter bands.
//! - Map letters back to the numeric max of their band.
//! - Provide the rounding used by every average in core.
//!
//! # Invariants
//! - Bands in [`GRADE_SCALE`] are contiguous, non-overlapping and cover
//!   `0..=100` exactly.
//! - `numeric_to_letter(letter_to_numeric_max(l)) == l` for every letter.
//! - Averages are computed in integer arithmetic.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const MIN_NUMERIC_GRADE: i64 = 0;
pub const MAX_NUMERIC_GRADE: i64 = 100;

/// Letter grade bands, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Returns the inclusive numeric band for this letter.
    pub fn band(self) -> LetterBand {
        // Variant order matches `GRADE_SCALE` order.
        GRADE_SCALE[self as usize]
    }
}

impl Display for LetterGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = GradeScaleError;

    /// Parses a letter after trimming and upper-casing (`" a "` -> `A`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        GRADE_SCALE
            .iter()
            .map(|band| band.letter)
            .find(|letter| letter.as_str() == normalized)
            .ok_or_else(|| GradeScaleError::UnknownLetter(value.to_string()))
    }
}

/// One letter and its inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterBand {
    pub letter: LetterGrade,
    pub min_value: u8,
    pub max_value: u8,
}

impl LetterBand {
    const fn new(letter: LetterGrade, min_value: u8, max_value: u8) -> Self {
        Self {
            letter,
            min_value,
            max_value,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        i64::from(self.min_value) <= value && value <= i64::from(self.max_value)
    }
}

pub const GRADE_SCALE: [LetterBand; 11] = [
    LetterBand::new(LetterGrade::APlus, 97, 100),
    LetterBand::new(LetterGrade::A, 93, 96),
    LetterBand::new(LetterGrade::AMinus, 90, 92),
    LetterBand::new(LetterGrade::BPlus, 87, 89),
    LetterBand::new(LetterGrade::B, 83, 86),
    LetterBand::new(LetterGrade::BMinus, 80, 82),
    LetterBand::new(LetterGrade::CPlus, 77, 79),
    LetterBand::new(LetterGrade::C, 73, 76),
    LetterBand::new(LetterGrade::CMinus, 70, 72),
    LetterBand::new(LetterGrade::D, 60, 69),
    LetterBand::new(LetterGrade::F, 0, 59),
];

/// Errors from grade scale conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeScaleError {
    /// Letter does not name any band (raw input kept for diagnostics).
    UnknownLetter(String),
    /// Numeric grade outside `0..=100`.
    OutOfRange(i64),
}

impl Display for GradeScaleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLetter(letter) => write!(f, "unknown letter grade: `{letter}`"),
            Self::OutOfRange(value) => write!(
                f,
                "numeric grade {value} must be between {MIN_NUMERIC_GRADE} and {MAX_NUMERIC_GRADE} (inclusive)"
            ),
        }
    }
}

impl Error for GradeScaleError {}

/// Converts a letter grade to the numeric max of its band.
///
/// Examples: `"A+"` -> 100, `"A"` -> 96, `"F"` -> 59.
pub fn letter_to_numeric_max(letter: &str) -> Result<u8, GradeScaleError> {
    let letter = letter.parse::<LetterGrade>()?;
    Ok(letter.band().max_value)
}

/// Converts a numeric grade in `0..=100` to its letter band.
pub fn numeric_to_letter(value: i64) -> Result<LetterGrade, GradeScaleError> {
    GRADE_SCALE
        .iter()
        .find(|band| band.contains(value))
        .map(|band| band.letter)
        .ok_or(GradeScaleError::OutOfRange(value))
}

/// Validates a numeric grade and narrows it to storage width.
pub fn checked_numeric(value: i64) -> Result<u8, GradeScaleError> {
    if !(MIN_NUMERIC_GRADE..=MAX_NUMERIC_GRADE).contains(&value) {
        return Err(GradeScaleError::OutOfRange(value));
    }
    u8::try_from(value).map_err(|_| GradeScaleError::OutOfRange(value))
}

/// Arithmetic mean rounded to the nearest integer, halves away from zero.
///
/// Returns `None` for an empty slice. `[80, 81]` -> `Some(81)`.
pub fn rounded_mean(values: &[u8]) -> Option<u8> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|value| i64::from(*value)).sum();
    let count = i64::try_from(values.len()).ok()?;
    u8::try_from(div_round_half_away_from_zero(sum, count)).ok()
}

/// Integer division rounding halves away from zero. `denominator` must be > 0.
fn div_round_half_away_from_zero(numerator: i64, denominator: i64) -> i64 {
    let twice = numerator.abs() * 2 + denominator;
    let magnitude = twice / (denominator * 2);
    if numerator < 0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::{div_round_half_away_from_zero, rounded_mean, LetterGrade, GRADE_SCALE};

    #[test]
    fn scale_is_ordered_and_contiguous() {
        assert_eq!(GRADE_SCALE[0].max_value, 100);
        assert_eq!(GRADE_SCALE[GRADE_SCALE.len() - 1].min_value, 0);
        for pair in GRADE_SCALE.windows(2) {
            assert_eq!(pair[1].max_value + 1, pair[0].min_value);
        }
    }

    #[test]
    fn band_lookup_matches_scale_position() {
        for band in GRADE_SCALE {
            assert_eq!(band.letter.band(), band);
        }
    }

    #[test]
    fn rounding_goes_away_from_zero_on_halves() {
        assert_eq!(div_round_half_away_from_zero(161, 2), 81);
        assert_eq!(div_round_half_away_from_zero(-161, 2), -81);
        assert_eq!(div_round_half_away_from_zero(160, 3), 53);
        assert_eq!(div_round_half_away_from_zero(0, 4), 0);
    }

    #[test]
    fn rounded_mean_handles_empty_and_single_values() {
        assert_eq!(rounded_mean(&[]), None);
        assert_eq!(rounded_mean(&[96]), Some(96));
        assert_eq!(rounded_mean(&[80, 81]), Some(81));
        assert_eq!(rounded_mean(&[80, 80, 81]), Some(80));
    }

    #[test]
    fn letter_parse_normalizes_case_and_whitespace() {
        assert_eq!(" b- ".parse::<LetterGrade>(), Ok(LetterGrade::BMinus));
        assert!("E".parse::<LetterGrade>().is_err());
        assert!("".parse::<LetterGrade>().is_err());
    }
}
