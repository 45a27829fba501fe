//! Die faces.
//!
//! A `DieValue` is a single face of a six-sided die. Construction is the
//! only place a raw integer is checked, so every value past this point is
//! known to lie in 1..=6.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Number of faces on a die.
pub const FACE_COUNT: u8 = 6;

/// Errors raised while validating dice input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiceError {
    #[error("die value {0} is outside 1..=6")]
    InvalidDieValue(u8),

    #[error("defender rolls 1 or 2 dice, got {0}")]
    UnsupportedDefenderCount(u8),

    #[error("attacker rolls at most 3 dice, got {0}")]
    TooManyAttackerDice(usize),

    #[error("attacker slot {0} does not exist (expected 1..=3)")]
    InvalidSlot(usize),

    #[error("the first attacker die is always thrown")]
    FirstDieRequired,
}

/// A single rolled die face in 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DieValue(u8);

/// Every face, lowest first.
pub const ALL_FACES: [DieValue; 6] = [
    DieValue(1),
    DieValue(2),
    DieValue(3),
    DieValue(4),
    DieValue(5),
    DieValue(6),
];

impl DieValue {
    pub const MIN: DieValue = DieValue(1);
    pub const MAX: DieValue = DieValue(FACE_COUNT);

    /// Validates a raw face value.
    pub fn new(value: u8) -> Result<DieValue, DiceError> {
        if (1..=FACE_COUNT).contains(&value) {
            Ok(DieValue(value))
        } else {
            Err(DiceError::InvalidDieValue(value))
        }
    }

    /// Returns the face as a plain integer.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Parses a face from protocol text such as `"4"`.
    pub fn parse(s: &str) -> Option<DieValue> {
        s.parse::<u8>().ok().and_then(|v| DieValue::new(v).ok())
    }
}

impl TryFrom<u8> for DieValue {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DieValue::new(value)
    }
}

impl fmt::Display for DieValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_face() {
        for v in 1..=6 {
            assert_eq!(DieValue::new(v).unwrap().get(), v);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(DieValue::new(0), Err(DiceError::InvalidDieValue(0)));
        assert_eq!(DieValue::new(7), Err(DiceError::InvalidDieValue(7)));
    }

    #[test]
    fn parse_from_text() {
        assert_eq!(DieValue::parse("4"), Some(DieValue(4)));
        assert_eq!(DieValue::parse("9"), None);
        assert_eq!(DieValue::parse("x"), None);
        assert_eq!(DieValue::parse("-1"), None);
    }

    #[test]
    fn all_faces_are_ordered() {
        assert!(ALL_FACES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ALL_FACES.len(), FACE_COUNT as usize);
    }
}
