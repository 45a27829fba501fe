//! Attacker and defender roll selections.
//!
//! `AttackerRoll` is the set of dice the attacker actually threw, `DieSlots`
//! is the three-picker selection a session edits one die at a time, and
//! `DefenderDice` is the number of dice the defender rolls.

use std::fmt;

use serde::Serialize;

use super::die::{DiceError, DieValue, FACE_COUNT};

/// Maximum number of dice the attacker may throw.
pub const MAX_ATTACKER_DICE: usize = 3;

/// Number of dice the defender rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefenderDice {
    One,
    Two,
}

impl DefenderDice {
    /// Both supported defender counts, smallest first.
    pub const ALL: [DefenderDice; 2] = [DefenderDice::One, DefenderDice::Two];

    /// Returns the die count as a number.
    pub const fn count(self) -> usize {
        match self {
            DefenderDice::One => 1,
            DefenderDice::Two => 2,
        }
    }

    /// Returns the number of equally likely defender rolls (6^n).
    pub const fn outcome_space(self) -> u32 {
        let faces = FACE_COUNT as u32;
        match self {
            DefenderDice::One => faces,
            DefenderDice::Two => faces * faces,
        }
    }

    /// Validates a raw defender count.
    pub fn new(count: u8) -> Result<DefenderDice, DiceError> {
        match count {
            1 => Ok(DefenderDice::One),
            2 => Ok(DefenderDice::Two),
            other => Err(DiceError::UnsupportedDefenderCount(other)),
        }
    }
}

impl TryFrom<u8> for DefenderDice {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DefenderDice::new(value)
    }
}

impl fmt::Display for DefenderDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// The dice an attacker committed to a single resolution, in throw order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct AttackerRoll {
    dice: Vec<DieValue>,
}

impl AttackerRoll {
    /// Builds a roll from validated faces. At most three dice are allowed.
    pub fn new(dice: Vec<DieValue>) -> Result<AttackerRoll, DiceError> {
        if dice.len() > MAX_ATTACKER_DICE {
            return Err(DiceError::TooManyAttackerDice(dice.len()));
        }
        Ok(AttackerRoll { dice })
    }

    /// Builds a roll from raw integers, validating each face.
    pub fn from_raw(values: &[u8]) -> Result<AttackerRoll, DiceError> {
        let dice = values
            .iter()
            .map(|&v| DieValue::new(v))
            .collect::<Result<Vec<_>, _>>()?;
        AttackerRoll::new(dice)
    }

    /// Number of dice thrown.
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// The dice in throw order.
    pub fn dice(&self) -> &[DieValue] {
        &self.dice
    }

    /// Returns the `n` highest dice, highest first. Shorter if fewer were thrown.
    pub fn top(&self, n: usize) -> Vec<DieValue> {
        let mut sorted = self.dice.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.truncate(n);
        sorted
    }

    /// True when enough dice were thrown to face `defenders`.
    pub fn can_face(&self, defenders: DefenderDice) -> bool {
        self.dice.len() >= defenders.count()
    }
}

impl fmt::Display for AttackerRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.dice.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// Three attacker die pickers. Slot 1 is always thrown; slots 2 and 3 may be
/// left unthrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DieSlots {
    slots: [Option<DieValue>; MAX_ATTACKER_DICE],
}

impl Default for DieSlots {
    /// A single thrown die showing 1.
    fn default() -> Self {
        DieSlots {
            slots: [Some(DieValue::MIN), None, None],
        }
    }
}

impl DieSlots {
    /// Builds a selection from up to three slots. The first slot must be thrown.
    pub fn from_slots(values: &[Option<DieValue>]) -> Result<DieSlots, DiceError> {
        if values.len() > MAX_ATTACKER_DICE {
            return Err(DiceError::TooManyAttackerDice(values.len()));
        }
        let mut slots = [None; MAX_ATTACKER_DICE];
        slots[..values.len()].copy_from_slice(values);
        if slots[0].is_none() {
            return Err(DiceError::FirstDieRequired);
        }
        Ok(DieSlots { slots })
    }

    /// Sets a 1-based slot. Clearing slot 1 is rejected.
    pub fn set(&mut self, slot: usize, value: Option<DieValue>) -> Result<(), DiceError> {
        if slot == 0 || slot > MAX_ATTACKER_DICE {
            return Err(DiceError::InvalidSlot(slot));
        }
        if slot == 1 && value.is_none() {
            return Err(DiceError::FirstDieRequired);
        }
        self.slots[slot - 1] = value;
        Ok(())
    }

    /// Returns the 1-based slot's value.
    pub fn get(&self, slot: usize) -> Option<DieValue> {
        slot.checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .copied()
            .flatten()
    }

    /// Collects the thrown dice into an attacker roll.
    pub fn thrown(&self) -> AttackerRoll {
        AttackerRoll {
            dice: self.slots.iter().flatten().copied().collect(),
        }
    }
}

impl fmt::Display for DieSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match slot {
                Some(d) => write!(f, "{}", d)?,
                None => write!(f, "-")?,
            }
        }
        Ok(())
    }
}
