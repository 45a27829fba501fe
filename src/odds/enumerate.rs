//! Defender roll enumeration and outcome classification.
//!
//! Every ordered defender roll of `n` dice is visited exactly once by
//! reading its index as an `n`-digit base-6 number. Each roll is sorted
//! highest first and compared position by position against the attacker's
//! `n` highest dice. The attacker takes a position only with a strictly
//! higher die; ties go to the defender.

use std::ops::Range;

use serde::Serialize;

use crate::dice::{AttackerRoll, DefenderDice, DiceError, FACE_COUNT};

/// Defender dice never exceed two, so rolls fit in a fixed buffer.
const MAX_DEFENDER_DICE: usize = 2;

/// The result of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The attacker won every compared position.
    DefenderLosesAll,
    /// The defender held every compared position.
    AttackerLosesAll,
    /// Each side won at least one position (two defender dice only).
    EachLosesOne,
}

/// Exact bucket counts over the defender roll space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub defender_loses_all: u32,
    pub attacker_loses_all: u32,
    pub each_loses_one: u32,
    /// Number of rolls counted.
    pub total: u32,
}

impl Tally {
    /// Counts one classified roll.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::DefenderLosesAll => self.defender_loses_all += 1,
            Outcome::AttackerLosesAll => self.attacker_loses_all += 1,
            Outcome::EachLosesOne => self.each_loses_one += 1,
        }
        self.total += 1;
    }

    /// Combines counts from a disjoint part of the roll space.
    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            defender_loses_all: self.defender_loses_all + other.defender_loses_all,
            attacker_loses_all: self.attacker_loses_all + other.attacker_loses_all,
            each_loses_one: self.each_loses_one + other.each_loses_one,
            total: self.total + other.total,
        }
    }

    /// Converts the counts to rounded percentages.
    pub fn to_odds(&self, defenders: DefenderDice) -> Odds {
        Odds {
            defender_loses_all: percent(self.defender_loses_all, self.total),
            attacker_loses_all: percent(self.attacker_loses_all, self.total),
            each_loses_one: match defenders {
                DefenderDice::One => None,
                DefenderDice::Two => Some(percent(self.each_loses_one, self.total)),
            },
        }
    }
}

/// Outcome probabilities as percentages rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Odds {
    pub defender_loses_all: f64,
    pub attacker_loses_all: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub each_loses_one: Option<f64>,
}

impl Odds {
    /// Sum of all bucket percentages. 100 up to rounding.
    pub fn total(&self) -> f64 {
        self.defender_loses_all + self.attacker_loses_all + self.each_loses_one.unwrap_or(0.0)
    }
}

/// `round(count / total * 10000) / 100`, half away from zero.
fn percent(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10000.0).round() / 100.0
}

/// Writes the defender roll with the given index, highest die first.
fn decode_roll(index: u32, n: usize, roll: &mut [u8; MAX_DEFENDER_DICE]) {
    let faces = FACE_COUNT as u32;
    let mut rest = index;
    for die in roll[..n].iter_mut().rev() {
        *die = (rest % faces) as u8 + 1;
        rest /= faces;
    }
    roll[..n].sort_unstable_by(|a, b| b.cmp(a));
}

/// Classifies a sorted defender roll against the attacker's sorted top dice.
fn classify(attacker: &[u8], defender: &[u8]) -> Outcome {
    let won = attacker
        .iter()
        .zip(defender)
        .filter(|(a, d)| d < a)
        .count();
    if won == attacker.len() {
        Outcome::DefenderLosesAll
    } else if won == 0 {
        Outcome::AttackerLosesAll
    } else {
        Outcome::EachLosesOne
    }
}

/// Tallies the defender rolls whose indices fall in `indices`.
pub(crate) fn tally_indices(attacker: &[u8], indices: Range<u32>) -> Tally {
    let n = attacker.len();
    let mut roll = [0u8; MAX_DEFENDER_DICE];
    let mut tally = Tally::default();
    for index in indices {
        decode_roll(index, n, &mut roll);
        tally.record(classify(attacker, &roll[..n]));
    }
    tally
}

/// Counts every defender roll by outcome.
///
/// Returns `None` when the attacker threw fewer dice than the defender rolls.
pub fn compute_tally(attacker: &AttackerRoll, defenders: DefenderDice) -> Option<Tally> {
    if !attacker.can_face(defenders) {
        return None;
    }
    let top: Vec<u8> = attacker
        .top(defenders.count())
        .into_iter()
        .map(|d| d.get())
        .collect();
    Some(tally_indices(&top, 0..defenders.outcome_space()))
}

/// Computes the outcome distribution for one resolution.
///
/// Only the attacker's `n` highest dice take part, where `n` is the number of
/// defender dice. Returns `None` when the attacker has fewer than `n` dice.
pub fn compute_odds(attacker: &AttackerRoll, defenders: DefenderDice) -> Option<Odds> {
    let tally = compute_tally(attacker, defenders)?;
    let odds = tally.to_odds(defenders);
    tracing::trace!(attacker = %attacker, defenders = defenders.count(), ?odds, "computed odds");
    Some(odds)
}

/// Validates raw integers, then computes odds.
pub fn compute_odds_raw(attacker: &[u8], defenders: u8) -> Result<Option<Odds>, DiceError> {
    let defenders = DefenderDice::new(defenders)?;
    let attacker = AttackerRoll::from_raw(attacker)?;
    Ok(compute_odds(&attacker, defenders))
}
