//! Expected unit change derived from an outcome distribution.

use serde::Serialize;

use super::enumerate::Odds;
use crate::dice::DefenderDice;

/// Probability-weighted units each side loses in one resolution.
///
/// Both figures are zero or negative. With one defender die each bucket
/// costs the losing side one unit; with two, a full loss costs two units
/// and a split costs each side one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedLoss {
    pub attacker: f64,
    pub defender: f64,
}

impl ExpectedLoss {
    /// Derives expected losses from rounded percentages.
    pub fn from_odds(odds: &Odds, defenders: DefenderDice) -> ExpectedLoss {
        let split = odds.each_loses_one.unwrap_or(0.0);
        match defenders {
            DefenderDice::One => ExpectedLoss {
                attacker: loss(odds.attacker_loses_all),
                defender: loss(odds.defender_loses_all),
            },
            DefenderDice::Two => ExpectedLoss {
                attacker: loss(2.0 * odds.attacker_loses_all + split),
                defender: loss(2.0 * odds.defender_loses_all + split),
            },
        }
    }

    /// Defender's expected loss minus the attacker's. Negative favours the
    /// attacker.
    pub fn delta(&self) -> f64 {
        self.defender - self.attacker
    }

    /// Defender loss per attacker loss, rounded to two decimals, as in
    /// `1 : ratio`. `None` when the attacker is expected to lose nothing.
    pub fn loss_ratio(&self) -> Option<f64> {
        if self.attacker == 0.0 {
            return None;
        }
        Some((self.defender.abs() / self.attacker.abs() * 100.0).round() / 100.0)
    }
}

/// Percentage points of units lost, as a non-positive unit change.
fn loss(points: f64) -> f64 {
    if points == 0.0 {
        0.0
    } else {
        -points / 100.0
    }
}
