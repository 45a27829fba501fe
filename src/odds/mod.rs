//! Exact combat odds.
//!
//! Enumerates every defender roll against the attacker's best dice and
//! turns the bucket counts into percentages and expected unit losses.

pub mod enumerate;
pub mod expected;

pub use enumerate::{compute_odds, compute_odds_raw, compute_tally, Odds, Outcome, Tally};
pub use expected::ExpectedLoss;
