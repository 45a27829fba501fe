//! Dice values and roll selections.
//!
//! Contains the validated die face type, the attacker's committed roll,
//! and the defender die count, together with the validation errors they
//! share.

pub mod die;
pub mod roll;

pub use die::{DiceError, DieValue, ALL_FACES, FACE_COUNT};
pub use roll::{AttackerRoll, DefenderDice, DieSlots, MAX_ATTACKER_DICE};
