//! battle-odds library.
//!
//! Exposes the dice types, the exact odds engine, the text protocol, and the
//! sweep table generator for use by integration tests and the binaries.

pub mod dice;
pub mod engine;
pub mod odds;
pub mod protocol;
pub mod sweep;
