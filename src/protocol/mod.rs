//! Text protocol handling.
//!
//! Parses line-oriented session commands and formats scenario reports as
//! either a single text line or a JSON object.

pub mod parser;
pub mod report;

pub use parser::{parse_command, Command};
pub use report::{OutputFormat, ScenarioReport};
