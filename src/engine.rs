//! Session state management.
//!
//! Holds the attacker's die selection and the session options, and answers
//! protocol commands by writing to the supplied output stream. Odds are
//! recomputed from the current selection on every request.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::dice::{AttackerRoll, DefenderDice, DiceError, DieSlots, DieValue};
use crate::protocol::report::{OutputFormat, ScenarioReport};

/// Name of the option selecting the report format.
const FORMAT_OPTION: &str = "Format";

/// Holds the mutable state of a session between commands.
pub struct Engine {
    pub slots: DieSlots,
    pub format: OutputFormat,
    pub options: HashMap<String, String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a session with a single attacker die showing 1.
    pub fn new() -> Self {
        Engine {
            slots: DieSlots::default(),
            format: OutputFormat::default(),
            options: HashMap::new(),
        }
    }

    /// Restores the initial selection. Options are kept.
    pub fn reset(&mut self) {
        self.slots = DieSlots::default();
    }

    /// Replaces the whole attacker selection.
    pub fn set_attack(&mut self, slots: &[Option<DieValue>]) -> Result<(), DiceError> {
        self.slots = DieSlots::from_slots(slots)?;
        Ok(())
    }

    /// Changes a single 1-based attacker slot.
    pub fn set_die(&mut self, slot: usize, value: Option<DieValue>) -> Result<(), DiceError> {
        self.slots.set(slot, value)
    }

    /// Sets a session option. `Format` switches the report format; other
    /// names are stored as-is.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let value = value.unwrap_or_default();
        if name.eq_ignore_ascii_case(FORMAT_OPTION) {
            match value.parse::<OutputFormat>() {
                Ok(format) => self.format = format,
                Err(e) => tracing::warn!("setoption {}: {}", name, e),
            }
        }
        self.options.insert(name, value);
    }

    /// The dice currently thrown.
    pub fn attacker(&self) -> AttackerRoll {
        self.slots.thrown()
    }

    /// Builds reports for one defender count, or for every count the current
    /// selection can face.
    pub fn reports(&self, defenders: Option<DefenderDice>) -> Vec<ScenarioReport> {
        let attacker = self.attacker();
        match defenders {
            Some(d) => ScenarioReport::new(&attacker, d).into_iter().collect(),
            None => DefenderDice::ALL
                .iter()
                .filter_map(|&d| ScenarioReport::new(&attacker, d))
                .collect(),
        }
    }

    /// Handles the `hello` handshake: writes id, options, and `hellook`.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name {}", env!("CARGO_PKG_NAME"))?;
        writeln!(out, "id version {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(
            out,
            "option name {} type combo default text var text var json",
            FORMAT_OPTION
        )?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `show` command.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "attacker {}", self.slots)?;
        out.flush()
    }

    /// Handles the `odds` command. A defender count that was asked for by
    /// name but cannot be faced is reported as unavailable; otherwise
    /// uncomputable scenarios are left out.
    pub fn handle_odds<W: Write>(
        &self,
        out: &mut W,
        defenders: Option<DefenderDice>,
    ) -> io::Result<()> {
        let reports = self.reports(defenders);
        if let (Some(d), true) = (defenders, reports.is_empty()) {
            tracing::debug!(attacker = %self.slots, defenders = d.count(), "odds unavailable");
            writeln!(out, "odds defenders {} unavailable", d)?;
        }
        for report in &reports {
            writeln!(out, "{}", report.render(self.format)?)?;
        }
        writeln!(out, "oddsok")?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn die(v: u8) -> DieValue {
        DieValue::new(v).unwrap()
    }

    fn output_of<F>(f: F) -> Vec<String>
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn new_engine_starts_with_single_one() {
        let engine = Engine::new();
        assert_eq!(engine.attacker(), AttackerRoll::from_raw(&[1]).unwrap());
        assert_eq!(engine.format, OutputFormat::Text);
        assert!(engine.options.is_empty());
    }

    #[test]
    fn reset_restores_selection_but_keeps_options() {
        let mut engine = Engine::new();
        engine.set_attack(&[Some(die(6)), Some(die(5))]).unwrap();
        engine.set_option("Format".to_string(), Some("json".to_string()));
        engine.reset();
        assert_eq!(engine.slots, DieSlots::default());
        assert_eq!(engine.format, OutputFormat::Json);
    }

    #[test]
    fn invalid_attack_leaves_selection_untouched() {
        let mut engine = Engine::new();
        engine.set_attack(&[Some(die(4))]).unwrap();
        assert_eq!(
            engine.set_attack(&[None, Some(die(2))]),
            Err(DiceError::FirstDieRequired)
        );
        assert_eq!(
            engine.set_attack(&[Some(die(1)), None, None, Some(die(2))]),
            Err(DiceError::TooManyAttackerDice(4))
        );
        assert_eq!(engine.set_die(5, Some(die(2))), Err(DiceError::InvalidSlot(5)));
        assert_eq!(engine.attacker(), AttackerRoll::from_raw(&[4]).unwrap());
    }

    #[test]
    fn set_option_stores_value_and_ignores_bad_format() {
        let mut engine = Engine::new();
        engine.set_option("Format".to_string(), Some("xml".to_string()));
        assert_eq!(engine.format, OutputFormat::Text);
        engine.set_option("Colour".to_string(), None);
        assert_eq!(engine.options.get("Colour"), Some(&String::new()));
    }

    #[test]
    fn reports_skip_uncomputable_scenarios() {
        let mut engine = Engine::new();
        assert_eq!(engine.reports(None).len(), 1);
        engine.set_die(3, Some(die(2))).unwrap();
        let reports = engine.reports(None);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].defenders, 2);
    }

    #[test]
    fn handle_hello_outputs_handshake() {
        let engine = Engine::new();
        let lines = output_of(|out| engine.handle_hello(out));
        assert_eq!(lines.first().map(String::as_str), Some("id name battle-odds"));
        assert!(lines.iter().any(|l| l.starts_with("option name Format")));
        assert_eq!(lines.last().map(String::as_str), Some("hellook"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        assert_eq!(output_of(|out| engine.handle_isready(out)), vec!["readyok"]);
    }

    #[test]
    fn handle_show_prints_slots() {
        let mut engine = Engine::new();
        engine.set_attack(&[Some(die(6)), None, Some(die(3))]).unwrap();
        assert_eq!(
            output_of(|out| engine.handle_show(out)),
            vec!["attacker 6 - 3"]
        );
    }

    #[test]
    fn handle_odds_reports_unavailable_when_named() {
        let engine = Engine::new();
        let lines = output_of(|out| engine.handle_odds(out, Some(DefenderDice::Two)));
        assert_eq!(lines, vec!["odds defenders 2 unavailable", "oddsok"]);
    }

    #[test]
    fn handle_odds_defaults_to_every_computable_count() {
        let mut engine = Engine::new();
        engine.set_attack(&[Some(die(6)), Some(die(6))]).unwrap();
        let lines = output_of(|out| engine.handle_odds(out, None));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("odds defenders 1 "));
        assert!(lines[1].starts_with("odds defenders 2 defender_loses_all 69.44"));
        assert_eq!(lines[2], "oddsok");
    }

    #[test]
    fn handle_odds_in_json() {
        let mut engine = Engine::new();
        engine.set_option("Format".to_string(), Some("json".to_string()));
        engine.set_attack(&[Some(die(6))]).unwrap();
        let lines = output_of(|out| engine.handle_odds(out, Some(DefenderDice::One)));
        let v: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(v["odds"]["defenderLosesAll"], 83.33);
        assert_eq!(lines[1], "oddsok");
    }
}
