//! Scenario reports.
//!
//! A report bundles one attacker roll against one defender count with its
//! odds and expected losses, and renders either as a single protocol text
//! line or as a JSON object.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dice::{AttackerRoll, DefenderDice};
use crate::odds::{compute_odds, ExpectedLoss, Odds};

/// How reports are written to the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Odds and expected losses for one attacker roll against one defender count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub attacker: AttackerRoll,
    pub defenders: usize,
    pub odds: Odds,
    pub expected: ExpectedLoss,
}

impl ScenarioReport {
    /// Builds the report, or `None` if the attacker cannot face `defenders`.
    pub fn new(attacker: &AttackerRoll, defenders: DefenderDice) -> Option<ScenarioReport> {
        let odds = compute_odds(attacker, defenders)?;
        Some(ScenarioReport {
            attacker: attacker.clone(),
            defenders: defenders.count(),
            expected: ExpectedLoss::from_odds(&odds, defenders),
            odds,
        })
    }

    /// Formats the report as one protocol line.
    pub fn to_text(&self) -> String {
        let mut line = format!(
            "odds defenders {} defender_loses_all {:.2} attacker_loses_all {:.2}",
            self.defenders, self.odds.defender_loses_all, self.odds.attacker_loses_all
        );
        if let Some(split) = self.odds.each_loses_one {
            line.push_str(&format!(" each_loses_one {:.2}", split));
        }
        let ratio = match self.expected.loss_ratio() {
            Some(r) => format!("{:.2}", r),
            None => "inf".to_string(),
        };
        line.push_str(&format!(
            " expected_attacker {:.2} expected_defender {:.2} delta {:.2} ratio 1:{}",
            self.expected.attacker,
            self.expected.defender,
            self.expected.delta(),
            ratio
        ));
        line
    }

    /// Formats the report as a compact JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Formats the report in the requested output format.
    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(attacker: &[u8], defenders: DefenderDice) -> Option<ScenarioReport> {
        ScenarioReport::new(&AttackerRoll::from_raw(attacker).unwrap(), defenders)
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn no_report_without_enough_dice() {
        assert_eq!(report(&[4], DefenderDice::Two), None);
        assert_eq!(report(&[], DefenderDice::One), None);
    }

    #[test]
    fn text_line_for_one_defender_die() {
        let r = report(&[6], DefenderDice::One).unwrap();
        assert_eq!(
            r.to_text(),
            "odds defenders 1 defender_loses_all 83.33 attacker_loses_all 16.67 \
             expected_attacker -0.17 expected_defender -0.83 delta -0.67 ratio 1:5.00"
        );
    }

    #[test]
    fn text_line_for_two_defender_dice() {
        let r = report(&[6, 6], DefenderDice::Two).unwrap();
        assert_eq!(
            r.to_text(),
            "odds defenders 2 defender_loses_all 69.44 attacker_loses_all 2.78 \
             each_loses_one 27.78 expected_attacker -0.33 expected_defender -1.67 \
             delta -1.33 ratio 1:5.00"
        );
    }

    #[test]
    fn certain_loss_has_no_negative_zero() {
        let r = report(&[1], DefenderDice::One).unwrap();
        assert!(r.to_text().ends_with(
            "expected_attacker -1.00 expected_defender 0.00 delta 1.00 ratio 1:0.00"
        ));
    }

    #[test]
    fn json_object_carries_roll_and_odds() {
        let r = report(&[3, 5], DefenderDice::One).unwrap();
        let v: serde_json::Value = serde_json::from_str(&r.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(v["attacker"], serde_json::json!([3, 5]));
        assert_eq!(v["defenders"], 1);
        assert!(v["odds"].get("eachLosesOne").is_none());
        assert!(v["odds"]["defenderLosesAll"].is_number());
        assert!(v["expected"]["attacker"].is_number());
    }
}
