//! Full odds table generation.
//!
//! Enumerates every distinct attacker roll up to a configured number of
//! dice, pairs each with the requested defender counts, and computes a
//! report per scenario. When `config.threads > 1` scenarios are computed
//! concurrently using rayon; results always come back in scenario order.

use std::io::{self, Write};

use rayon::prelude::*;
use thiserror::Error;

use crate::dice::{AttackerRoll, DefenderDice, DieValue, ALL_FACES, MAX_ATTACKER_DICE};
use crate::protocol::report::ScenarioReport;

/// Errors raised before a sweep starts.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("attacker dice must be between 1 and {max}, got {0}", max = MAX_ATTACKER_DICE)]
    InvalidMaxAttackers(usize),

    #[error("no defender dice counts requested")]
    NoDefenders,

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a sweep run.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Largest attacker roll to enumerate (1..=3).
    pub max_attackers: usize,
    /// Defender counts to pair with each roll.
    pub defenders: Vec<DefenderDice>,
    /// Worker threads; 1 runs on the calling thread.
    pub threads: usize,
    /// Suppress progress logging.
    pub quiet: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_attackers: MAX_ATTACKER_DICE,
            defenders: DefenderDice::ALL.to_vec(),
            threads: 4,
            quiet: false,
        }
    }
}

/// Every distinct roll of exactly `count` dice, highest die first, in
/// ascending lexicographic order.
fn rolls_of(count: usize) -> Vec<Vec<DieValue>> {
    if count == 0 {
        return vec![Vec::new()];
    }
    let mut rolls = Vec::new();
    for head in ALL_FACES {
        for tail in rolls_of(count - 1) {
            if tail.first().map_or(true, |&next| next <= head) {
                let mut roll = Vec::with_capacity(count);
                roll.push(head);
                roll.extend(tail);
                rolls.push(roll);
            }
        }
    }
    rolls
}

/// Every distinct attacker roll of 1..=`max_attackers` dice, fewest dice first.
pub fn attacker_rolls(max_attackers: usize) -> Vec<AttackerRoll> {
    (1..=max_attackers.min(MAX_ATTACKER_DICE))
        .flat_map(rolls_of)
        .filter_map(|dice| AttackerRoll::new(dice).ok())
        .collect()
}

/// Lists the computable (roll, defender count) pairs in output order.
fn scenarios(config: &SweepConfig) -> Vec<(AttackerRoll, DefenderDice)> {
    let mut defenders = config.defenders.clone();
    defenders.sort();
    defenders.dedup();

    let mut out = Vec::new();
    for roll in attacker_rolls(config.max_attackers) {
        for &d in &defenders {
            if roll.can_face(d) {
                out.push((roll.clone(), d));
            }
        }
    }
    out
}

/// Runs the sweep, producing one report per computable scenario.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<ScenarioReport>, SweepError> {
    if config.max_attackers == 0 || config.max_attackers > MAX_ATTACKER_DICE {
        return Err(SweepError::InvalidMaxAttackers(config.max_attackers));
    }
    if config.defenders.is_empty() {
        return Err(SweepError::NoDefenders);
    }

    let work = scenarios(config);
    if !config.quiet {
        tracing::info!(
            scenarios = work.len(),
            threads = config.threads,
            "starting sweep"
        );
    }

    let reports = if config.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        pool.install(|| {
            work.par_iter()
                .filter_map(|(roll, d)| ScenarioReport::new(roll, *d))
                .collect::<Vec<_>>()
        })
    } else {
        work.iter()
            .filter_map(|(roll, d)| ScenarioReport::new(roll, *d))
            .collect()
    };

    if !config.quiet {
        tracing::info!(reports = reports.len(), "sweep complete");
    }
    Ok(reports)
}

/// Writes reports as JSONL (one JSON object per scenario, one per line).
pub fn write_jsonl<W: Write>(reports: &[ScenarioReport], out: &mut W) -> io::Result<()> {
    for report in reports {
        serde_json::to_writer(&mut *out, report)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Headline figures for a finished sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    pub scenarios: usize,
    /// Scenario with the lowest delta (most favourable to the attacker).
    pub best: Option<ScenarioReport>,
    /// Scenario with the highest delta.
    pub worst: Option<ScenarioReport>,
}

/// Summarizes a sweep. Ties keep the earliest scenario.
pub fn summarize(reports: &[ScenarioReport]) -> SweepSummary {
    let mut best: Option<&ScenarioReport> = None;
    let mut worst: Option<&ScenarioReport> = None;
    for report in reports {
        let delta = report.expected.delta();
        if best.map_or(true, |b| delta < b.expected.delta()) {
            best = Some(report);
        }
        if worst.map_or(true, |w| delta > w.expected.delta()) {
            worst = Some(report);
        }
    }
    SweepSummary {
        scenarios: reports.len(),
        best: best.cloned(),
        worst: worst.cloned(),
    }
}

/// Logs a one-line description of the best and worst scenarios.
pub fn log_summary(summary: &SweepSummary) {
    tracing::info!("{} scenarios", summary.scenarios);
    if let Some(best) = &summary.best {
        tracing::info!(
            "best for attacker: [{}] vs {} (delta {:.2})",
            best.attacker,
            best.defenders,
            best.expected.delta()
        );
    }
    if let Some(worst) = &summary.worst {
        tracing::info!(
            "worst for attacker: [{}] vs {} (delta {:.2})",
            worst.attacker,
            worst.defenders,
            worst.expected.delta()
        );
    }
}
