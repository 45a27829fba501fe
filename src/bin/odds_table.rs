//! Odds table generation CLI.
//!
//! Computes odds for every distinct attacker roll and writes them as JSONL.
//!
//! Usage:
//!   cargo run --release --bin odds_table -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use battle_odds::dice::DefenderDice;
use battle_odds::sweep::{self, SweepConfig};

#[derive(Parser, Debug)]
#[command(name = "odds_table", about = "Write the full attacker/defender odds table as JSONL")]
struct Args {
    /// Largest attacker roll to enumerate (1-3)
    #[arg(long, default_value_t = 3)]
    max_attackers: usize,

    /// Defender dice counts to include (1, 2 or both)
    #[arg(long, value_delimiter = ',', default_values_t = [1u8, 2])]
    defenders: Vec<u8>,

    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress summary output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let defenders = args
        .defenders
        .iter()
        .map(|&d| DefenderDice::new(d))
        .collect::<Result<Vec<_>, _>>()?;
    let config = SweepConfig {
        max_attackers: args.max_attackers,
        defenders,
        threads: args.threads,
        quiet: args.quiet,
    };

    let start = Instant::now();
    let reports = sweep::run_sweep(&config)?;
    if !config.quiet {
        tracing::info!(
            "computed {} scenarios in {:.1}ms",
            reports.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        sweep::log_summary(&sweep::summarize(&reports));
    }

    match args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            sweep::write_jsonl(&reports, &mut writer)?;
            if !config.quiet {
                tracing::info!("wrote {} scenarios to {}", reports.len(), path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            sweep::write_jsonl(&reports, &mut writer)?;
        }
    }
    Ok(())
}
