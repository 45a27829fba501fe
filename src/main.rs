//! battle-odds -- an exact odds calculator for dice combat.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr, filtered by `RUST_LOG` (default `info`).

use std::io::{self, BufRead};

use battle_odds::engine::Engine;
use battle_odds::protocol::parser::{parse_command, Command};

/// Runs the session loop, reading commands from stdin and writing responses
/// to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hello => engine.handle_hello(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::Attack { slots } => {
                if let Err(e) = engine.set_attack(&slots) {
                    tracing::warn!("attack rejected: {}", e);
                }
            }
            Command::SetDie { slot, value } => {
                if let Err(e) = engine.set_die(slot, value) {
                    tracing::warn!("setdie rejected: {}", e);
                }
            }
            Command::Reset => engine.reset(),
            Command::Show => engine.handle_show(&mut out)?,
            Command::Odds { defenders } => engine.handle_odds(&mut out, defenders)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
