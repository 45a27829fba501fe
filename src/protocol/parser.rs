//! Session command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the session loop can dispatch on.

use crate::dice::{DefenderDice, DieValue};

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Identify the engine and list its options.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Replace the attacker selection: `attack <v> [<v|-> [<v|->]]`.
    Attack { slots: Vec<Option<DieValue>> },

    /// Change one attacker slot: `setdie <slot> <v|->`.
    SetDie {
        slot: usize,
        value: Option<DieValue>,
    },

    /// Restore the initial selection.
    Reset,

    /// Print the current selection.
    Show,

    /// Report odds, for one defender count or for every computable one.
    Odds { defenders: Option<DefenderDice> },

    /// Terminate the session.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "reset" => Some(Command::Reset),
        "show" => Some(Command::Show),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(args),
        "attack" => parse_attack(args),
        "setdie" => parse_setdie(args),
        "odds" => parse_odds(args),

        other => {
            tracing::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses a slot token: a face 1-6, or `-` for a die that was not thrown.
fn parse_slot(token: &str) -> Result<Option<DieValue>, ()> {
    if token == "-" {
        return Ok(None);
    }
    DieValue::parse(token).map(Some).ok_or(())
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let rest = &args[1..];
    let (name_parts, value_parts) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => (&rest[..vi], &rest[vi + 1..]),
        None => (rest, &rest[rest.len()..]),
    };
    if name_parts.is_empty() {
        tracing::warn!("malformed setoption: empty name");
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Some(Command::SetOption { name, value })
}

/// Parses `attack <v> [<v|-> [<v|->]]`.
fn parse_attack(args: &[&str]) -> Option<Command> {
    if args.is_empty() {
        tracing::warn!("malformed attack: expected 'attack <v> [<v|-> [<v|->]]'");
        return None;
    }
    let mut slots = Vec::with_capacity(args.len());
    for &token in args {
        match parse_slot(token) {
            Ok(slot) => slots.push(slot),
            Err(()) => {
                tracing::warn!("invalid die value: '{}'", token);
                return None;
            }
        }
    }
    Some(Command::Attack { slots })
}

/// Parses `setdie <slot> <v|->`.
fn parse_setdie(args: &[&str]) -> Option<Command> {
    if args.len() != 2 {
        tracing::warn!("malformed setdie: expected 'setdie <slot> <v|->'");
        return None;
    }
    let slot = match args[0].parse::<usize>() {
        Ok(s) => s,
        Err(_) => {
            tracing::warn!("invalid slot: '{}'", args[0]);
            return None;
        }
    };
    match parse_slot(args[1]) {
        Ok(value) => Some(Command::SetDie { slot, value }),
        Err(()) => {
            tracing::warn!("invalid die value: '{}'", args[1]);
            None
        }
    }
}

/// Parses `odds [1|2]`.
fn parse_odds(args: &[&str]) -> Option<Command> {
    match args {
        [] => Some(Command::Odds { defenders: None }),
        [count] => match count.parse::<u8>().ok().and_then(|c| DefenderDice::new(c).ok()) {
            Some(defenders) => Some(Command::Odds {
                defenders: Some(defenders),
            }),
            None => {
                tracing::warn!("unsupported defender count: '{}'", count);
                None
            }
        },
        _ => {
            tracing::warn!("malformed odds: expected 'odds [1|2]'");
            None
        }
    }
}
