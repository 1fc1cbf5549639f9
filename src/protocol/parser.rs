//! Engine command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

use log::warn;

use super::fen::INITIAL_FEN;
use crate::search::SearchMode;

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub mode: Option<SearchMode>,
}

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the protocol handshake.
    Cui,

    /// Synchronization ping; the engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the position from a FEN string, then play `moves` on it.
    Position { fen: String, moves: Vec<String> },

    /// Select a move for the side to move.
    Go(GoParams),

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, _) = tokens.split_first()?;

    match head {
        "cui" => Some(Command::Cui),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "go" => Some(parse_go(&tokens)),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");
    let (name_parts, value_parts) = match value_idx {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `position <fen|startpos> [moves <m1> <m2> ...]`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed position: expected 'position <fen> [moves ...]'");
        return None;
    }

    let fen = match tokens[1] {
        "startpos" => INITIAL_FEN.to_string(),
        fen => fen.to_string(),
    };

    let moves = match tokens.get(2) {
        None => Vec::new(),
        Some(&"moves") => tokens[3..].iter().map(|m| m.to_string()).collect(),
        Some(other) => {
            warn!("malformed position: unexpected token '{}'", other);
            return None;
        }
    };

    Some(Command::Position { fen, moves })
}

/// Parses `go [depth <n>] [mode <m>]`. Bad parameter values are skipped.
fn parse_go(tokens: &[&str]) -> Command {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                if let Some(v) = tokens.get(i) {
                    match v.parse::<u32>() {
                        Ok(d) => params.depth = Some(d),
                        Err(_) => warn!("invalid depth value: '{}'", v),
                    }
                }
            }
            "mode" => {
                i += 1;
                if let Some(v) = tokens.get(i) {
                    match v.parse::<SearchMode>() {
                        Ok(m) => params.mode = Some(m),
                        Err(e) => warn!("{}", e),
                    }
                }
            }
            other => warn!("unknown go parameter: '{}'", other),
        }
        i += 1;
    }

    Command::Go(params)
}
