//! Move notation.
//!
//! Steps are written `32-28`, captures `28x17`, and combo captures list every
//! landing square, `28x17x8`. A combo may also be abbreviated to its start
//! and final square, `28x8`, when that is unambiguous.

use crate::board::{Board, Move, Player, Square, SQUARE_COUNT};
use crate::movegen::legal_moves;

/// Errors that can occur when parsing move notation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("malformed move '{0}'")]
    Malformed(String),

    #[error("move '{0}' is not legal in this position")]
    IllegalMove(String),

    #[error("move '{0}' matches more than one legal move")]
    Ambiguous(String),
}

/// A syntactically valid move string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedMove {
    squares: Vec<Square>,
    capture: bool,
}

fn parse_syntax(s: &str) -> Result<ParsedMove, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }

    let has_step = s.contains('-');
    let has_capture = s.contains('x');
    if has_step == has_capture {
        return Err(NotationError::Malformed(s.to_string()));
    }

    let sep = if has_capture { 'x' } else { '-' };
    let squares = s
        .split(sep)
        .map(|part| match part.parse::<Square>() {
            Ok(sq) if (1..=SQUARE_COUNT as Square).contains(&sq) => Ok(sq),
            _ => Err(NotationError::InvalidSquare(part.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if squares.len() < 2 || (!has_capture && squares.len() != 2) {
        return Err(NotationError::Malformed(s.to_string()));
    }

    Ok(ParsedMove {
        squares,
        capture: has_capture,
    })
}

/// The full landing path of a move, starting square first.
fn path(mv: &Move) -> Vec<Square> {
    match mv {
        Move::Forward { start, end } => vec![*start, *end],
        Move::Capture(step) => vec![step.start, step.end],
        Move::Combo { steps } => {
            let mut squares = vec![mv.start()];
            squares.extend(steps.iter().map(|s| s.end));
            squares
        }
    }
}

fn matches(parsed: &ParsedMove, mv: &Move) -> bool {
    if parsed.capture != (mv.capture_count() > 0) {
        return false;
    }
    let full = path(mv);
    if full == parsed.squares {
        return true;
    }
    parsed.capture
        && parsed.squares.len() == 2
        && parsed.squares[0] == mv.start()
        && parsed.squares[1] == mv.end()
}

/// Formats a move in standard notation.
pub fn format_move(mv: &Move) -> String {
    mv.to_string()
}

/// Formats a list of moves, space-separated.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(format_move).collect::<Vec<_>>().join(" ")
}

/// Parses a move for `player` on `board`, resolving it against the legal
/// moves so the result is always one of them.
pub fn parse_move(s: &str, board: &Board, player: Player) -> Result<Move, NotationError> {
    let parsed = parse_syntax(s)?;
    let mut found: Vec<Move> = legal_moves(board, player)
        .into_iter()
        .filter(|mv| matches(&parsed, mv))
        .collect();

    match found.len() {
        0 => Err(NotationError::IllegalMove(s.trim().to_string())),
        1 => Ok(found.remove(0)),
        _ => Err(NotationError::Ambiguous(s.trim().to_string())),
    }
}
