//! Move representation and application.
//!
//! A move is one of three variants: a plain step, a single capture, or a
//! combo capture made of several single captures applied as one turn.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::square::{row_of, PieceClass, Square};
use super::state::Board;

/// One jump of a capture: the piece moves from `start` to `end`, removing
/// the opposing piece on `captured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureStep {
    pub start: Square,
    pub end: Square,
    pub captured: Square,
}

/// A complete turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    /// A non-capturing move.
    Forward { start: Square, end: Square },
    /// A single capture.
    Capture(CaptureStep),
    /// Two or more captures chained by the same piece.
    Combo { steps: Vec<CaptureStep> },
}

impl Move {
    /// Square the moving piece starts on.
    pub fn start(&self) -> Square {
        match self {
            Move::Forward { start, .. } => *start,
            Move::Capture(step) => step.start,
            Move::Combo { steps } => steps.first().map_or(0, |s| s.start),
        }
    }

    /// Square the moving piece ends on.
    pub fn end(&self) -> Square {
        match self {
            Move::Forward { end, .. } => *end,
            Move::Capture(step) => step.end,
            Move::Combo { steps } => steps.last().map_or(0, |s| s.end),
        }
    }

    /// Number of opposing pieces removed by this move.
    pub fn capture_count(&self) -> usize {
        match self {
            Move::Forward { .. } => 0,
            Move::Capture(_) => 1,
            Move::Combo { steps } => steps.len(),
        }
    }

    /// Builds a capture move from a chain of steps, choosing the single or
    /// combo variant by length.
    pub fn from_chain(mut steps: Vec<CaptureStep>) -> Move {
        if steps.len() == 1 {
            Move::Capture(steps.remove(0))
        } else {
            Move::Combo { steps }
        }
    }

    /// Returns a new board with this move played. The input is not modified.
    ///
    /// A man that ends its move on the far row is promoted; passing through
    /// the far row mid-chain does not promote.
    pub fn apply(&self, board: &Board) -> Board {
        let mut next = board.clone();
        match self {
            Move::Forward { start, end } => relocate(&mut next, *start, *end),
            Move::Capture(step) => apply_step(&mut next, step),
            Move::Combo { steps } => {
                for step in steps {
                    apply_step(&mut next, step);
                }
            }
        }
        promote(&mut next, self.end());
        next
    }
}

fn relocate(board: &mut Board, from: Square, to: Square) {
    let piece = board.piece(from);
    board.set(from, None);
    board.set(to, piece);
}

fn apply_step(board: &mut Board, step: &CaptureStep) {
    relocate(board, step.start, step.end);
    board.set(step.captured, None);
}

fn promote(board: &mut Board, square: Square) {
    if let Some(mut piece) = board.piece(square) {
        if piece.class == PieceClass::Man && row_of(square) == piece.player.promotion_row() {
            piece.class = PieceClass::King;
            board.set(square, Some(piece));
        }
    }
}

impl fmt::Display for Move {
    /// Standard notation: `32-28`, `28x17`, `28x17x6`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Forward { start, end } => write!(f, "{}-{}", start, end),
            Move::Capture(step) => write!(f, "{}x{}", step.start, step.end),
            Move::Combo { steps } => {
                write!(f, "{}", self.start())?;
                for step in steps {
                    write!(f, "x{}", step.end)?;
                }
                Ok(())
            }
        }
    }
}
