//! The board capability surface consumed by search.
//!
//! Search and evaluation only ever see a position through this trait, so
//! they work the same on the real draughts board and on synthetic trees.

use std::fmt;

use crate::board::{Board, Move, PieceClass, Player, Square};
use crate::movegen::legal_moves;

/// A game position that search can explore.
///
/// Implementations must be persistent: `apply` returns a new, independently
/// owned position and leaves `self` untouched.
pub trait Position: Sized {
    type Move: Clone + PartialEq + fmt::Debug;

    /// All legal moves for `player`; empty if none.
    fn legal_moves(&self, player: Player) -> Vec<Self::Move>;

    /// Returns the position after `mv` is played.
    fn apply(&self, mv: &Self::Move) -> Self;

    /// Squares currently occupied by `player`.
    fn player_squares(&self, player: Player) -> Vec<Square>;

    /// Piece class on an occupied square, `None` for an empty one.
    fn piece_class(&self, square: Square) -> Option<PieceClass>;
}

impl Position for Board {
    type Move = Move;

    fn legal_moves(&self, player: Player) -> Vec<Move> {
        legal_moves(self, player)
    }

    fn apply(&self, mv: &Move) -> Board {
        mv.apply(self)
    }

    fn player_squares(&self, player: Player) -> Vec<Square> {
        Board::player_squares(self, player)
    }

    fn piece_class(&self, square: Square) -> Option<PieceClass> {
        Board::piece_class(self, square)
    }
}
