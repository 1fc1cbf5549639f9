//! Material heuristic.
//!
//! Every piece counts one point and every king one extra point. The score is
//! the difference between the perspective player's total and the opponent's.

use crate::board::{PieceClass, Player};
use crate::position::Position;

/// Piece and king counts for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Material {
    pub pieces: i32,
    pub kings: i32,
}

/// Counts the pieces and kings `player` has on the board.
pub fn material<P: Position>(board: &P, player: Player) -> Material {
    let squares = board.player_squares(player);
    let kings = squares
        .iter()
        .filter(|&&sq| board.piece_class(sq) == Some(PieceClass::King))
        .count();
    Material {
        pieces: squares.len() as i32,
        kings: kings as i32,
    }
}

/// Scores `board` for `player`: `(pieces - opponent pieces) + (kings -
/// opponent kings)`. Higher is better for `player`.
pub fn evaluate<P: Position>(board: &P, player: Player) -> i32 {
    let own = material(board, player);
    let opp = material(board, player.opponent());
    (own.pieces - opp.pieces) + (own.kings - opp.kings)
}
