//! Non-capturing move generation.
//!
//! Men step one square diagonally forward. Kings slide any distance along
//! a diagonal until blocked.

use crate::board::{neighbor, Board, Move, PieceClass, Player, DIRECTIONS};

/// Returns every non-capturing move for `player`.
pub fn legal_steps(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();

    for start in board.player_squares(player) {
        let Some(class) = board.piece_class(start) else { continue };
        for dir in DIRECTIONS {
            match class {
                PieceClass::Man => {
                    if dir.0 != player.forward() {
                        continue;
                    }
                    if let Some(end) = neighbor(start, dir) {
                        if board.is_empty(end) {
                            moves.push(Move::Forward { start, end });
                        }
                    }
                }
                PieceClass::King => {
                    let mut cur = start;
                    while let Some(end) = neighbor(cur, dir) {
                        if !board.is_empty(end) {
                            break;
                        }
                        moves.push(Move::Forward { start, end });
                        cur = end;
                    }
                }
            }
        }
    }

    moves
}
