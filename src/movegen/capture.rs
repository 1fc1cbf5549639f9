//! Capture generation.
//!
//! Men capture an adjacent opposing piece in any diagonal direction by
//! jumping to the empty square directly behind it. Kings fly: they may
//! approach the captured piece from any distance and land on any empty
//! square beyond it. A capturing piece must keep jumping while it can, and
//! only the longest chains available to the side are legal.

use crate::board::{neighbor, Board, CaptureStep, Move, Piece, PieceClass, Player, Square, DIRECTIONS};

/// Returns every legal capture for `player`, or an empty vec if none exists.
pub fn legal_captures(board: &Board, player: Player) -> Vec<Move> {
    let mut chains: Vec<Vec<CaptureStep>> = Vec::new();
    let mut path = Vec::new();

    for sq in board.player_squares(player) {
        if let Some(piece) = board.piece(sq) {
            extend_chains(board, sq, piece, &mut path, &mut chains);
        }
    }

    let longest = chains.iter().map(Vec::len).max().unwrap_or(0);
    chains
        .into_iter()
        .filter(|chain| chain.len() == longest)
        .map(Move::from_chain)
        .collect()
}

/// Depth-first expansion of capture chains starting from `from`.
///
/// Each jump is played on a private copy of the board so that captured
/// pieces cannot be jumped twice.
fn extend_chains(
    board: &Board,
    from: Square,
    piece: Piece,
    path: &mut Vec<CaptureStep>,
    out: &mut Vec<Vec<CaptureStep>>,
) {
    let jumps = single_captures(board, from, piece);
    if jumps.is_empty() {
        if !path.is_empty() {
            out.push(path.clone());
        }
        return;
    }

    for jump in jumps {
        let mut next = board.clone();
        next.set(jump.start, None);
        next.set(jump.captured, None);
        next.set(jump.end, Some(piece));

        path.push(jump);
        extend_chains(&next, jump.end, piece, path, out);
        path.pop();
    }
}

/// Returns the single jumps available to `piece` standing on `from`.
fn single_captures(board: &Board, from: Square, piece: Piece) -> Vec<CaptureStep> {
    let enemy = piece.player.opponent();
    let mut jumps = Vec::new();

    for dir in DIRECTIONS {
        match piece.class {
            PieceClass::Man => {
                let Some(over) = neighbor(from, dir) else { continue };
                if board.owner(over) != Some(enemy) {
                    continue;
                }
                if let Some(land) = neighbor(over, dir) {
                    if board.is_empty(land) {
                        jumps.push(CaptureStep { start: from, end: land, captured: over });
                    }
                }
            }
            PieceClass::King => {
                let mut cur = from;
                let mut target = None;
                while let Some(next) = neighbor(cur, dir) {
                    if board.is_empty(next) {
                        cur = next;
                        continue;
                    }
                    if board.owner(next) == Some(enemy) {
                        target = Some(next);
                    }
                    break;
                }

                let Some(over) = target else { continue };
                let mut land = over;
                while let Some(next) = neighbor(land, dir) {
                    if !board.is_empty(next) {
                        break;
                    }
                    jumps.push(CaptureStep { start: from, end: next, captured: over });
                    land = next;
                }
            }
        }
    }

    jumps
}
