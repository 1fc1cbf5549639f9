//! Plain depth-limited minimax.

use super::{SearchOutcome, MAXIMIZER, SCORE_MAX, SCORE_MIN};
use crate::board::Player;
use crate::eval::evaluate;
use crate::position::Position;

/// Explores the subtree reached by playing `mv` on `board`, with `player`
/// to reply and `depth` plies left.
///
/// The node is a leaf when `depth` is zero or `player` has no legal move on
/// `board`; the leaf is scored on `board` itself. Otherwise `mv` is applied
/// and each of `player`'s replies is explored one ply shallower. If the
/// applied position leaves `player` without a reply, nothing is explored:
/// the node keeps its initial bound and records no leaf.
pub fn minimax<P: Position>(
    mv: &P::Move,
    board: &P,
    depth: u32,
    player: Player,
    root: Player,
) -> SearchOutcome {
    if depth == 0 || board.legal_moves(player).is_empty() {
        return SearchOutcome::leaf(evaluate(board, root));
    }

    let next = board.apply(mv);
    let replies = next.legal_moves(player);

    let maximizing = player == MAXIMIZER;
    let mut outcome = SearchOutcome::interior(if maximizing { SCORE_MIN } else { SCORE_MAX });

    for reply in &replies {
        let child = minimax(reply, &next, depth - 1, player.opponent(), root);
        outcome.value = if maximizing {
            outcome.value.max(child.value)
        } else {
            outcome.value.min(child.value)
        };
        outcome.absorb(child);
    }

    outcome
}
