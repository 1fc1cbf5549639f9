//! Minimax with alpha-beta pruning.
//!
//! Returns the same backed-up value as `minimax` for a full `(SCORE_MIN,
//! SCORE_MAX)` window while skipping siblings that cannot affect it. The
//! leaves of skipped siblings are never visited and so never recorded.

use super::{SearchOutcome, MAXIMIZER, SCORE_MAX, SCORE_MIN};
use crate::board::Player;
use crate::eval::evaluate;
use crate::position::Position;

/// Alpha-beta counterpart of [`minimax`](super::minimax) with the same leaf
/// rules. `alpha` is the value the maximizer is already guaranteed along the
/// current path, `beta` the value the minimizer is.
pub fn alpha_beta<P: Position>(
    mv: &P::Move,
    board: &P,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    player: Player,
    root: Player,
) -> SearchOutcome {
    if depth == 0 || board.legal_moves(player).is_empty() {
        return SearchOutcome::leaf(evaluate(board, root));
    }

    let next = board.apply(mv);
    let replies = next.legal_moves(player);

    if player == MAXIMIZER {
        let mut outcome = SearchOutcome::interior(SCORE_MIN);
        for reply in &replies {
            let child = alpha_beta(reply, &next, depth - 1, alpha, beta, player.opponent(), root);
            outcome.value = outcome.value.max(child.value);
            outcome.absorb(child);
            alpha = alpha.max(outcome.value);
            if beta <= alpha {
                break;
            }
        }
        outcome
    } else {
        let mut outcome = SearchOutcome::interior(SCORE_MAX);
        for reply in &replies {
            let child = alpha_beta(reply, &next, depth - 1, alpha, beta, player.opponent(), root);
            outcome.value = outcome.value.min(child.value);
            outcome.absorb(child);
            beta = beta.min(outcome.value);
            if beta <= alpha {
                break;
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Move};
    use crate::movegen::legal_moves;
    use crate::search::minimax;
    use crate::search::tree::{branch, leaf, TreePosition};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn full_window<P: Position>(
        mv: &P::Move,
        board: &P,
        depth: u32,
        player: Player,
        root: Player,
    ) -> SearchOutcome {
        alpha_beta(mv, board, depth, SCORE_MIN, SCORE_MAX, player, root)
    }

    /// Returns true if every element of `sub` can be matched to a distinct
    /// element of `sup`.
    fn is_sub_multiset(sub: &[i32], sup: &[i32]) -> bool {
        let mut remaining = sup.to_vec();
        for v in sub {
            match remaining.iter().position(|x| x == v) {
                Some(i) => {
                    remaining.swap_remove(i);
                }
                None => return false,
            }
        }
        true
    }

    #[test]
    fn depth_zero_scores_the_given_board() {
        let board = Board::starting();
        let mv = Move::Forward { start: 32, end: 28 };
        let outcome = full_window(&mv, &board, 0, Player::Black, Player::White);
        assert_eq!(outcome.value, 0);
        assert_eq!(outcome.leaves, vec![0]);
    }

    #[test]
    fn cut_skips_remaining_siblings() {
        // White replies at node 1 and the first reply is worth 5. Under the
        // second reply Black finds 2 straight away, which is already below
        // White's guarantee of 5, so Black's other option is never visited.
        let tree = TreePosition::build(&branch(0, vec![branch(
            0,
            vec![
                branch(0, vec![branch(5, vec![leaf(0)])]),
                branch(0, vec![branch(2, vec![leaf(0)]), branch(-20, vec![leaf(0)])]),
            ],
        )]));
        let first = tree.legal_moves(Player::White)[0];

        let pruned = full_window(&first, &tree, 3, Player::White, Player::White);
        let full = minimax(&first, &tree, 3, Player::White, Player::White);
        assert_eq!(full.leaves, vec![5, 2, -20]);
        assert_eq!(full.value, 5);
        assert_eq!(pruned.value, 5);
        assert_eq!(pruned.leaves, vec![5, 2]);
        assert!(pruned.nodes < full.nodes);
    }

    #[test]
    fn applied_position_without_replies_keeps_initial_bound() {
        let tree = TreePosition::build(&branch(0, vec![leaf(4)]));
        let first = tree.legal_moves(Player::White)[0];

        let outcome = full_window(&first, &tree, 3, Player::Black, Player::White);
        assert_eq!(outcome.value, SCORE_MAX);
        assert!(outcome.leaves.is_empty());

        let outcome = full_window(&first, &tree, 3, Player::White, Player::White);
        assert_eq!(outcome.value, SCORE_MIN);
        assert!(outcome.leaves.is_empty());
    }

    #[test]
    fn matches_minimax_on_random_trees() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let tree = TreePosition::random(&mut rng, 5, 3);
            for first in tree.legal_moves(Player::White) {
                for depth in 0..=4 {
                    for player in [Player::White, Player::Black] {
                        for root in [Player::White, Player::Black] {
                            let full = minimax(&first, &tree, depth, player, root);
                            let pruned = full_window(&first, &tree, depth, player, root);
                            assert_eq!(pruned.value, full.value);
                            assert!(is_sub_multiset(&pruned.leaves, &full.leaves));
                            // Not equality: a pruned sibling may hold the
                            // largest leaf, see `cut_skips_remaining_siblings`.
                            assert!(pruned.best_leaf() <= full.best_leaf());
                            assert!(pruned.nodes <= full.nodes);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn matches_minimax_on_starting_board() {
        let board = Board::starting();
        for mv in legal_moves(&board, Player::White) {
            let full = minimax(&mv, &board, 3, Player::Black, Player::White);
            let pruned = full_window(&mv, &board, 3, Player::Black, Player::White);
            assert_eq!(pruned.value, full.value);
            assert!(is_sub_multiset(&pruned.leaves, &full.leaves));
        }
    }
}
