//! Legal move generation.
//!
//! Captures are mandatory: when any capture exists for the side to move,
//! only the longest capture chains are legal. Otherwise every step is legal.

pub mod capture;
pub mod step;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Move, Player};

/// Returns all legal moves for `player`. An empty vec means the player
/// cannot move, which ends the game in their opponent's favor.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let captures = capture::legal_captures(board, player);
    if !captures.is_empty() {
        return captures;
    }
    step::legal_steps(board, player)
}

/// Picks a uniformly random legal move, or `None` if there is none.
pub fn random_move(board: &Board, player: Player, rng: &mut impl Rng) -> Option<Move> {
    legal_moves(board, player).choose(rng).cloned()
}

/// Returns true if `player`, being on move, has lost.
pub fn is_game_over(board: &Board, player: Player) -> bool {
    legal_moves(board, player).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn starting_position_has_nine_moves_each() {
        let board = Board::starting();
        assert_eq!(legal_moves(&board, Player::White).len(), 9);
        assert_eq!(legal_moves(&board, Player::Black).len(), 9);
    }

    #[test]
    fn capture_is_forced() {
        let mut board = Board::empty();
        board.add_piece(28, Player::White, PieceClass::Man);
        board.add_piece(22, Player::Black, PieceClass::Man);
        board.add_piece(45, Player::White, PieceClass::Man);

        let moves = legal_moves(&board, Player::White);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to_string(), "28x17");
    }

    #[test]
    fn no_pieces_means_game_over() {
        let mut board = Board::empty();
        board.add_piece(28, Player::White, PieceClass::Man);
        assert!(is_game_over(&board, Player::Black));
        assert!(!is_game_over(&board, Player::White));
    }

    #[test]
    fn blocked_pieces_mean_game_over() {
        let mut board = Board::empty();
        // A white man on the left edge blocked by two black men in a line.
        board.add_piece(36, Player::White, PieceClass::Man);
        board.add_piece(31, Player::Black, PieceClass::Man);
        board.add_piece(27, Player::Black, PieceClass::Man);
        assert!(is_game_over(&board, Player::White));
    }

    #[test]
    fn random_move_is_legal() {
        let board = Board::starting();
        let legal = legal_moves(&board, Player::White);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mv = random_move(&board, Player::White, &mut rng).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn random_move_none_without_moves() {
        let board = Board::empty();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_move(&board, Player::White, &mut rng), None);
    }
}
