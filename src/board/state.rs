//! Board position representation.
//!
//! Holds the occupancy, ownership, and piece class of every playable square.
//! A `Board` is a small fixed-size value; applying a move produces a new
//! board and never changes the original.

use std::fmt;

use super::square::{
    coords_to_square, is_valid_square, Piece, PieceClass, Player, Square, BOARD_DIM, SQUARE_COUNT,
};

/// A full draughts position.
///
/// Uses a fixed-size array indexed by square number (index 0 unused) for
/// O(1) lookup and cheap copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; SQUARE_COUNT + 1],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [None; SQUARE_COUNT + 1],
        }
    }

    /// Creates the standard starting layout: Black on 1-20, White on 31-50.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        for sq in 31..=50 {
            board.set(sq, Some(Piece::man(Player::White)));
        }
        for sq in 1..=20 {
            board.set(sq, Some(Piece::man(Player::Black)));
        }
        board
    }

    /// Places a piece. Returns false if the square is invalid or occupied.
    pub fn add_piece(&mut self, square: Square, player: Player, class: PieceClass) -> bool {
        if !is_valid_square(square) || self.squares[square as usize].is_some() {
            return false;
        }
        self.squares[square as usize] = Some(Piece::new(player, class));
        true
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub fn piece(&self, square: Square) -> Option<Piece> {
        if !is_valid_square(square) {
            return None;
        }
        self.squares[square as usize]
    }

    /// Overwrites the contents of a square.
    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square as usize] = piece;
    }

    /// Returns the owner of a square, if occupied.
    #[inline]
    pub fn owner(&self, square: Square) -> Option<Player> {
        self.piece(square).map(|p| p.player)
    }

    /// Returns the piece class on a square, if occupied.
    #[inline]
    pub fn piece_class(&self, square: Square) -> Option<PieceClass> {
        self.piece(square).map(|p| p.class)
    }

    /// Returns true if the square holds no piece.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece(square).is_none()
    }

    /// Returns all squares occupied by the given player, in ascending order.
    pub fn player_squares(&self, player: Player) -> Vec<Square> {
        (1..=SQUARE_COUNT as u8)
            .filter(|&sq| self.owner(sq) == Some(player))
            .collect()
    }

    /// Counts the pieces a player has, optionally restricted to one class.
    pub fn count(&self, player: Player, class: Option<PieceClass>) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|p| p.player == player && class.map_or(true, |c| p.class == c))
            .count()
    }
}

impl fmt::Display for Board {
    /// Renders the board as ten text rows: `w`/`b` for men, `W`/`B` for
    /// kings, `.` for empty dark squares and blanks for light squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..=BOARD_DIM {
            let mut line = String::with_capacity(2 * BOARD_DIM as usize);
            for col in 1..=BOARD_DIM {
                let c = match coords_to_square(row, col) {
                    None => ' ',
                    Some(sq) => match self.piece(sq) {
                        None => '.',
                        Some(Piece { player: Player::White, class: PieceClass::Man }) => 'w',
                        Some(Piece { player: Player::White, class: PieceClass::King }) => 'W',
                        Some(Piece { player: Player::Black, class: PieceClass::Man }) => 'b',
                        Some(Piece { player: Player::Black, class: PieceClass::King }) => 'B',
                    },
                };
                line.push(c);
                line.push(' ');
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
