//! Squares, players, and piece classes.
//!
//! The board is a 10x10 grid of which only the 50 dark squares are playable.
//! Squares are numbered 1..=50 row by row from the top, following standard
//! draughts notation. Row 1 holds squares 1-5 on columns 2, 4, 6, 8, 10;
//! row 2 holds squares 6-10 on columns 1, 3, 5, 7, 9, and so on.

use serde::{Deserialize, Serialize};

/// A playable square number in `1..=SQUARE_COUNT`.
pub type Square = u8;

/// Number of playable squares.
pub const SQUARE_COUNT: usize = 50;

/// Width and height of the board.
pub const BOARD_DIM: i8 = 10;

/// Playable squares per row.
const SQUARES_PER_ROW: u8 = 5;

/// The four diagonal directions as (row delta, column delta).
pub const DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// One of the two sides.
///
/// White is the maximizing player in search, Black the minimizing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// Returns the other side.
    pub const fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Returns the lowercase name used in the protocol and replay files.
    pub const fn name(self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }

    /// Parses a player from its name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Player> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Some(Player::White),
            "black" | "b" => Some(Player::Black),
            _ => None,
        }
    }

    /// Returns the single-character FEN abbreviation.
    pub const fn fen_char(self) -> char {
        match self {
            Player::White => 'W',
            Player::Black => 'B',
        }
    }

    /// Parses a player from its FEN abbreviation.
    pub fn from_fen_char(c: char) -> Option<Player> {
        match c {
            'W' => Some(Player::White),
            'B' => Some(Player::Black),
            _ => None,
        }
    }

    /// Row delta of a man's forward direction.
    pub const fn forward(self) -> i8 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    /// Row on which this side's men are promoted.
    pub const fn promotion_row(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => BOARD_DIM,
        }
    }
}

/// Whether a piece is an ordinary man or a promoted king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceClass {
    Man,
    King,
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub player: Player,
    pub class: PieceClass,
}

impl Piece {
    pub const fn new(player: Player, class: PieceClass) -> Self {
        Piece { player, class }
    }

    pub const fn man(player: Player) -> Self {
        Piece::new(player, PieceClass::Man)
    }

    pub const fn king(player: Player) -> Self {
        Piece::new(player, PieceClass::King)
    }
}

/// Converts a square number to 1-based (row, column) coordinates.
pub fn square_to_coords(square: Square) -> (i8, i8) {
    debug_assert!(is_valid_square(square));
    let offset = square - 1;
    let row = (offset / SQUARES_PER_ROW) as i8 + 1;
    let pos = (offset % SQUARES_PER_ROW) as i8;
    let col = if row % 2 == 1 { 2 * pos + 2 } else { 2 * pos + 1 };
    (row, col)
}

/// Converts 1-based (row, column) coordinates to a square number.
///
/// Returns `None` for coordinates off the board or on a light square.
pub fn coords_to_square(row: i8, col: i8) -> Option<Square> {
    if !(1..=BOARD_DIM).contains(&row) || !(1..=BOARD_DIM).contains(&col) {
        return None;
    }
    if (row + col) % 2 == 0 {
        return None;
    }
    let pos = (col - 1) / 2;
    Some(((row - 1) as u8) * SQUARES_PER_ROW + pos as u8 + 1)
}

/// Returns the square one diagonal step away, if it is on the board.
#[inline]
pub fn neighbor(square: Square, (dr, dc): (i8, i8)) -> Option<Square> {
    let (row, col) = square_to_coords(square);
    coords_to_square(row + dr, col + dc)
}

/// Returns true if the square number is in range.
#[inline]
pub fn is_valid_square(square: Square) -> bool {
    (1..=SQUARE_COUNT as u8).contains(&square)
}

/// Returns the row of a square.
#[inline]
pub fn row_of(square: Square) -> i8 {
    square_to_coords(square).0
}
