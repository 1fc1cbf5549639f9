//! Board representation and game-state types.
//!
//! Contains squares and their geometry, pieces, moves, and the board
//! position itself.

pub mod moves;
pub mod square;
pub mod state;

pub use moves::{CaptureStep, Move};
pub use square::{
    coords_to_square, neighbor, square_to_coords, Piece, PieceClass, Player, Square, BOARD_DIM,
    DIRECTIONS, SQUARE_COUNT,
};
pub use state::Board;
