//! Text protocol handling.
//!
//! Board positions are exchanged as FEN strings, moves in standard
//! draughts notation, and engine commands as one line each.

pub mod fen;
pub mod notation;
pub mod parser;

pub use fen::{encode_fen, parse_fen, FenError, INITIAL_FEN};
pub use notation::{format_move, format_moves, parse_move, NotationError};
pub use parser::{parse_command, Command, GoParams};
