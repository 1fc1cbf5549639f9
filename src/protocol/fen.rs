//! FEN board notation.
//!
//! A compact single-token notation for a full draughts position plus the
//! side to move, in the PDN style used by draughts software.
//!
//! Format: `<side>:<color><squares>:<color><squares>`, e.g.
//! `W:W31,32,K45:B1,2,K3`. Squares are comma-separated; a `K` prefix marks
//! a king; `a-b` expands to every square from `a` to `b`.

use crate::board::{Board, PieceClass, Player, Square, SQUARE_COUNT};

/// Errors that can occur during FEN parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 3 sections separated by ':', got {0}")]
    WrongSectionCount(usize),

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error("invalid color in piece section: '{0}'")]
    InvalidColor(String),

    #[error("piece list for {0} given twice")]
    DuplicateColor(&'static str),

    #[error("invalid square entry: '{0}'")]
    InvalidSquare(String),

    #[error("square {0} is occupied twice")]
    DuplicateSquare(Square),
}

/// Parses the side-to-move section.
fn parse_side(s: &str) -> Result<Player, FenError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Player::from_fen_char(c).ok_or_else(|| FenError::InvalidSide(s.to_string())),
        _ => Err(FenError::InvalidSide(s.to_string())),
    }
}

/// Parses a square number, rejecting anything outside 1..=50.
fn parse_square(s: &str) -> Result<Square, FenError> {
    match s.parse::<Square>() {
        Ok(sq) if (1..=SQUARE_COUNT as Square).contains(&sq) => Ok(sq),
        _ => Err(FenError::InvalidSquare(s.to_string())),
    }
}

/// Parses one piece section (e.g. "W31,32,K45") onto the board.
fn parse_pieces(s: &str, board: &mut Board) -> Result<Player, FenError> {
    let mut chars = s.chars();
    let player = chars
        .next()
        .and_then(Player::from_fen_char)
        .ok_or_else(|| FenError::InvalidColor(s.to_string()))?;
    let list = chars.as_str();
    if list.is_empty() {
        return Ok(player);
    }

    for entry in list.split(',') {
        let (class, squares) = match entry.strip_prefix('K') {
            Some(rest) => (PieceClass::King, rest),
            None => (PieceClass::Man, entry),
        };

        let range = match squares.split_once('-') {
            Some((from, to)) => {
                let from = parse_square(from)?;
                let to = parse_square(to)?;
                if from > to {
                    return Err(FenError::InvalidSquare(entry.to_string()));
                }
                from..=to
            }
            None => {
                let sq = parse_square(squares)?;
                sq..=sq
            }
        };

        for sq in range {
            if !board.add_piece(sq, player, class) {
                return Err(FenError::DuplicateSquare(sq));
            }
        }
    }

    Ok(player)
}

/// The standard starting position, White to move.
pub const INITIAL_FEN: &str = "W:W31,32,33,34,35,36,37,38,39,40,41,42,43,44,45,46,47,48,49,50:B1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20";

/// Parses a FEN string into a board and the side to move.
pub fn parse_fen(s: &str) -> Result<(Board, Player), FenError> {
    let sections: Vec<&str> = s.trim().split(':').collect();
    if sections.len() != 3 {
        return Err(FenError::WrongSectionCount(sections.len()));
    }

    let side = parse_side(sections[0])?;
    let mut board = Board::empty();
    let first = parse_pieces(sections[1], &mut board)?;
    let second = parse_pieces(sections[2], &mut board)?;
    if first == second {
        return Err(FenError::DuplicateColor(first.name()));
    }

    Ok((board, side))
}

/// Encodes one side's piece list, squares ascending.
fn encode_pieces(board: &Board, player: Player) -> String {
    let entries: Vec<String> = board
        .player_squares(player)
        .into_iter()
        .map(|sq| match board.piece_class(sq) {
            Some(PieceClass::King) => format!("K{}", sq),
            _ => sq.to_string(),
        })
        .collect();
    format!("{}{}", player.fen_char(), entries.join(","))
}

/// Encodes a board and side to move into a canonical FEN string: White's
/// pieces first, then Black's, each in ascending square order.
pub fn encode_fen(board: &Board, side: Player) -> String {
    format!(
        "{}:{}:{}",
        side.fen_char(),
        encode_pieces(board, Player::White),
        encode_pieces(board, Player::Black)
    )
}
