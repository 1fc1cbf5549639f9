//! Engine state management.
//!
//! Holds the current position, engine options, and the move selector, and
//! runs a search for the `go` command.

use std::collections::HashMap;
use std::io::{self, Write};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Board, Player};
use crate::protocol::{format_move, parse_fen, parse_move, FenError, GoParams, NotationError};
use crate::search::{CandidateScoring, ConfigError, MoveSelector, SearchConfig, SearchMode};

/// Highest depth accepted through `setoption` or `go`.
pub const MAX_DEPTH: u32 = 10;

/// Highest worker count accepted for the `Threads` option.
pub const MAX_THREADS: usize = 64;

/// Errors raised while updating engine state.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to parse FEN: {0}")]
    Fen(#[from] FenError),

    #[error("move {index} '{text}': {source}")]
    Move {
        index: usize,
        text: String,
        source: NotationError,
    },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option {name} needs a value")]
    MissingValue { name: String },

    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    /// Current board and the side to move.
    pub position: Option<(Board, Player)>,
    pub options: HashMap<String, String>,
    selector: MoveSelector,
    pool: Option<rayon::ThreadPool>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates a new engine with no position and default options.
    pub fn new() -> Self {
        Engine {
            position: None,
            options: HashMap::new(),
            selector: MoveSelector::new(SearchConfig::default()),
            pool: None,
        }
    }

    /// Resets the position for a new game. Options are kept.
    pub fn new_game(&mut self) {
        self.position = None;
    }

    /// Sets the current position from a FEN string and plays `moves` on it.
    ///
    /// On error the previous position is left in place.
    pub fn set_position(&mut self, fen: &str, moves: &[String]) -> Result<(), EngineError> {
        let (mut board, mut side) = parse_fen(fen)?;
        for (index, text) in moves.iter().enumerate() {
            let mv = parse_move(text, &board, side).map_err(|source| EngineError::Move {
                index,
                text: text.clone(),
                source,
            })?;
            board = mv.apply(&board);
            side = side.opponent();
        }
        self.position = Some((board, side));
        Ok(())
    }

    /// Validates and stores an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), EngineError> {
        let require = |value: Option<String>| {
            value.ok_or_else(|| EngineError::MissingValue { name: name.clone() })
        };
        let invalid = |value: &str| EngineError::InvalidValue {
            name: name.clone(),
            value: value.to_string(),
        };

        let value = match name.as_str() {
            "Mode" => {
                let v = require(value)?;
                v.parse::<SearchMode>()?;
                v
            }
            "Scoring" => {
                let v = require(value)?;
                v.parse::<CandidateScoring>()?;
                v
            }
            "Depth" => {
                let v = require(value)?;
                match v.parse::<u32>() {
                    Ok(d) if d <= MAX_DEPTH => v,
                    _ => return Err(invalid(&v)),
                }
            }
            "Threads" => {
                let v = require(value)?;
                let threads = match v.parse::<usize>() {
                    Ok(t) if (1..=MAX_THREADS).contains(&t) => t,
                    _ => return Err(invalid(&v)),
                };
                self.pool = build_pool(threads);
                v
            }
            "Seed" => {
                let v = require(value)?;
                let seed = v.parse::<u64>().map_err(|_| invalid(&v))?;
                let config = *self.selector.config();
                self.selector = if seed != 0 {
                    MoveSelector::seeded(config, seed)
                } else {
                    MoveSelector::with_rng(config, SmallRng::from_entropy())
                };
                v
            }
            _ => return Err(EngineError::UnknownOption(name.clone())),
        };

        self.options.insert(name, value);
        Ok(())
    }

    fn option<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.options.get(name).and_then(|v| v.parse::<T>().ok())
    }

    /// Builds the search configuration for one `go`, letting its parameters
    /// override the stored options.
    pub fn search_config(&self, params: &GoParams) -> SearchConfig {
        let mode = params
            .mode
            .or_else(|| self.option::<SearchMode>("Mode"))
            .unwrap_or(SearchMode::AlphaBeta);
        let depth = params
            .depth
            .map(|d| d.min(MAX_DEPTH))
            .or_else(|| self.option::<u32>("Depth"))
            .unwrap_or_else(|| mode.default_depth());
        let scoring = self
            .option::<CandidateScoring>("Scoring")
            .unwrap_or(CandidateScoring::BestLeaf);

        SearchConfig::for_mode(mode)
            .with_depth(depth)
            .with_parallel(self.pool.is_some())
            .with_scoring(scoring)
    }

    /// Handles the handshake: writes id, options and `cuiok`.
    pub fn handle_cui<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name draughts-engine {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author draughts-engine developers")?;
        writeln!(
            out,
            "option name Mode type combo default alphabeta var alphabeta var minimax"
        )?;
        writeln!(
            out,
            "option name Depth type spin default {} min 0 max {}",
            SearchMode::AlphaBeta.default_depth(),
            MAX_DEPTH
        )?;
        writeln!(
            out,
            "option name Threads type spin default 1 min 1 max {}",
            MAX_THREADS
        )?;
        writeln!(
            out,
            "option name Scoring type combo default bestleaf var bestleaf var backed"
        )?;
        writeln!(out, "option name Seed type string default 0")?;
        writeln!(out, "cuiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `go` command: writes an `info` line and the chosen move,
    /// or `bestmove none` if there is nothing to play.
    pub fn handle_go<W: Write>(&mut self, params: &GoParams, out: &mut W) -> io::Result<()> {
        let config = self.search_config(params);
        self.selector.set_config(config);

        let Some((board, side)) = &self.position else {
            warn!("go: no position set");
            writeln!(out, "bestmove none")?;
            return out.flush();
        };

        let selector = &mut self.selector;
        let selection = match &self.pool {
            Some(pool) => pool.install(|| selector.select(board, *side)),
            None => selector.select(board, *side),
        };

        match selection {
            Some(sel) => {
                let score = sel
                    .score()
                    .map_or_else(|| "none".to_string(), |s| s.to_string());
                info!(
                    "{} to move, {} at depth {}: {} ({} candidates)",
                    side.name(),
                    config.mode,
                    config.depth,
                    sel.chosen,
                    sel.candidates
                );
                writeln!(
                    out,
                    "info depth {} nodes {} score {} candidates {}",
                    config.depth, sel.nodes, score, sel.candidates
                )?;
                writeln!(out, "bestmove {}", format_move(&sel.chosen))?;
            }
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }
}

/// Builds a worker pool for parallel root search, or `None` for one thread.
fn build_pool(threads: usize) -> Option<rayon::ThreadPool> {
    if threads <= 1 {
        return None;
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!("failed to build thread pool, searching sequentially: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::legal_moves;
    use crate::protocol::INITIAL_FEN;

    fn go(engine: &mut Engine, params: GoParams) -> String {
        let mut output = Vec::new();
        engine.handle_go(&params, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn bestmove(output: &str) -> &str {
        output
            .lines()
            .find_map(|l| l.strip_prefix("bestmove "))
            .unwrap()
    }

    fn shallow() -> GoParams {
        GoParams {
            depth: Some(2),
            mode: None,
        }
    }

    #[test]
    fn new_engine_has_no_state() {
        let engine = Engine::new();
        assert!(engine.position.is_none());
        assert!(engine.options.is_empty());
    }

    #[test]
    fn new_game_resets_position() {
        let mut engine = Engine::new();
        engine.set_position(INITIAL_FEN, &[]).unwrap();
        engine.new_game();
        assert!(engine.position.is_none());
    }

    #[test]
    fn set_position_plays_moves() {
        let mut engine = Engine::new();
        let moves = vec!["32-28".to_string(), "19-23".to_string()];
        engine.set_position(INITIAL_FEN, &moves).unwrap();
        let (board, side) = engine.position.as_ref().unwrap();
        assert_eq!(*side, Player::White);
        assert_eq!(board.owner(28), Some(Player::White));
        assert_eq!(board.owner(23), Some(Player::Black));
        assert!(board.is_empty(32));
        assert!(board.is_empty(19));
    }

    #[test]
    fn bad_position_keeps_previous() {
        let mut engine = Engine::new();
        engine.set_position(INITIAL_FEN, &[]).unwrap();

        assert!(matches!(
            engine.set_position("garbage", &[]),
            Err(EngineError::Fen(_))
        ));
        let illegal = vec!["32-28".to_string(), "32-28".to_string()];
        assert!(matches!(
            engine.set_position(INITIAL_FEN, &illegal),
            Err(EngineError::Move { index: 1, .. })
        ));
        assert_eq!(engine.position, Some((Board::starting(), Player::White)));
    }

    #[test]
    fn set_option_validates() {
        let mut engine = Engine::new();
        engine
            .set_option("Mode".to_string(), Some("minimax".to_string()))
            .unwrap();
        assert_eq!(engine.options.get("Mode"), Some(&"minimax".to_string()));

        assert!(matches!(
            engine.set_option("Mode".to_string(), Some("mcts".to_string())),
            Err(EngineError::Config(ConfigError::UnknownMode(_)))
        ));
        assert!(matches!(
            engine.set_option("Depth".to_string(), Some("99".to_string())),
            Err(EngineError::InvalidValue { .. })
        ));
        assert!(matches!(
            engine.set_option("Threads".to_string(), None),
            Err(EngineError::MissingValue { .. })
        ));
        assert!(matches!(
            engine.set_option("Hash".to_string(), Some("64".to_string())),
            Err(EngineError::UnknownOption(_))
        ));
        assert_eq!(engine.options.len(), 1);
    }

    #[test]
    fn search_config_from_options_and_params() {
        let mut engine = Engine::new();
        assert_eq!(engine.search_config(&GoParams::default()), SearchConfig::alpha_beta());

        engine
            .set_option("Mode".to_string(), Some("minimax".to_string()))
            .unwrap();
        assert_eq!(engine.search_config(&GoParams::default()).depth, 4);

        engine
            .set_option("Depth".to_string(), Some("3".to_string()))
            .unwrap();
        engine
            .set_option("Scoring".to_string(), Some("backed".to_string()))
            .unwrap();
        let config = engine.search_config(&GoParams::default());
        assert_eq!(config.mode, SearchMode::Minimax);
        assert_eq!(config.depth, 3);
        assert_eq!(config.scoring, CandidateScoring::Backed);

        let config = engine.search_config(&GoParams {
            depth: Some(1),
            mode: Some(SearchMode::AlphaBeta),
        });
        assert_eq!(config.mode, SearchMode::AlphaBeta);
        assert_eq!(config.depth, 1);
    }

    #[test]
    fn handle_go_outputs_legal_bestmove() {
        let mut engine = Engine::new();
        engine.set_position(INITIAL_FEN, &[]).unwrap();
        let output = go(&mut engine, shallow());

        let info = output.lines().next().unwrap();
        assert!(info.starts_with("info depth 2 nodes "), "{}", info);
        assert!(info.ends_with("candidates 9"), "{}", info);

        let legal: Vec<String> = legal_moves(&Board::starting(), Player::White)
            .iter()
            .map(format_move)
            .collect();
        assert!(legal.contains(&bestmove(&output).to_string()));
    }

    #[test]
    fn handle_go_takes_last_piece() {
        let mut engine = Engine::new();
        engine.set_position("W:W28:B22", &[]).unwrap();
        let output = go(&mut engine, GoParams::default());
        assert_eq!(bestmove(&output), "28x17");
        // Nothing is left to search after the capture, so the pick is random.
        assert!(output.contains("score none "), "{}", output);
    }

    #[test]
    fn handle_go_without_moves_or_position() {
        let mut engine = Engine::new();
        assert_eq!(go(&mut engine, shallow()).trim(), "bestmove none");

        engine.set_position("B:W28:B", &[]).unwrap();
        assert_eq!(go(&mut engine, shallow()).trim(), "bestmove none");
    }

    #[test]
    fn seeded_engines_agree_with_and_without_threads() {
        let play = |threads: &str| {
            let mut engine = Engine::new();
            engine
                .set_option("Seed".to_string(), Some("17".to_string()))
                .unwrap();
            engine
                .set_option("Threads".to_string(), Some(threads.to_string()))
                .unwrap();
            engine.set_position(INITIAL_FEN, &[]).unwrap();
            (0..3)
                .map(|_| bestmove(&go(&mut engine, shallow())).to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(play("1"), play("4"));
    }

    #[test]
    fn handle_cui_outputs_handshake() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_cui(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.starts_with("id name draughts-engine"));
        assert!(output_str.contains("option name Mode"));
        assert!(output_str.contains("option name Threads"));
        assert_eq!(output_str.lines().last(), Some("cuiok"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_isready(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().trim(), "readyok");
    }
}
