//! Game arena.
//!
//! Plays complete games between two in-process move providers, saves them
//! as JSON replay files, and replays saved games with full validation.
//! Competitions of several games run sequentially or concurrently on a
//! rayon pool.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Player};
use crate::movegen::legal_moves;
use crate::search::{ConfigError, MoveSelector, SearchConfig, SearchMode};

/// Moves each player may make before the game is declared a draw.
pub const MAX_MOVES: usize = 100;

/// Errors from reading, writing or validating replay files.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("replay file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid replay JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("move {index} ({mv}) is not legal for {player}")]
    IllegalMove {
        index: usize,
        mv: String,
        player: &'static str,
    },

    #[error("replay records '{recorded}' but the final position says '{replayed}'")]
    OutcomeMismatch {
        recorded: GameOutcome,
        replayed: GameOutcome,
    },
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    WhiteWon,
    BlackWon,
    Draw,
}

impl GameOutcome {
    /// The outcome when `player` wins.
    pub const fn won_by(player: Player) -> Self {
        match player {
            Player::White => GameOutcome::WhiteWon,
            Player::Black => GameOutcome::BlackWon,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameOutcome::WhiteWon => "white won",
            GameOutcome::BlackWon => "black won",
            GameOutcome::Draw => "draw",
        })
    }
}

/// Something that picks moves for one side of a game.
pub trait MoveProvider: Send {
    /// Returns the move to play, or `None` to give up the choice. The arena
    /// substitutes a random legal move for `None` or an illegal answer.
    fn choose_move(&mut self, board: &Board, player: Player) -> Option<Move>;
}

/// Plays the move picked by a tree search.
pub struct SearchPlayer {
    selector: MoveSelector,
}

impl SearchPlayer {
    pub fn new(config: SearchConfig, seed: u64) -> Self {
        SearchPlayer {
            selector: MoveSelector::seeded(config, seed),
        }
    }
}

impl MoveProvider for SearchPlayer {
    fn choose_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        self.selector.pick_move(board, player)
    }
}

/// Plays uniformly random legal moves.
pub struct RandomPlayer {
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        RandomPlayer {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MoveProvider for RandomPlayer {
    fn choose_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        legal_moves(board, player).choose(&mut self.rng).cloned()
    }
}

/// The kind of provider seated on one side, parsed from
/// `alphabeta[:depth]`, `minimax[:depth]` or `random`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Search(SearchConfig),
    Random,
}

impl PlayerKind {
    /// Builds a fresh provider of this kind.
    pub fn provider(&self, seed: u64) -> Box<dyn MoveProvider> {
        match *self {
            PlayerKind::Search(config) => Box::new(SearchPlayer::new(config, seed)),
            PlayerKind::Random => Box::new(RandomPlayer::new(seed)),
        }
    }
}

impl Default for PlayerKind {
    fn default() -> Self {
        PlayerKind::Search(SearchConfig::alpha_beta())
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Search(config) => write!(f, "{}:{}", config.mode, config.depth),
            PlayerKind::Random => f.write_str("random"),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, depth) = match s.split_once(':') {
            Some((name, depth)) => (name, Some(depth)),
            None => (s, None),
        };

        if name.eq_ignore_ascii_case("random") {
            return match depth {
                None => Ok(PlayerKind::Random),
                Some(d) => Err(ConfigError::InvalidDepth(d.to_string())),
            };
        }

        let mode = name
            .parse::<SearchMode>()
            .map_err(|_| ConfigError::UnknownPlayerKind(s.to_string()))?;
        let config = SearchConfig::for_mode(mode);
        match depth {
            None => Ok(PlayerKind::Search(config)),
            Some(d) => d
                .parse::<u32>()
                .map(|depth| PlayerKind::Search(config.with_depth(depth)))
                .map_err(|_| ConfigError::InvalidDepth(d.to_string())),
        }
    }
}

/// Configuration for a competition.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// Moves each player may make before the game is drawn.
    pub max_moves: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress the summary output.
    pub quiet: bool,
    /// Where to save replay files, if anywhere.
    pub replay_dir: Option<PathBuf>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            num_games: 1,
            white: PlayerKind::default(),
            black: PlayerKind::default(),
            max_moves: MAX_MOVES,
            threads: 1,
            seed: 0,
            quiet: false,
            replay_dir: None,
        }
    }
}

/// A finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Sequential game ID, starting at 0.
    pub game_id: usize,
    /// Every move played, White's first.
    pub moves: Vec<Move>,
    pub outcome: GameOutcome,
}

impl GameRecord {
    /// Number of full turns, counting a lone White move as a turn.
    pub fn turns(&self) -> usize {
        self.moves.len().div_ceil(2)
    }
}

/// Asks `provider` for a move, replacing a missing or illegal answer with a
/// random legal move. Returns `None` only when `allowed` is empty.
fn next_move<R: Rng>(
    provider: &mut dyn MoveProvider,
    board: &Board,
    player: Player,
    allowed: &[Move],
    rng: &mut R,
) -> Option<Move> {
    match provider.choose_move(board, player) {
        Some(mv) if allowed.contains(&mv) => Some(mv),
        picked => {
            let shown = picked.map_or_else(|| "none".to_string(), |m| m.to_string());
            warn!(
                "player {} picked a move that is not allowed ({}). Picking a random move instead",
                player.name(),
                shown
            );
            allowed.choose(rng).cloned()
        }
    }
}

/// Plays one game from `board` with White to move.
///
/// Each side moves at most `max_moves` times; a side with no legal move on
/// its turn loses, and reaching the limit is a draw.
pub fn play_from<R: Rng>(
    game_id: usize,
    mut board: Board,
    white: &mut dyn MoveProvider,
    black: &mut dyn MoveProvider,
    max_moves: usize,
    rng: &mut R,
) -> GameRecord {
    let mut moves = Vec::new();

    for move_number in 1..=max_moves {
        for player in [Player::White, Player::Black] {
            let allowed = legal_moves(&board, player);
            if allowed.is_empty() {
                let outcome = GameOutcome::won_by(player.opponent());
                info!("Game over: {}", outcome);
                return GameRecord { game_id, moves, outcome };
            }

            let provider: &mut dyn MoveProvider = match player {
                Player::White => &mut *white,
                Player::Black => &mut *black,
            };
            let Some(mv) = next_move(provider, &board, player, &allowed, rng) else {
                continue;
            };

            info!("Move {:3}: {} plays {}", move_number, player.name(), mv);
            board = mv.apply(&board);
            moves.push(mv);
        }
    }

    info!("Game over: maximum limit of moves reached");
    GameRecord {
        game_id,
        moves,
        outcome: GameOutcome::Draw,
    }
}

/// Plays one game from the starting position.
pub fn play_game<R: Rng>(
    game_id: usize,
    white: &mut dyn MoveProvider,
    black: &mut dyn MoveProvider,
    max_moves: usize,
    rng: &mut R,
) -> GameRecord {
    play_from(game_id, Board::starting(), white, black, max_moves, rng)
}

/// The on-disk form of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayFile {
    pub moves: Vec<Move>,
    #[serde(rename = "gameOverReason")]
    pub game_over_reason: GameOutcome,
}

impl From<&GameRecord> for ReplayFile {
    fn from(game: &GameRecord) -> Self {
        ReplayFile {
            moves: game.moves.clone(),
            game_over_reason: game.outcome,
        }
    }
}

/// Writes a replay as pretty-printed JSON.
pub fn save_replay(path: &Path, replay: &ReplayFile) -> Result<(), ReplayError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, replay)?;
    writer.flush()?;
    Ok(())
}

/// Reads a replay file.
pub fn load_replay(path: &Path) -> Result<ReplayFile, ReplayError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Replays a game from the starting position, checking that every move is
/// legal and that the recorded outcome agrees with the final position.
/// Returns the final board.
///
/// A recorded draw is accepted whenever the side to move can still move,
/// since the move limit of the recording arena is not stored.
pub fn replay_game(replay: &ReplayFile) -> Result<Board, ReplayError> {
    let mut board = Board::starting();
    let mut side = Player::White;

    for (index, mv) in replay.moves.iter().enumerate() {
        if !legal_moves(&board, side).contains(mv) {
            return Err(ReplayError::IllegalMove {
                index,
                mv: mv.to_string(),
                player: side.name(),
            });
        }
        info!("Move {:3}: {} plays {}", index / 2 + 1, side.name(), mv);
        board = mv.apply(&board);
        side = side.opponent();
    }

    let stuck = legal_moves(&board, side).is_empty();
    let recorded = replay.game_over_reason;
    let consistent = if stuck {
        recorded == GameOutcome::won_by(side.opponent())
    } else {
        recorded == GameOutcome::Draw
    };
    if !consistent {
        let replayed = if stuck {
            GameOutcome::won_by(side.opponent())
        } else {
            GameOutcome::Draw
        };
        return Err(ReplayError::OutcomeMismatch { recorded, replayed });
    }

    info!("Game over: {}", recorded);
    Ok(board)
}

/// Per-game random source: derived from the seed and game index, or from
/// entropy when the seed is 0.
fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays game `game_id` of a competition and saves its replay if configured.
fn run_one(config: &ArenaConfig, game_id: usize, run_id: u64) -> GameRecord {
    info!(
        "Starting game {} of {}, white: [{}], black: [{}]",
        game_id + 1,
        config.num_games,
        config.white,
        config.black
    );

    let start = Instant::now();
    let mut rng = game_rng(config.seed, game_id);
    let mut white = config.white.provider(rng.gen());
    let mut black = config.black.provider(rng.gen());
    let game = play_game(
        game_id,
        white.as_mut(),
        black.as_mut(),
        config.max_moves,
        &mut rng,
    );
    info!(
        "Game {}/{}: {} in {} turns ({:.1}s)",
        game_id + 1,
        config.num_games,
        game.outcome,
        game.turns(),
        start.elapsed().as_secs_f64()
    );

    if let Some(dir) = &config.replay_dir {
        let path = dir.join(format!("game-{}-{}.replay", run_id, game_id + 1));
        match save_replay(&path, &ReplayFile::from(&game)) {
            Ok(()) => info!("Game saved to {}", path.display()),
            Err(e) => warn!("failed to save {}: {}", path.display(), e),
        }
    }

    game
}

/// Runs a competition and returns the games in order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
/// With a fixed seed the records do not depend on the thread count.
pub fn run_competition(config: &ArenaConfig) -> Vec<GameRecord> {
    let run_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    if config.threads > 1 {
        use rayon::prelude::*;

        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
        {
            Ok(pool) => {
                return pool.install(|| {
                    (0..config.num_games)
                        .into_par_iter()
                        .map(|i| run_one(config, i, run_id))
                        .collect()
                });
            }
            Err(e) => warn!("failed to build thread pool, playing sequentially: {}", e),
        }
    }

    (0..config.num_games)
        .map(|i| run_one(config, i, run_id))
        .collect()
}

/// Outcome counts over a set of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn of(games: &[GameRecord]) -> Self {
        let mut tally = Tally::default();
        for game in games {
            match game.outcome {
                GameOutcome::WhiteWon => tally.white_wins += 1,
                GameOutcome::BlackWon => tally.black_wins += 1,
                GameOutcome::Draw => tally.draws += 1,
            }
        }
        tally
    }
}

/// Writes the per-game results and the overall tally.
pub fn print_summary<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    let rule = "-".repeat(25);
    writeln!(out, "{} Summary {}", rule, rule)?;
    for game in games {
        writeln!(
            out,
            "Game {}: {} turns, outcome: {}",
            game.game_id + 1,
            game.turns(),
            game.outcome
        )?;
    }

    let tally = Tally::of(games);
    writeln!(out)?;
    writeln!(out, "White wins: {}", tally.white_wins)?;
    writeln!(out, "Black wins: {}", tally.black_wins)?;
    writeln!(out, "Draws     : {}", tally.draws)?;
    out.flush()
}
