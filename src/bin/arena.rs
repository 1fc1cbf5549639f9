//! Game arena CLI.
//!
//! Plays games between two built-in players and saves them as replay files,
//! or replays and validates a saved game.
//!
//! Usage:
//!   cargo run --release --bin arena -- compete alphabeta minimax:3 --num-games 10
//!   cargo run --release --bin arena -- replay game-1700000000-1.replay

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{error, info};

use draughts_engine::arena::{self, ArenaConfig, PlayerKind, MAX_MOVES};

#[derive(Parser, Debug)]
#[command(about = "Draughts game arena runner")]
struct Cli {
    #[command(subcommand)]
    command: SubCommands,
}

#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Run a competition between two players.
    Compete {
        /// Player for white: alphabeta[:depth], minimax[:depth] or random.
        white: PlayerKind,

        /// Player for black: alphabeta[:depth], minimax[:depth] or random.
        black: PlayerKind,

        #[arg(long, default_value_t = 1)]
        num_games: usize,

        /// Moves each player may make before the game is drawn.
        #[arg(long, default_value_t = MAX_MOVES)]
        max_moves: usize,

        /// Games played concurrently.
        #[arg(long, default_value_t = 1)]
        threads: usize,

        /// Random seed, 0 for entropy.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Directory for replay files.
        #[arg(long)]
        replay_dir: Option<PathBuf>,

        /// Only log warnings and skip the summary.
        #[arg(long, default_value = "false")]
        quiet: bool,
    },
    /// Replay and validate a saved game.
    Replay { replay_file: PathBuf },
}

fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    match args.command {
        SubCommands::Compete {
            white,
            black,
            num_games,
            max_moves,
            threads,
            seed,
            replay_dir,
            quiet,
        } => {
            init_logging(quiet);
            let config = ArenaConfig {
                num_games,
                white,
                black,
                max_moves,
                threads,
                seed,
                quiet,
                replay_dir,
            };

            let start = Instant::now();
            let games = arena::run_competition(&config);
            info!(
                "Completed {} games in {:.1}s",
                games.len(),
                start.elapsed().as_secs_f64()
            );

            if !config.quiet {
                if let Err(e) = arena::print_summary(&games, &mut io::stdout().lock()) {
                    error!("failed to print summary: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        SubCommands::Replay { replay_file } => {
            init_logging(false);
            info!("Replaying game: {}", replay_file.display());
            let result = arena::load_replay(&replay_file).and_then(|r| arena::replay_game(&r));
            match result {
                Ok(board) => {
                    print!("{}", board);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("{}: {}", replay_file.display(), e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
