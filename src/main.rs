//! Draughts engine speaking a line-based text protocol.
//!
//! Reads commands from stdin and writes responses to stdout. Diagnostics go
//! to stderr through `env_logger` (`RUST_LOG`, default `warn`).

use std::io::{self, BufRead};

use log::{error, warn};

use draughts_engine::engine::Engine;
use draughts_engine::protocol::{parse_command, Command};

/// Runs the main protocol loop until `quit` or end of input.
fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("failed to read input: {}", e);
                break;
            }
        };

        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        match cmd {
            Command::Cui => engine.handle_cui(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(name, value) {
                    warn!("setoption: {}", e);
                }
            }
            Command::NewGame => engine.new_game(),
            Command::Position { fen, moves } => {
                if let Err(e) = engine.set_position(&fen, &moves) {
                    warn!("position: {}", e);
                }
            }
            Command::Go(params) => engine.handle_go(&params, &mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
