//! Mancala AI - plays Kalah for a game manager.
//!
//! The process:
//! 1. Announces its name on stdout
//! 2. Reads the side, depth limit, caching flag and algorithm
//! 3. Answers every `SCORE` turn with a pocket index until `FINAL` or end
//!    of input
//!
//! stdout is reserved for the protocol; logs go to stderr.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

mod config;
mod engine;
mod protocol;

use crate::config::Config;
use crate::engine::Engine;
use crate::protocol::{Session, Turn};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(())
}

/// Play one game over the given streams.
fn run<R: BufRead, W: Write>(input: R, output: W, config: &Config) -> Result<()> {
    let mut session = Session::new(input, output);
    session.announce(&config.name)?;

    let handshake = session.read_handshake()?;
    let mut engine = Engine::new(&handshake, config).context("failed to set up the engine")?;
    info!(side = %engine.side(), "Playing as {}", engine.side());
    engine.log_settings();

    let mut moves = 0usize;
    loop {
        match session.next_turn()? {
            Some(Turn::Play { board, scores }) => {
                debug!(dark = scores[0], light = scores[1], "turn\n{}", board);
                let mv = engine
                    .choose(&board)
                    .with_context(|| format!("no move for {} on\n{}", engine.side(), board))?;
                session.send_move(mv)?;
                moves += 1;
                debug!(%mv, algorithm = %engine.algorithm(), "sent move");
            }
            Some(Turn::Final { scores }) => {
                info!(dark = scores[0], light = scores[1], moves, "Game over");
                return Ok(());
            }
            None => {
                info!(moves, "Input closed before the final score");
                return Ok(());
            }
        }
    }
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    debug!(
        settings = %serde_json::to_string(&config).context("failed to serialize settings")?,
        "Configuration"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(stdin.lock(), stdout.lock(), &config)
}
