//! go-referee: play a game of Go from the terminal.
//!
//! ## Usage
//!
//! - `go-referee` - 19x19 game with komi 7
//! - `go-referee --size 9 --komi 6` - square board of another size
//! - `go-referee --width 7 --height 5` - rectangular board
//!
//! Commands are read from stdin (type `help`). Logs go to stderr; set
//! `RUST_LOG` or pass `-v`/`-vv` to see them.

use std::io;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use go_referee::constants::{DEFAULT_KOMI, DEFAULT_SIZE};
use go_referee::game::Game;
use go_referee::shell::Shell;

/// go-referee: a Go rules engine with positional superko
#[derive(Parser)]
#[command(name = "go-referee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board width and height (overridden by --width/--height)
    #[arg(short, long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u8).range(1..))]
    size: u8,

    /// Board width (columns)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    width: Option<u8>,

    /// Board height (rows)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    height: Option<u8>,

    /// Points added to White's score
    #[arg(short, long, default_value_t = DEFAULT_KOMI)]
    komi: u32,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let width = cli.width.unwrap_or(cli.size);
    let height = cli.height.unwrap_or(cli.size);
    let game = Game::new(width, height, cli.komi)
        .with_context(|| format!("failed to set up a {width}x{height} board"))?;
    tracing::info!(width, height, komi = cli.komi, "starting game");

    let mut shell = Shell::new(game);
    shell
        .run(io::stdin().lock(), io::stdout().lock())
        .context("terminal I/O failed")?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "go_referee=warn",
        1 => "go_referee=info",
        _ => "go_referee=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(io::stderr)
        .init();
}
