//! Reversi-AB: play Othello/Reversi against an exhaustive alpha-beta searcher.
//!
//! ## Usage
//!
//! - `reversi-ab` - Play search vs random on the default board
//! - `reversi-ab play --first human --second search` - Play against the engine
//! - `reversi-ab demo` - Show the rules engine and one short game
//!
//! Set `RUST_LOG=reversi_ab=debug` to see the search evaluate each root action.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reversi_ab::board::{Board, Mark};
use reversi_ab::constants::{DEFAULT_SIZE, STANDARD_SIZE};
use reversi_ab::game::Game;
use reversi_ab::player::{Player, PlayerKind, RandomPlayer, SearchBot};
use reversi_ab::state::State;

/// Reversi-AB: Othello/Reversi with full-depth alpha-beta search
#[derive(Parser)]
#[command(name = "reversi-ab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full game between two players
    Play(PlayArgs),
    /// Run a short demo of the engine
    Demo,
}

#[derive(Args)]
struct PlayArgs {
    /// Board size (NxN, even); search is exhaustive, so keep it small
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Player for X
    #[arg(long, value_enum, default_value_t = PlayerKind::Search)]
    first: PlayerKind,
    /// Player for O
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    second: PlayerKind,
    /// Seed for the starting player and random moves
    #[arg(long)]
    seed: Option<u64>,
    /// Pause before each random move, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            first: PlayerKind::Search,
            second: PlayerKind::Random,
            seed: None,
            delay_ms: 0,
        }
    }
}

const REFERENCE_GRID: &str = "
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . X O . . .
. . . O X . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_play(args),
        Some(Commands::Demo) => run_demo(),
        None => run_play(PlayArgs::default()),
    }
}

fn run_play(args: PlayArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let delay = Duration::from_millis(args.delay_ms);

    let state = State::initial(args.size, &mut rng)
        .with_context(|| format!("cannot start a game on a {0}x{0} board", args.size))?;
    let first = Player::from_kind(args.first, "Alice", rng.fork(), delay);
    let second = Player::from_kind(args.second, "Bob", rng.fork(), delay);
    println!("{first} (X) vs {second} (O)\n");

    let mut game = Game::new(first, second, state);
    let outcome = game.run(&mut io::stdout().lock())?;
    match outcome.winner {
        Some(mark) => println!("{mark} wins"),
        None => println!("draw"),
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Reversi-AB: Othello with exhaustive alpha-beta search\n");

    // Demo 1: rules engine on the standard board
    println!("=== {STANDARD_SIZE}x{STANDARD_SIZE} Rules Demo ===");
    let board = Board::parse(STANDARD_SIZE, REFERENCE_GRID)?;
    let state = State::from_board(board, Mark::First);
    print!("{state}");
    let actions: Vec<String> = state.actions().iter().map(|a| a.to_string()).collect();
    println!("Legal actions: {}\n", actions.join(", "));

    // Demo 2: search against random on a small board
    println!("=== {DEFAULT_SIZE}x{DEFAULT_SIZE} Search Demo ===");
    let state = State::initial_with(DEFAULT_SIZE, Mark::First)?;
    let first = Player::Search(SearchBot::new("Alice"));
    let second = Player::Random(RandomPlayer::new(
        "Bob",
        fastrand::Rng::with_seed(1),
        Duration::ZERO,
    ));
    let outcome = Game::new(first, second, state).run(&mut io::stdout().lock())?;
    println!("Plies played: {}", outcome.plies);
    Ok(())
}
