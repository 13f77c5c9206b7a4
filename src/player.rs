//! Move-choosing strategies.
//!
//! Every strategy implements the same capability: given a [`State`], return the
//! [`Action`] to play. The set is closed:
//!
//! - [`HumanPlayer`] reads `row col` lines from an input stream
//! - [`RandomPlayer`] picks uniformly among the legal actions
//! - [`SearchBot`] runs the full-depth alpha-beta search
//!
//! Human input is not checked for legality here; the game driver rejects illegal
//! actions through [`State::result`] and asks again.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use tracing::debug;

use crate::error::GameError;
use crate::search::SearchPlayer;
use crate::state::{Action, State};

/// Strategy selector used on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Moves typed on the console
    Human,
    /// Uniformly random legal moves
    Random,
    /// Exhaustive alpha-beta search
    Search,
}

pub enum Player {
    Human(HumanPlayer),
    Random(RandomPlayer),
    Search(SearchBot),
}

impl Player {
    /// Build a player of the given kind. Human players use stdin and stdout.
    pub fn from_kind(kind: PlayerKind, name: &str, rng: fastrand::Rng, delay: Duration) -> Self {
        match kind {
            PlayerKind::Human => Player::Human(HumanPlayer::stdio(name)),
            PlayerKind::Random => Player::Random(RandomPlayer::new(name, rng, delay)),
            PlayerKind::Search => Player::Search(SearchBot::new(name)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Player::Human(p) => &p.name,
            Player::Random(p) => &p.name,
            Player::Search(p) => &p.name,
        }
    }

    /// Ask the underlying strategy for an action.
    pub fn choose(&mut self, state: &State) -> Result<Action> {
        match self {
            Player::Human(p) => p.choose(state),
            Player::Random(p) => Ok(p.choose(state)?),
            Player::Search(p) => Ok(p.search.choose(state)?),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Player::Human(_) => "human",
            Player::Random(_) => "random",
            Player::Search(_) => "search",
        };
        write!(f, "{kind} player {}", self.name())
    }
}

/// Where a human player's lines come from.
enum Input {
    /// Process stdin, locked for one read at a time
    Stdin,
    Reader(Box<dyn BufRead>),
}

impl Input {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        match self {
            Input::Stdin => io::stdin().lock().read_line(buf),
            Input::Reader(r) => r.read_line(buf),
        }
    }
}

/// Reads moves as `row col` lines.
pub struct HumanPlayer {
    pub name: String,
    input: Input,
    output: Box<dyn Write>,
}

impl HumanPlayer {
    pub fn new(name: &str, input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            name: name.to_string(),
            input: Input::Reader(Box::new(input)),
            output: Box::new(output),
        }
    }

    /// A console player on stdin/stdout.
    pub fn stdio(name: &str) -> Self {
        Self {
            name: name.to_string(),
            input: Input::Stdin,
            output: Box::new(io::stdout()),
        }
    }

    /// Prompt until a line with two coordinates is entered.
    ///
    /// # Errors
    /// When the input is exhausted or cannot be read.
    pub fn choose(&mut self, state: &State) -> Result<Action> {
        let mark = state.to_move();
        let mut line = String::new();
        loop {
            write!(self.output, "{} ({mark}), insert move (row col): ", self.name)?;
            self.output.flush()?;

            line.clear();
            let n = self
                .input
                .read_line(&mut line)
                .with_context(|| format!("reading a move for {}", self.name))?;
            if n == 0 {
                bail!("input closed while waiting for a move from {}", self.name);
            }
            match parse_move(&line) {
                Some((row, col)) => return Ok(Action::new(mark, row, col)),
                None => writeln!(self.output, "expected two non-negative numbers: row col")?,
            }
        }
    }
}

/// Parse `row col`, ignoring surrounding whitespace.
fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

/// Picks a uniformly random legal action.
pub struct RandomPlayer {
    pub name: String,
    rng: fastrand::Rng,
    /// Pause before each move so games can be followed on screen
    delay: Duration,
}

impl RandomPlayer {
    pub fn new(name: &str, rng: fastrand::Rng, delay: Duration) -> Self {
        Self {
            name: name.to_string(),
            rng,
            delay,
        }
    }

    pub fn choose(&mut self, state: &State) -> Result<Action, GameError> {
        let actions = state.actions();
        if actions.is_empty() {
            return Err(GameError::NoLegalActions);
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let action = actions[self.rng.usize(..actions.len())];
        debug!(player = %self.name, %action, choices = actions.len(), "picked randomly");
        Ok(action)
    }
}

/// Named wrapper around [`SearchPlayer`].
pub struct SearchBot {
    pub name: String,
    pub search: SearchPlayer,
}

impl SearchBot {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            search: SearchPlayer::new(),
        }
    }
}
