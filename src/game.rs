//! Game driver: alternates players until the game is over.

use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::board::Mark;
use crate::constants::MAX_REJECTED_ACTIONS;
use crate::player::Player;
use crate::state::State;

/// Final result of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Cells owned by the first player
    pub first: usize,
    /// Cells owned by the second player
    pub second: usize,
    /// Placements made during the game
    pub plies: usize,
    /// `None` on a tie
    pub winner: Option<Mark>,
}

pub struct Game {
    /// Indexed by mark: first player, then second player
    players: [Player; 2],
    state: State,
}

impl Game {
    pub fn new(first: Player, second: Player, state: State) -> Self {
        Self {
            players: [first, second],
            state,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    fn seat(mark: Mark) -> usize {
        match mark {
            Mark::First => 0,
            _ => 1,
        }
    }

    /// Play until the state is terminal, narrating the game to `out`.
    ///
    /// A player without legal actions passes automatically. Rejected actions are
    /// reported and the same player is asked again.
    ///
    /// # Errors
    /// If a player fails to produce an action, keeps producing illegal ones, or
    /// `out` cannot be written.
    pub fn run(&mut self, out: &mut impl Write) -> Result<Outcome> {
        let mut rejected = 0;
        while !self.state.terminal() {
            let mark = self.state.to_move();
            if self.state.actions().is_empty() {
                info!(%mark, ply = self.state.ply(), "no legal action, passing");
                writeln!(out, "{mark} has no legal move and passes")?;
                self.state = self.state.pass()?;
                continue;
            }

            write!(out, "{}", self.state)?;
            let player = &mut self.players[Self::seat(mark)];
            let action = player
                .choose(&self.state)
                .with_context(|| format!("{player} failed to choose a move"))?;

            match self.state.result(&action) {
                Ok(next) => {
                    writeln!(out, "{} plays {action}", player.name())?;
                    self.state = next;
                    rejected = 0;
                }
                Err(err) => {
                    warn!(player = player.name(), %action, %err, "action rejected");
                    writeln!(out, "{err}")?;
                    rejected += 1;
                    if rejected >= MAX_REJECTED_ACTIONS {
                        bail!("{player} had {rejected} actions rejected in a row");
                    }
                }
            }
        }

        let outcome = Outcome {
            first: self.state.utility(Mark::First),
            second: self.state.utility(Mark::Second),
            plies: self.state.ply(),
            winner: self.state.winner(),
        };

        write!(out, "{}", self.state)?;
        writeln!(out, "game over!")?;
        writeln!(out, "{}'s score: {}", Mark::First, outcome.first)?;
        writeln!(out, "{}'s score: {}", Mark::Second, outcome.second)?;
        info!(
            first = outcome.first,
            second = outcome.second,
            plies = outcome.plies,
            "game over"
        );
        Ok(outcome)
    }
}
