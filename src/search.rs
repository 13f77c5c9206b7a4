//! Exhaustive game-tree search with alpha-beta pruning.
//!
//! This module implements:
//! - [`SearchPlayer`], a minimax searcher with fail-hard alpha-beta bounds that
//!   explores every line down to a terminal state (no depth or time cutoff)
//! - [`minimax`], the unpruned reference search used to check the pruned one
//!
//! Leaves are scored with [`State::utility`] for the searching player. When the
//! side to move is stuck in a non-terminal state, the search continues from the
//! passed state with the roles of the max and min levels swapped.

use tracing::debug;

use crate::board::Mark;
use crate::error::GameError;
use crate::state::{Action, State};

/// Leaf value of the search.
pub type Value = i32;

/// Counters collected during one call to [`SearchPlayer::choose`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States visited, including the root's successors
    pub nodes: u64,
    /// Branches abandoned by an alpha or beta cutoff
    pub cutoffs: u64,
}

/// A player that picks moves by full-depth alpha-beta search.
#[derive(Clone, Debug, Default)]
pub struct SearchPlayer {
    /// The mark being maximized in the current search
    mark: Mark,
    stats: SearchStats,
}

impl SearchPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the most recent search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Choose the action with the best guaranteed utility for the player to move.
    ///
    /// Actions are tried in generation order and ties keep the earliest one, so
    /// the choice is identical to that of [`minimax`].
    ///
    /// # Errors
    /// [`GameError::NoLegalActions`] if the player to move cannot place a mark.
    pub fn choose(&mut self, state: &State) -> Result<Action, GameError> {
        let actions = state.actions();
        if actions.is_empty() {
            return Err(GameError::NoLegalActions);
        }
        self.mark = state.to_move();
        self.stats = SearchStats::default();

        let mut best = actions[0];
        let mut best_val = Value::MIN;
        for action in actions {
            let next = state.result(&action)?;
            let val = self.min_value(&next, Value::MIN, Value::MAX)?;
            debug!(%action, value = val, "action would lead to");
            if val > best_val {
                best = action;
                best_val = val;
            }
        }

        debug!(
            chosen = %best,
            value = best_val,
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            "search finished"
        );
        Ok(best)
    }

    fn max_value(
        &mut self,
        state: &State,
        mut alpha: Value,
        beta: Value,
    ) -> Result<Value, GameError> {
        self.stats.nodes += 1;
        let actions = state.actions();
        if actions.is_empty() {
            if state.terminal() {
                return Ok(leaf_value(state, self.mark));
            }
            return self.min_value(&state.pass()?, alpha, beta);
        }

        let mut v = Value::MIN;
        for action in &actions {
            let next = state.result(action)?;
            v = v.max(self.min_value(&next, alpha, beta)?);
            if v >= beta {
                self.stats.cutoffs += 1;
                return Ok(v);
            }
            alpha = alpha.max(v);
        }
        Ok(v)
    }

    fn min_value(
        &mut self,
        state: &State,
        alpha: Value,
        mut beta: Value,
    ) -> Result<Value, GameError> {
        self.stats.nodes += 1;
        let actions = state.actions();
        if actions.is_empty() {
            if state.terminal() {
                return Ok(leaf_value(state, self.mark));
            }
            return self.max_value(&state.pass()?, alpha, beta);
        }

        let mut v = Value::MAX;
        for action in &actions {
            let next = state.result(action)?;
            v = v.min(self.max_value(&next, alpha, beta)?);
            if v <= alpha {
                self.stats.cutoffs += 1;
                return Ok(v);
            }
            beta = beta.min(v);
        }
        Ok(v)
    }
}

fn leaf_value(state: &State, mark: Mark) -> Value {
    // Utility is bounded by the number of cells, which fits comfortably
    state.utility(mark) as Value
}

/// Plain minimax without pruning, choosing like [`SearchPlayer::choose`].
///
/// Visits the whole game tree below `state`; only practical on small boards.
pub fn minimax(state: &State) -> Result<Action, GameError> {
    let actions = state.actions();
    if actions.is_empty() {
        return Err(GameError::NoLegalActions);
    }
    let mark = state.to_move();

    let mut best = actions[0];
    let mut best_val = Value::MIN;
    for action in actions {
        let val = minimax_value(&state.result(&action)?, mark)?;
        if val > best_val {
            best = action;
            best_val = val;
        }
    }
    Ok(best)
}

/// Exact game value of `state` for `mark`.
pub fn minimax_value(state: &State, mark: Mark) -> Result<Value, GameError> {
    let actions = state.actions();
    if actions.is_empty() {
        if state.terminal() {
            return Ok(leaf_value(state, mark));
        }
        return minimax_value(&state.pass()?, mark);
    }

    let maximizing = state.to_move() == mark;
    let mut best = if maximizing { Value::MIN } else { Value::MAX };
    for action in &actions {
        let v = minimax_value(&state.result(action)?, mark)?;
        best = if maximizing { best.max(v) } else { best.min(v) };
    }
    Ok(best)
}
