use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::min_max::cache::{ArrayCache, Cache};
use crate::min_max::stats::{SimpleStats, Stats};
use crate::min_max::Searcher;
use crate::ttt::{find_immediate_win, GameBoard, Marks};

/// How hard the computer plays.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Strength {
    /// Any empty cell, uniformly.
    #[strum(to_string = "random", serialize = "easy")]
    Random,
    /// Completes its own line when it can, otherwise random. Never blocks.
    #[strum(to_string = "tactical", serialize = "medium")]
    Tactical,
    /// Full minimax. Never loses.
    #[strum(to_string = "optimal", serialize = "unbeatable")]
    Optimal,
}

impl Strength {
    pub fn choose_move<R: Rng + ?Sized>(self, state: &GameBoard, marks: Marks, rng: &mut R) -> Result<usize> {
        match self {
            Strength::Random => choose_random_move(state, rng),
            Strength::Tactical => choose_tactical_move(state, marks, rng),
            Strength::Optimal => choose_optimal_move(&mut Searcher::new(marks), state),
        }
    }
}

pub fn choose_random_move<R: Rng + ?Sized>(state: &GameBoard, rng: &mut R) -> Result<usize> {
    state.empty_indices()
        .choose(rng)
        .copied()
        .ok_or(Error::InvalidState { reason: "no empty cell to move to" })
}

pub fn choose_tactical_move<R: Rng + ?Sized>(state: &GameBoard, marks: Marks, rng: &mut R) -> Result<usize> {
    match find_immediate_win(state, marks.ai) {
        Some(index) => Ok(index),
        None => choose_random_move(state, rng),
    }
}

pub fn choose_optimal_move<C: Cache, S: Stats>(searcher: &mut Searcher<C, S>, state: &GameBoard) -> Result<usize> {
    searcher.best_move(state).map(|m| m.min_max_move)
}

/// A computer player for one game: a strength, its marks and a random source.
///
/// The optimal strength keeps one cached searcher for all of its turns.
pub struct Opponent<R: Rng = ThreadRng> {
    strength: Strength,
    marks: Marks,
    rng: R,
    searcher: Searcher<ArrayCache, SimpleStats>,
}

impl Opponent {
    pub fn new(strength: Strength, marks: Marks) -> Self {
        Self::with_rng(strength, marks, rand::thread_rng())
    }
}

impl<R: Rng> Opponent<R> {
    pub fn with_rng(strength: Strength, marks: Marks, rng: R) -> Self {
        let searcher = Searcher::with(marks, ArrayCache::new(), SimpleStats::default()).reduce_symmetry(true);
        Self { strength, marks, rng, searcher }
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn marks(&self) -> Marks {
        self.marks
    }

    pub fn stats(&self) -> &SimpleStats {
        &self.searcher.stats
    }

    #[instrument(level = "debug", skip(self, state), fields(strength = %self.strength, ai = %self.marks.ai))]
    pub fn choose_move(&mut self, state: &GameBoard) -> Result<usize> {
        if state.status().is_terminal() {
            return Err(Error::InvalidState { reason: "game is already over" });
        }
        let index = match self.strength {
            Strength::Random => choose_random_move(state, &mut self.rng)?,
            Strength::Tactical => choose_tactical_move(state, self.marks, &mut self.rng)?,
            Strength::Optimal => choose_optimal_move(&mut self.searcher, state)?,
        };
        debug!(index, "chose move");
        Ok(index)
    }
}
