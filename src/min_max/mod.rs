//! Exhaustive minimax over the 3x3 game tree.
//!
//! Scores are taken from the computer's point of view and only ever come from
//! terminal boards: `+1` the computer's mark won, `-1` the opponent's mark
//! won, `0` draw. The maximizing side stops looking at siblings as soon as a
//! child scores above zero, the minimizing side as soon as one scores below
//! zero. No bounds are passed down, so this is not alpha-beta.

pub mod cache;
pub mod stats;
pub mod symmetry;

use std::fmt::Display;
use std::ops::Not;

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};
use crate::min_max::cache::{Cache, NullCache};
use crate::min_max::stats::{NullStats, Stats};
use crate::min_max::symmetry::{GridSymmetry3x3, GridSymmetryAxes, Symmetry};
use crate::ttt::{GameBoard, Marks, Verdict};

pub const WIN_SCORE: i32 = 1;
pub const DRAW_SCORE: i32 = 0;
pub const LOSS_SCORE: i32 = -1;

#[derive(Eq, PartialEq, Hash)]
#[derive(Debug, Copy, Clone)]
pub enum Player {
    Min,
    Max,
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        match self {
            Player::Min => Player::Max,
            Player::Max => Player::Min,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct ScoredMove<M> {
    pub score: i32,
    pub min_max_move: M,
}

impl<M> ScoredMove<M> {
    pub fn new(score: i32, min_max_move: M) -> ScoredMove<M> {
        ScoredMove { score, min_max_move }
    }
}

/// Score of a finished board, `None` while the game is still open.
pub fn terminal_score(verdict: Verdict, marks: &Marks) -> Option<i32> {
    match verdict {
        Verdict::Win(mark) if mark == marks.ai => Some(WIN_SCORE),
        Verdict::Win(_) => Some(LOSS_SCORE),
        Verdict::Draw => Some(DRAW_SCORE),
        Verdict::Undecided => None,
    }
}

pub struct Searcher<C: Cache = NullCache, S: Stats = NullStats> {
    marks: Marks,
    cache: C,
    pub stats: S,
    reduce_symmetry: bool,
}

impl Searcher {
    pub fn new(marks: Marks) -> Self {
        Self::with(marks, NullCache, NullStats)
    }
}

impl<C: Cache, S: Stats> Searcher<C, S> {
    pub fn with(marks: Marks, cache: C, stats: S) -> Self {
        Self { marks, cache, stats, reduce_symmetry: false }
    }

    /// Only search one cell out of each set of cells that are mirror images
    /// of each other on the current board. Scores are unaffected.
    pub fn reduce_symmetry(mut self, reduce_symmetry: bool) -> Self {
        self.reduce_symmetry = reduce_symmetry;
        self
    }

    pub fn marks(&self) -> Marks {
        self.marks
    }

    /// Every empty cell with the score of the computer moving there, in
    /// ascending cell order.
    #[instrument(level = "debug", skip(self, state), fields(ai = %self.marks.ai))]
    pub fn score_possible_moves(&mut self, state: &GameBoard) -> Result<Vec<ScoredMove<usize>>> {
        if state.status().is_terminal() {
            return Err(Error::InvalidState { reason: "no move to search on a finished board" });
        }
        let symmetry = self.symmetry(state);
        let mut scored_moves = Vec::with_capacity(9);
        for index in self.candidate_moves(state, &symmetry) {
            let next_state = state.copy_with_move(index, self.marks.ai)?;
            let score = self.score(&next_state, Player::Min)?;
            trace!(index, score, "scored root move");
            scored_moves.extend(symmetry.expand(&index).into_iter().map(|index| ScoredMove::new(score, index)));
        }
        scored_moves.sort_by_key(|m| m.min_max_move);
        debug!(moves = ?scored_moves.iter().map(|m| (m.min_max_move, m.score)).collect_vec(), "scored root");
        Ok(scored_moves)
    }

    /// All moves sharing the best score, in ascending cell order.
    pub fn best_moves(&mut self, state: &GameBoard) -> Result<Vec<ScoredMove<usize>>> {
        Ok(self.score_possible_moves(state)?.into_iter().max_set_by_key(|m| m.score))
    }

    /// The lowest cell among the best moves.
    pub fn best_move(&mut self, state: &GameBoard) -> Result<ScoredMove<usize>> {
        self.best_moves(state)?
            .into_iter()
            .next()
            .ok_or(Error::InvalidState { reason: "no empty cell to move to" })
    }

    fn score(&mut self, state: &GameBoard, player: Player) -> Result<i32> {
        self.stats.record_node();
        if let Some(score) = terminal_score(state.status(), &self.marks) {
            self.stats.record_terminal();
            return Ok(score);
        }
        if let Some(score) = self.cache.lookup(state, player) {
            self.stats.record_cache_hit();
            return Ok(score);
        }
        self.stats.record_cache_miss();

        let mark = self.marks.mark_of(player);
        let symmetry = self.symmetry(state);
        let mut best_score = match player {
            Player::Max => i32::MIN,
            Player::Min => i32::MAX,
        };
        for index in self.candidate_moves(state, &symmetry) {
            let next_state = state.copy_with_move(index, mark)?;
            let score = self.score(&next_state, !player)?;
            let decisive = match player {
                Player::Max => score > DRAW_SCORE,
                Player::Min => score < DRAW_SCORE,
            };
            if decisive {
                self.stats.record_short_circuit();
                best_score = score;
                break;
            }
            best_score = match player {
                Player::Max => best_score.max(score),
                Player::Min => best_score.min(score),
            };
        }
        self.cache.cache(state, player, best_score);
        Ok(best_score)
    }

    fn symmetry(&self, state: &GameBoard) -> GridSymmetry3x3 {
        if self.reduce_symmetry {
            GridSymmetry3x3::from(state.cells())
        } else {
            GridSymmetry3x3::new(GridSymmetryAxes::empty())
        }
    }

    fn candidate_moves(&self, state: &GameBoard, symmetry: &GridSymmetry3x3) -> Vec<usize> {
        let mut moves = state.empty_indices();
        if !symmetry.is_trivial() {
            moves.retain(|index| symmetry.canonicalize(index) == *index);
        }
        moves
    }
}

/// Per-cell scores; `None` for cells that were not scored.
pub fn to_score_board(scored_moves: &[ScoredMove<usize>]) -> [Option<i32>; 9] {
    let mut scores = [None; 9];
    for m in scored_moves {
        if let Some(slot) = scores.get_mut(m.min_max_move) {
            *slot = Some(m.score);
        }
    }
    scores
}

pub fn format_3_by_3<E: Display>(board: &[E; 9]) -> String {
    board.chunks(3)
        .map(|row| row.iter().map(|e| format!("{e:>3}")).join(","))
        .join("\n")
}
