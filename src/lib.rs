//! Move selection for 3x3 tic-tac-toe against a computer opponent.
//!
//! - [`ttt`]: cell states, the terminal evaluator and the one-move win scanner
//! - [`min_max`]: exhaustive minimax with an optional cache and symmetry reduction
//! - [`strategy`]: the random, tactical and optimal strengths
//! - [`game`]: a human-versus-computer session and computer-versus-computer play

pub mod common;
pub mod error;
pub mod game;
pub mod min_max;
pub mod strategy;
pub mod ttt;

pub use error::{Error, Result};
pub use game::{play_out, Game, Tally, Turn};
pub use strategy::{Opponent, Strength};
pub use ttt::{evaluate, find_immediate_win, CellState, GameBoard, Marks, Verdict};
