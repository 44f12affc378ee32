use std::fmt;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::strategy::{Opponent, Strength};
use crate::ttt::{evaluate, CellState, GameBoard, Marks, Verdict};

/// X always opens.
pub const FIRST_MARK: CellState = CellState::X;

/// What happened after the human moved.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Turn {
    /// `None` when the human's move already ended the game.
    pub ai_move: Option<usize>,
    pub verdict: Verdict,
}

/// One game of a human against the computer.
///
/// The computer replies right after every legal human move. When the human
/// picks O the computer opens the game on construction.
pub struct Game<R: Rng = ThreadRng> {
    board: GameBoard,
    marks: Marks,
    opponent: Opponent<R>,
    verdict: Verdict,
    opening_move: Option<usize>,
}

impl Game {
    pub fn new(strength: Strength, player: CellState) -> Result<Self> {
        Self::with_rng(strength, player, rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(strength: Strength, player: CellState, rng: R) -> Result<Self> {
        let marks = Marks::for_player(player)?;
        let mut game = Self {
            board: GameBoard::empty(),
            marks,
            opponent: Opponent::with_rng(strength, marks, rng),
            verdict: Verdict::Undecided,
            opening_move: None,
        };
        if marks.ai == FIRST_MARK {
            game.opening_move = Some(game.ai_move()?);
        }
        Ok(game)
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn marks(&self) -> Marks {
        self.marks
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn strength(&self) -> Strength {
        self.opponent.strength()
    }

    /// The computer's first move if it opened the game.
    pub fn opening_move(&self) -> Option<usize> {
        self.opening_move
    }

    #[instrument(level = "debug", skip(self))]
    pub fn play(&mut self, index: usize) -> Result<Turn> {
        if self.verdict.is_terminal() {
            return Err(Error::InvalidState { reason: "game is already over" });
        }
        self.board.mark_cell(index, self.marks.player)?;
        self.verdict = evaluate(&self.board);
        if self.verdict.is_terminal() {
            info!(verdict = %self.verdict, "game over after human move");
            return Ok(Turn { ai_move: None, verdict: self.verdict });
        }
        let ai_move = self.ai_move()?;
        if self.verdict.is_terminal() {
            info!(verdict = %self.verdict, "game over after computer move");
        }
        Ok(Turn { ai_move: Some(ai_move), verdict: self.verdict })
    }

    fn ai_move(&mut self) -> Result<usize> {
        let index = self.opponent.choose_move(&self.board)?;
        self.board.mark_cell(index, self.marks.ai)?;
        self.verdict = evaluate(&self.board);
        Ok(index)
    }
}

/// Lets two computer players finish a game from the empty board.
pub fn play_out<RX: Rng, RO: Rng>(x: &mut Opponent<RX>, o: &mut Opponent<RO>) -> Result<(GameBoard, Verdict)> {
    if x.marks().ai != CellState::X || o.marks().ai != CellState::O {
        return Err(Error::InvalidState { reason: "opponents must play X and O" });
    }
    let mut board = GameBoard::empty();
    let mut to_move = FIRST_MARK;
    loop {
        let verdict = evaluate(&board);
        if verdict.is_terminal() {
            debug!(%verdict, "played out\n{board}");
            return Ok((board, verdict));
        }
        let index = match to_move {
            CellState::O => o.choose_move(&board)?,
            _ => x.choose_move(&board)?,
        };
        board.mark_cell(index, to_move)?;
        to_move = match to_move {
            CellState::X => CellState::O,
            _ => CellState::X,
        };
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Tally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Win(CellState::X) => self.x_wins += 1,
            Verdict::Win(CellState::O) => self.o_wins += 1,
            Verdict::Draw => self.draws += 1,
            Verdict::Win(CellState::EMPTY) | Verdict::Undecided => {}
        }
    }

    pub fn games(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} games: X won {}, O won {}, {} draws", self.games(), self.x_wins, self.o_wins, self.draws)
    }
}
