use std::fmt;
use std::str::FromStr;

use crate::common::{Board3x3, Cell};
use crate::error::{Error, Result};
use crate::min_max::Player;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum CellState {
    EMPTY,
    X,
    O,
}

impl Cell for CellState {
    fn empty() -> Self {
        Self::EMPTY
    }
}

impl CellState {
    pub fn opponent(self) -> Option<CellState> {
        match self {
            CellState::X => Some(CellState::O),
            CellState::O => Some(CellState::X),
            CellState::EMPTY => None,
        }
    }

    fn digit(self) -> usize {
        match self {
            CellState::EMPTY => 0,
            CellState::X => 1,
            CellState::O => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            CellState::EMPTY => '.',
            CellState::X => 'X',
            CellState::O => 'O',
        }
    }
}

impl TryFrom<char> for CellState {
    type Error = char;

    fn try_from(symbol: char) -> std::result::Result<Self, char> {
        match symbol {
            'x' | 'X' => Ok(CellState::X),
            'o' | 'O' => Ok(CellState::O),
            '.' | '-' | '_' | ' ' => Ok(CellState::EMPTY),
            other => Err(other),
        }
    }
}

impl FromStr for CellState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => CellState::try_from(symbol).map_err(|character| Error::InvalidCellCharacter {
                character,
                position: 0,
                context: s.to_string(),
            }),
            _ => Err(Error::InvalidBoardLength { expected: 1, got: s.trim().chars().count(), context: s.to_string() }),
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Outcome of [`evaluate`].
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Verdict {
    Win(CellState),
    Draw,
    Undecided,
}

impl Verdict {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Undecided)
    }

    pub fn winner(&self) -> Option<CellState> {
        match self {
            Verdict::Win(mark) => Some(*mark),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Win(mark) => write!(f, "{mark} wins"),
            Verdict::Draw => write!(f, "draw"),
            Verdict::Undecided => write!(f, "undecided"),
        }
    }
}

pub type GameBoard = Board3x3<CellState>;

impl GameBoard {
    pub fn status(&self) -> Verdict {
        match self.winning_indices() {
            Some(indices) => Verdict::Win(self.cells()[indices[0]]),
            None if self.is_full() => Verdict::Draw,
            None => Verdict::Undecided,
        }
    }

    /// Base-3 number of the board, in `0..3^9`.
    pub fn code(&self) -> usize {
        self.cells().iter().fold(0, |code, cell| code * 3 + cell.digit())
    }
}

pub const BOARD_CODES: usize = 19_683;

/// Win when any line (rows, columns, diagonals, in that order) is complete,
/// draw when the board is full, undecided otherwise.
///
/// Boards with two different winning marks cannot be reached by alternating
/// play and are not detected.
pub fn evaluate(board: &GameBoard) -> Verdict {
    board.status()
}

/// The cell that completes a line for `mark`, if any. Only looks at
/// `mark`'s own lines, it does not look for blocks.
pub fn find_immediate_win(board: &GameBoard, mark: CellState) -> Option<usize> {
    board.completing_index(mark)
}

impl FromStr for GameBoard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let symbols = s.chars().filter(|c| *c != '\n' && *c != '|' && *c != '/').collect::<Vec<_>>();
        if symbols.len() != 9 {
            return Err(Error::InvalidBoardLength { expected: 9, got: symbols.len(), context: s.to_string() });
        }
        let mut cells = [CellState::EMPTY; 9];
        for (position, symbol) in symbols.into_iter().enumerate() {
            cells[position] = CellState::try_from(symbol).map_err(|character| Error::InvalidCellCharacter {
                character,
                position,
                context: s.to_string(),
            })?;
        }
        Ok(GameBoard::new(cells))
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells().chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{}{}{}", cells[0], cells[1], cells[2])?;
        }
        Ok(())
    }
}

/// Which mark the computer plays and which one its opponent plays.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Marks {
    pub ai: CellState,
    pub player: CellState,
}

impl Marks {
    pub fn for_ai(ai: CellState) -> Result<Self> {
        let player = ai.opponent().ok_or(Error::UnsetMark)?;
        Ok(Self { ai, player })
    }

    pub fn for_player(player: CellState) -> Result<Self> {
        let ai = player.opponent().ok_or(Error::UnsetMark)?;
        Ok(Self { ai, player })
    }

    pub fn mark_of(&self, player: Player) -> CellState {
        match player {
            Player::Max => self.ai,
            Player::Min => self.player,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::common::WIN_INDICES;
    use crate::error::Error;
    use crate::min_max::Player;
    use crate::ttt::{evaluate, find_immediate_win, CellState, GameBoard, Marks, Verdict};

    #[test]
    fn status() {
        use crate::ttt::CellState::*;
        let board = GameBoard::new([EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY]);
        assert_eq!(board.status(), Verdict::Undecided);

        let board = GameBoard::new([X, X, X, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY]);
        assert_eq!(board.status(), Verdict::Win(X));

        let board = GameBoard::new([O, X, X, X, O, O, X, X, O]);
        assert_eq!(board.status(), Verdict::Win(O));

        let board = GameBoard::new([O, O, O, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY]);
        assert_eq!(board.status(), Verdict::Win(O));

        let board = GameBoard::new([X, O, O, O, X, X, EMPTY, O, O]);
        assert_eq!(board.status(), Verdict::Undecided);

        let board = GameBoard::new([X, O, O, O, X, X, X, O, O]);
        assert_eq!(board.status(), Verdict::Draw);
    }

    #[test]
    fn full_board_win_beats_draw() {
        let board: GameBoard = "XOXXOOXXO".parse().unwrap();
        assert_eq!(evaluate(&board), Verdict::Win(CellState::X));
    }

    #[test]
    fn two_in_a_line_is_undecided_and_completable() {
        for mark in [CellState::X, CellState::O] {
            for line in WIN_INDICES {
                for open in line {
                    let mut board = GameBoard::empty();
                    for index in line.into_iter().filter(|&index| index != open) {
                        board.mark_cell(index, mark).unwrap();
                    }
                    assert_eq!(evaluate(&board), Verdict::Undecided);
                    assert_eq!(find_immediate_win(&board, mark), Some(open));
                }
            }
        }
    }

    #[test]
    fn immediate_win_for_each_side() {
        let board: GameBoard = "XX.OO....".parse().unwrap();
        assert_eq!(find_immediate_win(&board, CellState::X), Some(2));
        assert_eq!(find_immediate_win(&board, CellState::O), Some(5));
        assert_eq!(find_immediate_win(&board, CellState::EMPTY), None);

        let blocked: GameBoard = "XXO......".parse().unwrap();
        assert_eq!(find_immediate_win(&blocked, CellState::X), None);
    }

    #[test]
    fn immediate_win_takes_first_line() {
        // row 0 and column 0 both open for X
        let board: GameBoard = "XX.X.....".parse().unwrap();
        assert_eq!(find_immediate_win(&board, CellState::X), Some(2));
    }

    #[test]
    fn evaluate_is_pure() {
        let board: GameBoard = "XO.XO....".parse().unwrap();
        let copy = board;
        assert_eq!(evaluate(&board), evaluate(&board));
        assert_eq!(board, copy);
    }

    #[test]
    fn parse_and_display() {
        let board: GameBoard = "XO.|.X.|..O".parse().unwrap();
        assert_eq!(board.to_string(), "XO.\n.X.\n..O");
        assert_eq!(board.to_string().parse::<GameBoard>(), Ok(board));

        assert_eq!(
            "XO".parse::<GameBoard>(),
            Err(Error::InvalidBoardLength { expected: 9, got: 2, context: "XO".to_string() })
        );
        assert_eq!(
            "XO.Z.....".parse::<GameBoard>(),
            Err(Error::InvalidCellCharacter { character: 'Z', position: 3, context: "XO.Z.....".to_string() })
        );
        assert_eq!("o".parse::<CellState>(), Ok(CellState::O));
    }

    #[test]
    fn board_codes_are_distinct() {
        let empty = GameBoard::empty();
        assert_eq!(empty.code(), 0);
        let full_o: GameBoard = "OOOOOOOOO".parse().unwrap();
        assert_eq!(full_o.code(), super::BOARD_CODES - 1);
        let a: GameBoard = "X........".parse().unwrap();
        let b: GameBoard = "........X".parse().unwrap();
        assert_ne!(a.code(), b.code());
    }

    #[test]
    fn marks() {
        let marks = Marks::for_ai(CellState::O).unwrap();
        assert_eq!(marks.player, CellState::X);
        assert_eq!(marks.mark_of(Player::Max), CellState::O);
        assert_eq!(marks.mark_of(Player::Min), CellState::X);
        assert_eq!(Marks::for_player(CellState::O), Ok(Marks { ai: CellState::X, player: CellState::O }));
        assert_eq!(Marks::for_ai(CellState::EMPTY), Err(Error::UnsetMark));
    }
}
