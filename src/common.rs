use std::hash::Hash;

use crate::error::{Error, Result};

pub trait Cell: Copy + Eq + Hash {
    fn empty() -> Self;

    fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

/// Winning lines in the order they are checked: rows, columns, diagonals.
pub const WIN_INDICES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Nine cells in row-major order (`row = index / 3`, `column = index % 3`).
///
/// The board is a plain value. Search code never mutates a board it was
/// handed, it works on [`Board3x3::copy_with_move`] instead. Turn order is
/// not tracked here; callers are trusted to alternate marks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board3x3<C: Cell> {
    cells: [C; 9],
}

impl<C: Cell> Board3x3<C> {
    pub fn empty() -> Self {
        Self::new([C::empty(); 9])
    }

    pub fn new(cells: [C; 9]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[C; 9] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Result<C> {
        self.cells.get(index).copied().ok_or(Error::InvalidPosition { index })
    }

    pub fn is_empty(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|cell| cell.is_empty())
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|cell| !cell.is_empty())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Empty indices in ascending order.
    pub fn empty_indices(&self) -> Vec<usize> {
        (0..9)
            .filter(|&index| self.cells[index].is_empty())
            .collect()
    }

    /// The only way to change a cell. On error the board is left untouched.
    pub fn mark_cell(&mut self, index: usize, mark: C) -> Result<()> {
        if mark.is_empty() {
            return Err(Error::UnsetMark);
        }
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(Error::InvalidPosition { index })?;
        if !cell.is_empty() {
            return Err(Error::InvalidMove { index });
        }
        *cell = mark;
        Ok(())
    }

    pub fn copy_with_move(&self, index: usize, mark: C) -> Result<Self> {
        let mut next = *self;
        next.mark_cell(index, mark)?;
        Ok(next)
    }

    pub fn winning_indices(&self) -> Option<&'static [usize; 3]> {
        WIN_INDICES.iter().find(|indices| {
            let first = self.cells[indices[0]];
            !first.is_empty() && first == self.cells[indices[1]] && first == self.cells[indices[2]]
        })
    }

    /// First line holding two `mark` cells and one empty cell; returns the empty one.
    pub fn completing_index(&self, mark: C) -> Option<usize> {
        if mark.is_empty() {
            return None;
        }
        WIN_INDICES.iter().find_map(|indices| {
            let marked = indices.iter().filter(|&&index| self.cells[index] == mark).count();
            let empty = indices.iter().find(|&&index| self.cells[index].is_empty());
            match (marked, empty) {
                (2, Some(&index)) => Some(index),
                _ => None,
            }
        })
    }
}

impl<C: Cell> Default for Board3x3<C> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod test {
    use crate::common::{Board3x3, Cell, WIN_INDICES};
    use crate::error::Error;

    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    enum Dot {
        None,
        Red,
        Blue,
    }

    impl Cell for Dot {
        fn empty() -> Self {
            Dot::None
        }
    }

    #[test]
    fn mark_cell_rejects_occupied_and_unset() {
        let mut board = Board3x3::<Dot>::empty();
        assert_eq!(board.mark_cell(4, Dot::Red), Ok(()));
        let before = board;

        assert_eq!(board.mark_cell(4, Dot::Blue), Err(Error::InvalidMove { index: 4 }));
        assert_eq!(board.mark_cell(0, Dot::None), Err(Error::UnsetMark));
        assert_eq!(board.mark_cell(9, Dot::Blue), Err(Error::InvalidPosition { index: 9 }));
        assert_eq!(board, before);
    }

    #[test]
    fn copy_with_move_leaves_source_alone() {
        let board = Board3x3::new([Dot::Red, Dot::None, Dot::None, Dot::None, Dot::None, Dot::None, Dot::None, Dot::None, Dot::None]);
        let next = board.copy_with_move(1, Dot::Blue).unwrap();
        assert!(board.is_empty(1));
        assert!(next.is_occupied(1));
        assert_eq!(board.copy_with_move(0, Dot::Blue), Err(Error::InvalidMove { index: 0 }));
        assert_eq!(board.cells()[0], Dot::Red);
    }

    #[test]
    fn queries() {
        let mut board = Board3x3::<Dot>::empty();
        assert_eq!(board.empty_indices(), (0..9).collect::<Vec<_>>());
        board.mark_cell(2, Dot::Red).unwrap();
        board.mark_cell(7, Dot::Blue).unwrap();
        assert_eq!(board.empty_indices(), vec![0, 1, 3, 4, 5, 6, 8]);
        assert!(board.is_occupied(2));
        assert!(!board.is_empty(2));
        assert!(!board.is_empty(42));
        assert!(!board.is_occupied(42));
        assert!(!board.is_full());
    }

    #[test]
    fn winning_and_completing_lines() {
        for line in WIN_INDICES {
            let mut board = Board3x3::<Dot>::empty();
            for index in line {
                board.mark_cell(index, Dot::Blue).unwrap();
            }
            assert_eq!(board.winning_indices(), Some(&line));

            for open in line {
                let mut board = Board3x3::<Dot>::empty();
                for index in line.iter().filter(|&&index| index != open) {
                    board.mark_cell(*index, Dot::Red).unwrap();
                }
                assert_eq!(board.winning_indices(), None);
                assert_eq!(board.completing_index(Dot::Red), Some(open));
                assert_eq!(board.completing_index(Dot::Blue), None);
            }
        }
    }
}
