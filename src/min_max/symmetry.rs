use std::collections::BTreeSet;

use ahash::HashMap;
use enumset::{EnumSet, EnumSetType};
use itertools::Itertools;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub trait Symmetry<T> {
    fn canonicalize(&self, target: &T) -> T;
    fn expand(&self, canonical: &T) -> Vec<T>;
}

#[derive(EnumIter, EnumSetType, Debug)]
#[enumset(repr = "u8")]
pub enum GridSymmetryAxis {
    Vertical,
    Horizontal,
    DiagonalTopBottom,
    DiagonalBottomTop,
}

pub type GridSymmetryAxes = EnumSet<GridSymmetryAxis>;

impl GridSymmetryAxis {
    pub fn symmetric_indices(self) -> [(usize, usize); 3] {
        match self {
            GridSymmetryAxis::Vertical => [(0, 2), (3, 5), (6, 8)],
            GridSymmetryAxis::Horizontal => [(0, 6), (1, 7), (2, 8)],
            GridSymmetryAxis::DiagonalTopBottom => [(1, 3), (2, 6), (5, 7)],
            GridSymmetryAxis::DiagonalBottomTop => [(0, 8), (1, 5), (3, 7)],
        }
    }

    /// Index reflected across this axis. Cells on the axis map to themselves.
    pub fn mirror(self, index: usize) -> usize {
        self.symmetric_indices()
            .into_iter()
            .find_map(|(first, second)| {
                if index == first {
                    Some(second)
                } else if index == second {
                    Some(first)
                } else {
                    None
                }
            })
            .unwrap_or(index)
    }
}

// axes -> index -> canonical index
fn generate_axes_to_canonical_indices() -> HashMap<GridSymmetryAxes, [usize; 9]> {
    GridSymmetryAxis::iter().powerset().map(|axes| {
        let axes = axes.into_iter().collect::<GridSymmetryAxes>();
        let mut canonical_indices = [0; 9];
        for (original_index, canonical) in canonical_indices.iter_mut().enumerate() {
            // close the set of equivalent indices under all reflections
            let mut orbit = BTreeSet::from([original_index]);
            loop {
                let next = orbit.iter()
                    .flat_map(|&index| axes.iter().map(move |axis| axis.mirror(index)))
                    .chain(orbit.iter().copied())
                    .collect::<BTreeSet<_>>();
                if next.len() == orbit.len() {
                    break;
                }
                orbit = next;
            }
            *canonical = orbit.first().copied().unwrap_or(original_index);
        }
        (axes, canonical_indices)
    }).collect()
}

lazy_static! {
    static ref AXES_TO_CANONICAL_INDICES_3X3: HashMap<GridSymmetryAxes, [usize; 9]> = generate_axes_to_canonical_indices();
}

/// The mirror axes a board is symmetric under. The canonical index of a
/// cell is the smallest index it can be reflected onto.
#[derive(Debug, Copy, Clone)]
pub struct GridSymmetry3x3 {
    axes: GridSymmetryAxes,
    canonical_index: &'static [usize; 9],
}

impl PartialEq for GridSymmetry3x3 {
    fn eq(&self, other: &Self) -> bool {
        self.axes == other.axes
    }
}

impl Eq for GridSymmetry3x3 {}

impl GridSymmetry3x3 {
    pub fn new<A>(axes: A) -> Self where A: Into<GridSymmetryAxes> {
        let axes = axes.into();
        let canonical_index = AXES_TO_CANONICAL_INDICES_3X3.get(&axes).expect("map contains all combinations");
        Self { axes, canonical_index }
    }

    pub fn axes(&self) -> GridSymmetryAxes {
        self.axes
    }

    pub fn is_trivial(&self) -> bool {
        self.axes.is_empty()
    }
}

impl Symmetry<usize> for GridSymmetry3x3 {
    fn canonicalize(&self, target: &usize) -> usize {
        debug_assert!(*target <= 8);
        self.canonical_index[*target]
    }

    fn expand(&self, canonical: &usize) -> Vec<usize> {
        let canonical = self.canonical_index[*canonical];
        (0..9).filter(|&index| self.canonical_index[index] == canonical).collect()
    }
}

impl<C: Eq> From<&[C; 9]> for GridSymmetry3x3 {
    fn from(cells: &[C; 9]) -> Self {
        let axes = GridSymmetryAxis::iter().filter(|axis| {
            axis.symmetric_indices().iter().all(|(f, s)| cells[*f] == cells[*s])
        }).collect::<GridSymmetryAxes>();
        GridSymmetry3x3::new(axes)
    }
}
