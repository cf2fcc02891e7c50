use crate::BingoError;
use std::collections::BTreeSet;

/// One of the `2N + 2` winning lines on an N x N card.
///
/// Numeric identity: rows `0..N`, columns `N..2N`, main diagonal `2N`,
/// anti-diagonal `2N + 1`. The derived ordering follows the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineId {
    Row(usize),
    Column(usize),
    /// Top left to bottom right
    MainDiagonal,
    /// Top right to bottom left
    AntiDiagonal,
}

impl LineId {
    pub fn index(&self, side: usize) -> usize {
        match *self {
            LineId::Row(r) => r,
            LineId::Column(c) => side + c,
            LineId::MainDiagonal => 2 * side,
            LineId::AntiDiagonal => 2 * side + 1,
        }
    }

    pub fn from_index(index: usize, side: usize) -> Option<Self> {
        match index {
            i if i < side => Some(LineId::Row(i)),
            i if i < 2 * side => Some(LineId::Column(i - side)),
            i if i == 2 * side => Some(LineId::MainDiagonal),
            i if i == 2 * side + 1 => Some(LineId::AntiDiagonal),
            _ => None,
        }
    }

    /// Row-major indices of the cells on this line
    pub fn cells(&self, side: usize) -> Vec<usize> {
        match *self {
            LineId::Row(r) => (0..side).map(|c| r * side + c).collect(),
            LineId::Column(c) => (0..side).map(|r| r * side + c).collect(),
            LineId::MainDiagonal => (0..side).map(|i| i * side + i).collect(),
            LineId::AntiDiagonal => (0..side).map(|i| i * side + (side - 1 - i)).collect(),
        }
    }

    pub fn contains(&self, index: usize, side: usize) -> bool {
        let (row, col) = (index / side, index % side);
        match *self {
            LineId::Row(r) => row == r,
            LineId::Column(c) => col == c,
            LineId::MainDiagonal => row == col,
            LineId::AntiDiagonal => row + col == side - 1,
        }
    }

    /// Every line of the card in numeric order
    pub fn all(side: usize) -> impl Iterator<Item = LineId> {
        (0..side)
            .map(LineId::Row)
            .chain((0..side).map(LineId::Column))
            .chain([LineId::MainDiagonal, LineId::AntiDiagonal])
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineId::Row(r) => write!(f, "row {}", r + 1),
            LineId::Column(c) => write!(f, "column {}", c + 1),
            LineId::MainDiagonal => write!(f, "diagonal"),
            LineId::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// The full set of lines complete at one moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedLines(BTreeSet<LineId>);

impl CompletedLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, line: LineId) -> bool {
        self.0.contains(&line)
    }

    pub fn iter(&self) -> impl Iterator<Item = LineId> + '_ {
        self.0.iter().copied()
    }

    /// Lines in `self` that `previous` did not have
    pub fn newly_completed(&self, previous: &CompletedLines) -> Vec<LineId> {
        self.0.difference(&previous.0).copied().collect()
    }

    pub fn to_indices(&self, side: usize) -> Vec<usize> {
        self.iter().map(|line| line.index(side)).collect()
    }

    /// Rebuild from numeric ids, dropping any that do not exist on the card
    pub fn from_indices(indices: &[usize], side: usize) -> Self {
        indices
            .iter()
            .filter_map(|&i| LineId::from_index(i, side))
            .collect()
    }
}

impl FromIterator<LineId> for CompletedLines {
    fn from_iter<I: IntoIterator<Item = LineId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Every line whose cells are all checked.
///
/// Recomputed from scratch on each call; `checked` must hold exactly
/// `side * side` cells in row-major order.
pub fn completed_lines(checked: &[bool], side: usize) -> Result<CompletedLines, BingoError> {
    let expected = side * side;
    if side == 0 || checked.len() != expected {
        return Err(BingoError::MalformedCompletionState {
            expected,
            actual: checked.len(),
        });
    }

    Ok(LineId::all(side)
        .filter(|line| line.cells(side).into_iter().all(|i| checked[i]))
        .collect())
}
