use crate::lines::{completed_lines, CompletedLines};
use crate::BingoError;

/// Which cells of a card the player has checked, index-aligned with the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    side: usize,
    checked: Vec<bool>,
}

impl CompletionState {
    /// Every cell unchecked
    pub fn new(side: usize) -> Self {
        Self {
            side,
            checked: vec![false; side * side],
        }
    }

    pub fn from_checked(side: usize, checked: Vec<bool>) -> Result<Self, BingoError> {
        if checked.len() != side * side {
            return Err(BingoError::MalformedCompletionState {
                expected: side * side,
                actual: checked.len(),
            });
        }
        Ok(Self { side, checked })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Flip one cell and return its new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, BingoError> {
        let len = self.checked.len();
        let cell = self
            .checked
            .get_mut(index)
            .ok_or(BingoError::CellOutOfBounds { index, len })?;
        *cell = !*cell;
        Ok(*cell)
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.iter().filter(|&&c| c).count()
    }

    /// True while nothing is checked
    pub fn is_empty(&self) -> bool {
        !self.checked.iter().any(|&c| c)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.checked
    }

    pub fn completed_lines(&self) -> CompletedLines {
        // length is validated on construction
        completed_lines(&self.checked, self.side).unwrap_or_default()
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.checked
    }
}
