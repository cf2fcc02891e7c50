use crate::BingoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position on a square card, `(0, 0)` is the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position of a row-major index on a card `side` cells wide
    pub fn from_index(index: usize, side: usize) -> Self {
        Self {
            row: index / side,
            col: index % side,
        }
    }

    pub fn index(&self, side: usize) -> usize {
        self.row * side + self.col
    }
}

/// Side length of a square with `cells` cells, if it is one
pub(crate) fn square_side(cells: usize) -> Option<usize> {
    if cells == 0 {
        return None;
    }
    let side = (cells as f64).sqrt().round() as usize;
    (side * side == cells).then_some(side)
}

/// The labels of one day's card in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    labels: Vec<String>,
}

impl Grid {
    /// Build a card from row-major labels; the count must be a perfect square.
    pub fn from_labels(labels: Vec<String>) -> Result<Self, BingoError> {
        let side = square_side(labels.len()).ok_or(BingoError::InvalidGridSize(labels.len()))?;
        Ok(Self { side, labels })
    }

    /// Cells per row and column
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn label(&self, pos: Position) -> Option<&str> {
        if pos.row < self.side && pos.col < self.side {
            self.get(pos.index(self.side))
        } else {
            None
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.labels.chunks(self.side)
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0);
        let border = format!(
            "+{}+",
            vec!["-".repeat(width + 2); self.side].join("+")
        );

        writeln!(f, "{}", border)?;
        for row in self.rows() {
            write!(f, "|")?;
            for label in row {
                write!(f, " {:<width$} |", label, width = width)?;
            }
            writeln!(f)?;
            writeln!(f, "{}", border)?;
        }
        Ok(())
    }
}
