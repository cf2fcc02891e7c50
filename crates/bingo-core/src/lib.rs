//! Daily park bingo engine
//!
//! Every calendar day maps to one shuffled card of labels, the same for
//! everyone who plays that day. The crate generates that card, tracks which
//! cells have been checked, detects completed rows, columns and diagonals,
//! and keeps one day's session in a pluggable store.

mod completion;
mod date;
mod error;
mod generator;
mod grid;
mod lines;
mod pool;
mod session;
mod store;

pub use completion::CompletionState;
pub use date::DateKey;
pub use error::{BingoError, StoreError};
pub use generator::{generate, generate_square, Generator, CARD_CELLS};
pub use grid::{Grid, Position};
pub use lines::{completed_lines, CompletedLines, LineId};
pub use pool::{ItemPool, PoolProvider, Season, SeasonalPool};
pub use session::{Session, SessionRecord, Toggle};
pub use store::{FileStore, MemoryStore, SessionStore};

/// Cells per side of the standard card
pub const CARD_SIDE: usize = 5;
