/// Errors raised by card generation, line detection and session handling.
#[derive(Debug, thiserror::Error)]
pub enum BingoError {
    #[error("item pool has {available} labels but the card needs {required}")]
    PoolTooSmall { available: usize, required: usize },
    #[error("completion state has {actual} cells, expected {expected}")]
    MalformedCompletionState { expected: usize, actual: usize },
    #[error("`{0}` is not a valid YYYY-MM-DD date key")]
    InvalidDateKey(String),
    #[error("grid size {0} is not a non-zero perfect square")]
    InvalidGridSize(usize),
    #[error("cell {index} is outside a card of {len} cells")]
    CellOutOfBounds { index: usize, len: usize },
    #[error("invalid item pool: {0}")]
    InvalidPool(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by a [`SessionStore`](crate::SessionStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored session is unreadable: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),
}
