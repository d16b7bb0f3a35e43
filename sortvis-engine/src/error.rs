// Sortvis Engine - Error Types
//
// Errors that can leave a sort run. Index violations mean an algorithm has a
// logic bug and are surfaced, never recovered. Render failures come from the
// drawing surface. Both still return the host to idle before propagating.

use sortvis_utils::AlgorithmKey;

/// Errors that can occur while running or hosting a sort
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// Swap touched a position outside the sequence
    #[error("Array out of bounds: length={len}, i={i}, j={j}")]
    IndexOutOfBounds { len: usize, i: usize, j: usize },

    /// The render surface failed to draw a frame
    #[error("Render failed: {0}")]
    RenderFailed(String),

    /// A run is already active on this host
    #[error("{0} is already sorting")]
    AlreadySorting(AlgorithmKey),

    /// A board-wide run is already active
    #[error("A sort-all run is already in progress")]
    BoardBusy,

    /// A spawned run panicked or was aborted
    #[error("Sort task failed: {0}")]
    TaskFailed(String),
}

impl From<std::io::Error> for SortError {
    fn from(err: std::io::Error) -> Self {
        Self::RenderFailed(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SortError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed(err.to_string())
    }
}

/// Result type for engine operations
pub type SortResult<T> = Result<T, SortError>;
