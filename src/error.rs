//! Error type shared by the library entry points.

use thiserror::Error;

/// Everything that can go wrong at the library boundary.
///
/// Transitions and fingerprints are total, so only token parsing and the
/// search driver produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// A move token was not one of `Up`, `Left`, `Down`, `Right`.
    #[error("invalid move token {0:?} (expected Up, Left, Down or Right)")]
    InvalidMoveToken(String),
    /// A search length bound was negative.
    #[error("invalid search range {min}..={max}: lengths must be non-negative")]
    InvalidRange { min: i64, max: i64 },
    /// The search was cancelled through its `CancelToken`.
    #[error("search cancelled")]
    Cancelled,
}
