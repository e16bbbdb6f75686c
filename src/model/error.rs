//! Error types for slidex.
//!
//! Errors are `thiserror` enums carrying structured context and compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error of the demo binary
//!   - [`ExpandError`] - Precondition violations on the expansion controller
//!   - [`PersistError`] - Saving expand state to the host's state file
//!   - `std::io::Error` - Terminal/TUI failures
//!
//! # Recovery Strategy
//!
//! A corrupt or truncated saved-state blob is **not** an error: it decodes to
//! an empty state (state loss is preferred at best-effort lifecycle
//! boundaries). Re-entrant activations during an animation are not errors
//! either; they are deferred and replayed.

use crate::model::Position;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error for the demo binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// A controller precondition was violated.
    #[error("Expansion error: {0}")]
    Expand(#[from] ExpandError),

    /// Saved state could not be written or read.
    #[error("State persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Precondition violations surfaced by the expansion controller.
///
/// These are never retried; the controller state is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// Animation duration must be zero or positive.
    ///
    /// The previously configured duration stays in effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use slidex::model::ExpandError;
    ///
    /// let err = ExpandError::InvalidDuration(-5);
    /// assert!(err.to_string().contains("-5"));
    /// ```
    #[error("Animation duration must not be negative (got {0} ms)")]
    InvalidDuration(i64),
}

/// Failures while encoding or storing a saved-state blob.
#[derive(Debug, Error)]
pub enum PersistError {
    /// An expanded position does not fit the blob's signed 32-bit slots.
    #[error("Position {0} cannot be encoded in saved state")]
    PositionOutOfRange(Position),

    /// The state file could not be written.
    #[error("Failed to write state file at {path:?}: {source}")]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but could not be read.
    #[error("Failed to read state file at {path:?}: {source}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
