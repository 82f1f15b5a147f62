//! Error types for board_cut.
//!
//! The optimizer itself never fails; these cover the layers that turn user
//! input into [`Settings`](crate::types::Settings) and demands.

use thiserror::Error;

/// Result type alias for board_cut operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Board size is zero, negative or not a finite number.
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidBoard { width: f64, height: f64 },

    /// Kerf is negative or not a finite number.
    #[error("kerf must be a non-negative number, got {0}")]
    InvalidKerf(f64),

    #[error("invalid dimensions '{0}', expected WxH")]
    InvalidDimensions(String),

    #[error("invalid piece '{0}', expected WxH:qty[:id]")]
    InvalidPiece(String),
}
