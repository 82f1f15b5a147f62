//! Guillotine cut planning for rectangular parts on fixed-size stock boards.
//!
//! [`optimize`] expands piece demands into unit pieces, places them largest
//! first with a best-area-fit search over every open board, and reports the
//! layout together with per-board efficiency.

pub mod error;
pub mod expand;
pub mod export;
pub mod guillotine;
pub mod render;
pub mod solver;
pub mod stats;
pub mod types;

pub use error::{Error, Result};
pub use solver::optimize;
pub use types::{
    Board, BoardSearch, OptimizationResult, PieceDemand, PlacedPiece, Rect, Settings, Size,
};
