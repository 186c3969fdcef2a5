//! Shared primitives for the Irminsul sequence restoration workspace.
//!
//! `irminsul-core` provides the foundation the decoder crates build on:
//!
//! - **Error types**: [`IrminsulError`] and [`Result`] for structured error handling
//! - **Log-space probabilities**: [`LogProb`] with `ln(0) = -inf` semantics
//! - **Matrices**: [`Grid`], a row-major dense matrix used for model
//!   parameters and decoding lattices
//! - **Traits**: [`Scored`] and [`Summarizable`]

pub mod error;
pub mod grid;
pub mod prob;
pub mod traits;

pub use error::{IrminsulError, Result};
pub use grid::Grid;
pub use prob::{validate_distribution, LogProb, ROW_SUM_TOLERANCE};
pub use traits::*;
