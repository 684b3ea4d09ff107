//! Error taxonomy for spread access.

use thiserror::Error;

/// Errors surfaced by direct [`Spread`](crate::Spread) access.
///
/// Negative or non-finite lengths are unrepresentable (`usize`), so the only
/// runtime condition is a cyclic read from a spread that holds no elements.
/// Kernels never let this escape an evaluation; they substitute the
/// documented numeric fallback instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpreadError {
    /// Cyclic read from a zero-length spread; `i mod 0` is undefined.
    #[error("cyclic read from a zero-length spread")]
    Empty,
}
