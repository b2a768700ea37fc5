//! Error types for model construction.

use thiserror::Error;

/// Errors that can occur when building model elements.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Tesseroid bounds do not satisfy `w < e`, `s < n`, `r1 < r2`.
    #[error(
        "invalid tesseroid bounds: w={w} e={e} s={s} n={n} r1={r1} r2={r2} \
         (require w < e, s < n, r1 < r2)"
    )]
    InvalidBounds {
        /// Western longitude bound (degrees)
        w: f64,
        /// Eastern longitude bound (degrees)
        e: f64,
        /// Southern latitude bound (degrees)
        s: f64,
        /// Northern latitude bound (degrees)
        n: f64,
        /// Inner radius bound (m)
        r1: f64,
        /// Outer radius bound (m)
        r2: f64,
    },
}

/// A specialized `Result` type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
