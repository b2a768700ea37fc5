//! Error types for quadrature construction.

use thiserror::Error;

/// Errors that can occur when building a quadrature rule.
#[derive(Debug, Error)]
pub enum GlqError {
    /// The requested order is too small to define a Legendre rule.
    #[error("invalid quadrature order: {order} (must be >= 2)")]
    InvalidOrder {
        /// The invalid order value
        order: usize,
    },
}

/// A specialized `Result` type for quadrature operations.
pub type Result<T> = std::result::Result<T, GlqError>;
