//! Gauss-Legendre quadrature for spherical-element integration
//!
//! This crate generates the nodes and weights of Gauss-Legendre quadrature
//! (GLQ) of arbitrary order on [-1, 1] and maps the nodes to arbitrary
//! integration intervals. It is the numerical-integration backbone of the
//! tesseroid field kernels in the `tess-field` crate.
//!
//! Nodes are the roots of the degree-N Legendre polynomial, found by
//! Newton's method with deflation over previously found roots
//! (Barrera-Figueroa et al., 2006). Weights come from the closed-form
//! relation between a Legendre polynomial, its derivative, and the root.
//!
//! # Example
//!
//! Integrate the cosine function from 0 to 90 degrees:
//!
//! ```
//! use tess_glq::Glq;
//! use std::f64::consts::PI;
//!
//! let glq = Glq::new(5).unwrap();
//! let (a, b) = (0.0, 0.5 * PI);
//! let nodes = glq.scaled_nodes(a, b);
//!
//! let mut result = 0.0;
//! for (i, &x) in nodes.iter().enumerate() {
//!     result += glq.weights()[i] * x.cos();
//! }
//! // The affine map contributes a 0.5 * (b - a) scale factor.
//! result *= 0.5 * (b - a);
//!
//! assert!((result - 1.0).abs() < 1e-10);
//! ```

pub mod error;
pub mod glq;
pub mod legendre;

pub use error::{GlqError, Result};
pub use glq::Glq;

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
