//! Gauss-Legendre quadrature rule construction
//!
//! Nodes are the roots of the degree-N Legendre polynomial on [-1, 1],
//! found one at a time by Newton's method with deflation over the roots
//! already found (Barrera-Figueroa et al., 2006). Weights use the closed
//! form `w = 2 / ((1 - x²) P'_N(x)²)`.

use ndarray::Array1;
use std::f64::consts::PI;

use crate::error::{GlqError, Result};
use crate::legendre::legendre_p_and_derivative;

/// Maximum iterations of the Newton root-finder.
pub const GLQ_MAXIT: usize = 1000;

/// Convergence tolerance of the Newton root-finder.
pub const GLQ_MAXERROR: f64 = 1e-15;

/// A Gauss-Legendre quadrature rule of fixed order.
///
/// The stored nodes live on [-1, 1] in ascending order; [`Glq::scaled_nodes`]
/// maps them to an arbitrary interval. The rule is immutable after
/// construction, so one instance can be shared freely across threads and
/// rescaled any number of times without re-running the root-finder.
///
/// The weights integrate on [-1, 1] (they sum to 2); the caller accounts for
/// the `0.5 * (upper - lower)` Jacobian of the affine node map.
#[derive(Debug, Clone, PartialEq)]
pub struct Glq {
    order: usize,
    nodes: Array1<f64>,
    weights: Array1<f64>,
}

impl Glq {
    /// Build a rule of the given order (number of nodes, >= 2).
    ///
    /// If the root-finder hits the iteration cap for some node the rule is
    /// still returned, since the approximation is usually adequate, and a
    /// warning is logged.
    pub fn new(order: usize) -> Result<Self> {
        if order < 2 {
            return Err(GlqError::InvalidOrder { order });
        }

        let mut nodes = vec![0.0; order];
        for i in 0..order {
            // Analytic estimate of the i-th root, ascending from -1.
            let initial = (PI * ((order - i) as f64 - 0.25) / (order as f64 + 0.5)).cos();
            next_root(initial, i, order, &mut nodes);
        }

        let weights = nodes
            .iter()
            .map(|&x| {
                let (_, dp) = legendre_p_and_derivative(order, x);
                2.0 / ((1.0 - x * x) * dp * dp)
            })
            .collect::<Array1<f64>>();

        Ok(Self {
            order,
            nodes: Array1::from_vec(nodes),
            weights,
        })
    }

    /// Order of the rule (number of nodes and weights).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Nodes on [-1, 1], ascending.
    pub fn nodes(&self) -> &Array1<f64> {
        &self.nodes
    }

    /// Weights matching the unscaled nodes.
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Nodes affinely mapped to `[lower, upper]`.
    ///
    /// `scaled = 0.5 * (upper - lower) * x + 0.5 * (upper + lower)`. The
    /// weights are untouched; they stay valid for the unscaled nodes.
    pub fn scaled_nodes(&self, lower: f64, upper: f64) -> Array1<f64> {
        let half_span = 0.5 * (upper - lower);
        let mid = 0.5 * (upper + lower);
        self.nodes.mapv(|x| half_span * x + mid)
    }

    /// Map the nodes to `[lower, upper]` into a caller-owned buffer.
    ///
    /// `out.len()` must equal the order.
    pub fn scale_into(&self, lower: f64, upper: f64, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.order);
        let half_span = 0.5 * (upper - lower);
        let mid = 0.5 * (upper + lower);
        for (o, &x) in out.iter_mut().zip(self.nodes.iter()) {
            *o = half_span * x + mid;
        }
    }
}

/// Find the root of index `index` by Newton's method, deflating the roots
/// already stored in `roots[..index]`.
fn next_root(initial: f64, index: usize, order: usize, roots: &mut [f64]) {
    let mut x1 = initial;
    for _ in 0..GLQ_MAXIT {
        let x0 = x1;
        let (pn, dpn) = legendre_p_and_derivative(order, x0);
        // Deflation keeps Newton from converging back onto a known root.
        let deflation: f64 = roots[..index].iter().map(|&r| 1.0 / (x0 - r)).sum();
        x1 = x0 - pn / (dpn - pn * deflation);
        if (x1 - x0).abs() <= GLQ_MAXERROR {
            roots[index] = x1;
            return;
        }
    }
    // Non-fatal: the last iterate is usually still a good approximation.
    log::warn!(
        "Legendre root {} of order {} did not converge to {:e} within {} iterations",
        index,
        order,
        GLQ_MAXERROR,
        GLQ_MAXIT
    );
    roots[index] = x1;
}
