//! Tesseroid forward modeling of gravity gradients and magnetic fields
//!
//! This crate computes the gravitational potential, its first derivatives,
//! and the gradient tensor of a model built from tesseroids (spherical-shell
//! prisms bounded by longitude, latitude, and radius), plus magnetic field
//! components derived from the gradient tensor by Poisson's relation.
//!
//! # Features
//!
//! - **Triple GLQ integration**: closed-form integrands summed over
//!   Gauss-Legendre nodes on each axis (via the `tess-glq` crate)
//! - **Adaptive subdivision**: elements too large relative to their
//!   distance from the observation point are recursively split into
//!   octants until the requested accuracy ratio holds
//! - **Magnetic composition**: tensor rows combined with a rotated
//!   magnetization vector by the Poisson relation
//! - **Batch evaluation**: independent observation points processed in
//!   parallel with rayon
//!
//! # Example
//!
//! ```
//! use tess_field::{
//!     evaluate_model, FieldComponent, ObservationPoint, Quadrature, Tesseroid,
//! };
//! use tess_field::constants::MEAN_EARTH_RADIUS;
//!
//! let model = vec![Tesseroid::new(
//!     44.0, 46.0, -1.0, 1.0,
//!     MEAN_EARTH_RADIUS - 100_000.0, MEAN_EARTH_RADIUS,
//!     1000.0,
//! )?];
//! let quads = Quadrature::new(8)?;
//! let point = ObservationPoint::from_height(45.0, 0.0, 250_000.0);
//!
//! let gzz = evaluate_model(&model, &point, &quads, FieldComponent::Gzz, true, None);
//! assert!(gzz > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adaptive;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod kernels;
pub mod magnetics;

pub use adaptive::{evaluate_model, evaluate_points};
pub use error::{ModelError, Result};
pub use geometry::{Magnetization, ObservationPoint, Tesseroid};
pub use kernels::{evaluate_component, evaluate_tensor_row, FieldComponent, Quadrature, TensorRow};
pub use magnetics::{magnetic_component, tesseroid_magnetic_component};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
