//! Magnetic field components by Poisson's relation
//!
//! The magnetic potential of a uniformly magnetized body equals a
//! directional derivative of its gravitational potential, so one magnetic
//! field component is a linear combination of a gradient tensor row with
//! the body's magnetization vector, scaled by `μ₀ / (4π G ρ)`.
//!
//! The magnetization must be expressed in the observation point's local
//! frame. The 3×3 rotation that does so is an external collaborator: the
//! model-level operation takes it as a closure, and the per-element
//! operation consumes the already-rotated plain 3-vector.

use std::f64::consts::PI;

use crate::adaptive::evaluate_model;
use crate::constants::{EOTVOS2SI, G, GXX_SIZE_RATIO, GXY_SIZE_RATIO, GXZ_SIZE_RATIO, MU_0};
use crate::geometry::{ObservationPoint, Tesseroid};
use crate::kernels::{Quadrature, TensorRow};

/// The per-kernel accuracy ratios used for the three gradient evaluations
/// of a magnetic component, as the reference programs pass them.
pub fn default_row_ratios() -> [f64; 3] {
    [GXX_SIZE_RATIO, GXY_SIZE_RATIO, GXZ_SIZE_RATIO]
}

/// One magnetic field component of a single tesseroid.
///
/// `m_rotated` is the element's magnetization vector already rotated into
/// the observation point's north-east-down frame. The three gradient
/// components of `row` are evaluated (adaptively, with per-kernel `ratios`)
/// and combined by Poisson's relation. Output is in the unit of the ambient
/// field that defined the magnetization (nT for nT inputs).
pub fn tesseroid_magnetic_component(
    tess: &Tesseroid,
    point: &ObservationPoint,
    quads: &Quadrature,
    row: TensorRow,
    m_rotated: [f64; 3],
    adaptive: bool,
    ratios: [f64; 3],
) -> f64 {
    // Poisson's relation divides the density back out; a massless element
    // has no gravity gradient to scale and contributes nothing.
    if tess.density == 0.0 {
        log::debug!("skipping zero-density tesseroid in magnetic composition");
        return 0.0;
    }

    let components = row.components();
    let element = std::slice::from_ref(tess);
    let mut dot = 0.0;
    for i in 0..3 {
        let ggt = evaluate_model(
            element,
            point,
            quads,
            components[i],
            adaptive,
            Some(ratios[i]),
        );
        dot += ggt * m_rotated[i];
    }

    MU_0 * EOTVOS2SI * dot / (4.0 * PI * G * tess.density)
}

/// One magnetic field component of a whole model.
///
/// `rotate` supplies, per element, the magnetization vector expressed in
/// the observation point's frame (typically built from
/// [`crate::geometry::Magnetization::magnetization`] and an external
/// rotation routine). Elements without magnetic attributes are skipped.
pub fn magnetic_component<F>(
    model: &[Tesseroid],
    point: &ObservationPoint,
    quads: &Quadrature,
    row: TensorRow,
    rotate: F,
    adaptive: bool,
    ratios: Option<[f64; 3]>,
) -> f64
where
    F: Fn(&Tesseroid, &ObservationPoint) -> [f64; 3],
{
    let ratios = ratios.unwrap_or_else(default_row_ratios);
    model
        .iter()
        .filter(|tess| tess.mag.is_some())
        .map(|tess| {
            tesseroid_magnetic_component(
                tess,
                point,
                quads,
                row,
                rotate(tess, point),
                adaptive,
                ratios,
            )
        })
        .sum()
}
