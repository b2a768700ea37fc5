//! Closed-form tesseroid field integrands
//!
//! Gravitational potential, first derivatives, and the gradient tensor of a
//! single tesseroid, evaluated by a triple Gauss-Legendre sum over the
//! element's longitude, latitude, and radius extents (Asgharzadeh et al.,
//! 2007; Grombein et al., 2010).
//!
//! Derivatives are taken in the local coordinate frame of the observation
//! point: x north, y east, z up. Following the standard convention, only
//! for gz the z axis is inverted so that a positive density yields a
//! positive gz.

use serde::{Deserialize, Serialize};
use tess_glq::{Glq, GlqError};

use crate::constants::{
    DEG2RAD, G, GX_SIZE_RATIO, GXX_SIZE_RATIO, GXY_SIZE_RATIO, GXZ_SIZE_RATIO, GY_SIZE_RATIO,
    GYY_SIZE_RATIO, GYZ_SIZE_RATIO, GZ_SIZE_RATIO, GZZ_SIZE_RATIO, POT_SIZE_RATIO, SI2EOTVOS,
    SI2MGAL,
};
use crate::geometry::{ObservationPoint, Tesseroid};

/// One component of the gravitational field of a tesseroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldComponent {
    /// Gravitational potential (SI)
    Potential,
    /// North derivative of the potential (mGal)
    Gx,
    /// East derivative of the potential (mGal)
    Gy,
    /// Vertical derivative of the potential, positive down (mGal)
    Gz,
    /// Gradient tensor component ∂²V/∂x² (Eötvös)
    Gxx,
    /// Gradient tensor component ∂²V/∂x∂y (Eötvös)
    Gxy,
    /// Gradient tensor component ∂²V/∂x∂z (Eötvös)
    Gxz,
    /// Gradient tensor component ∂²V/∂y² (Eötvös)
    Gyy,
    /// Gradient tensor component ∂²V/∂y∂z (Eötvös)
    Gyz,
    /// Gradient tensor component ∂²V/∂z² (Eötvös)
    Gzz,
}

impl FieldComponent {
    /// Minimum distance-to-size ratio for the direct evaluation of this
    /// component to be accurate. Components converge at different rates, so
    /// the thresholds differ.
    pub fn default_ratio(self) -> f64 {
        match self {
            FieldComponent::Potential => POT_SIZE_RATIO,
            FieldComponent::Gx => GX_SIZE_RATIO,
            FieldComponent::Gy => GY_SIZE_RATIO,
            FieldComponent::Gz => GZ_SIZE_RATIO,
            FieldComponent::Gxx => GXX_SIZE_RATIO,
            FieldComponent::Gxy => GXY_SIZE_RATIO,
            FieldComponent::Gxz => GXZ_SIZE_RATIO,
            FieldComponent::Gyy => GYY_SIZE_RATIO,
            FieldComponent::Gyz => GYZ_SIZE_RATIO,
            FieldComponent::Gzz => GZZ_SIZE_RATIO,
        }
    }

    /// SI-to-output-unit conversion: Eötvös for gradients, mGal for first
    /// derivatives, none for the potential.
    fn unit_scale(self) -> f64 {
        match self {
            FieldComponent::Potential => 1.0,
            FieldComponent::Gx | FieldComponent::Gy | FieldComponent::Gz => SI2MGAL,
            _ => SI2EOTVOS,
        }
    }
}

/// One row of the gradient tensor, named by the local axis it is aligned
/// with. Used by the Poisson-relation magnetic composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TensorRow {
    /// (gxx, gxy, gxz)
    X,
    /// (gxy, gyy, gyz)
    Y,
    /// (gxz, gyz, gzz)
    Z,
}

impl TensorRow {
    /// The three gradient components making up this row.
    pub fn components(self) -> [FieldComponent; 3] {
        match self {
            TensorRow::X => [FieldComponent::Gxx, FieldComponent::Gxy, FieldComponent::Gxz],
            TensorRow::Y => [FieldComponent::Gxy, FieldComponent::Gyy, FieldComponent::Gyz],
            TensorRow::Z => [FieldComponent::Gxz, FieldComponent::Gyz, FieldComponent::Gzz],
        }
    }
}

/// The three per-axis quadrature rules used to integrate tesseroids.
#[derive(Debug, Clone)]
pub struct Quadrature {
    /// Rule for the longitude axis
    pub lon: Glq,
    /// Rule for the latitude axis
    pub lat: Glq,
    /// Rule for the radial axis
    pub r: Glq,
}

impl Quadrature {
    /// Build rules of the same order on all three axes.
    pub fn new(order: usize) -> Result<Self, GlqError> {
        Self::with_orders(order, order, order)
    }

    /// Build rules with per-axis orders.
    pub fn with_orders(lon: usize, lat: usize, r: usize) -> Result<Self, GlqError> {
        Ok(Self {
            lon: Glq::new(lon)?,
            lat: Glq::new(lat)?,
            r: Glq::new(r)?,
        })
    }
}

/// Geometry of one integration node relative to the observation point, in
/// the point's local spherical frame.
struct NodeGeometry {
    /// Squared Euclidean distance from point to node
    l_sqr: f64,
    /// Area-element factor r² cos(latitude)
    kappa: f64,
    /// Node offsets along the local (north, east, up) axes
    delta: [f64; 3],
}

/// Component-specific integrand at one node.
fn integrand(component: FieldComponent, g: &NodeGeometry) -> f64 {
    let [dx, dy, dz] = g.delta;
    let l_sqr = g.l_sqr;
    match component {
        FieldComponent::Potential => g.kappa / l_sqr.sqrt(),
        FieldComponent::Gx => g.kappa * dx / l_sqr.powf(1.5),
        FieldComponent::Gy => g.kappa * dy / l_sqr.powf(1.5),
        // z inverted for gz (positive down)
        FieldComponent::Gz => -g.kappa * dz / l_sqr.powf(1.5),
        FieldComponent::Gxx => g.kappa * (3.0 * dx * dx - l_sqr) / l_sqr.powf(2.5),
        FieldComponent::Gxy => g.kappa * 3.0 * dx * dy / l_sqr.powf(2.5),
        FieldComponent::Gxz => g.kappa * 3.0 * dx * dz / l_sqr.powf(2.5),
        FieldComponent::Gyy => g.kappa * (3.0 * dy * dy - l_sqr) / l_sqr.powf(2.5),
        FieldComponent::Gyz => g.kappa * 3.0 * dy * dz / l_sqr.powf(2.5),
        FieldComponent::Gzz => g.kappa * (3.0 * dz * dz - l_sqr) / l_sqr.powf(2.5),
    }
}

/// Scale of the final quadrature sum: the Newton constant, density, the
/// interval Jacobians (the 1/8 is the 0.5³ of the three affine node maps),
/// and the output-unit conversion.
fn sum_scale(component: FieldComponent, tess: &Tesseroid) -> f64 {
    component.unit_scale()
        * G
        * tess.density
        * DEG2RAD
        * (tess.e - tess.w)
        * DEG2RAD
        * (tess.n - tess.s)
        * (tess.r2 - tess.r1)
        * 0.125
}

/// Visit every integration node of the tesseroid with its combined weight
/// and local geometry. The per-node trigonometry shared by all components is
/// computed once here.
fn for_each_node<F>(
    tess: &Tesseroid,
    point: &ObservationPoint,
    glq_lon: &Glq,
    glq_lat: &Glq,
    glq_r: &Glq,
    mut visit: F,
) where
    F: FnMut(f64, &NodeGeometry),
{
    let lon_nodes = glq_lon.scaled_nodes(tess.w, tess.e);
    let lat_nodes = glq_lat.scaled_nodes(tess.s, tess.n);
    let r_nodes = glq_r.scaled_nodes(tess.r1, tess.r2);

    let rp = point.radius;
    let coslatp = (DEG2RAD * point.lat).cos();
    let sinlatp = (DEG2RAD * point.lat).sin();

    for (k, &lonc) in lon_nodes.iter().enumerate() {
        let w_lon = glq_lon.weights()[k];
        let coslon = (DEG2RAD * (point.lon - lonc)).cos();
        let sinlon = (DEG2RAD * (lonc - point.lon)).sin();
        for (j, &latc) in lat_nodes.iter().enumerate() {
            let w_lat = glq_lat.weights()[j];
            let sinlatc = (DEG2RAD * latc).sin();
            let coslatc = (DEG2RAD * latc).cos();
            // Cosine of the angular distance between point and node.
            let cospsi = sinlatp * sinlatc + coslatp * coslatc * coslon;
            let kphi = coslatp * sinlatc - sinlatp * coslatc * coslon;
            for (i, &rc) in r_nodes.iter().enumerate() {
                let w_r = glq_r.weights()[i];
                let geometry = NodeGeometry {
                    l_sqr: rp * rp + rc * rc - 2.0 * rp * rc * cospsi,
                    kappa: rc * rc * coslatc,
                    delta: [rc * kphi, rc * coslatc * sinlon, rc * cospsi - rp],
                };
                visit(w_lon * w_lat * w_r, &geometry);
            }
        }
    }
}

/// Evaluate one field component of a single tesseroid at a point.
///
/// The quadrature rules are scaled to the tesseroid's intervals internally;
/// the rules themselves are read-only and can be shared.
pub fn evaluate_component(
    tess: &Tesseroid,
    point: &ObservationPoint,
    glq_lon: &Glq,
    glq_lat: &Glq,
    glq_r: &Glq,
    component: FieldComponent,
) -> f64 {
    let mut sum = 0.0;
    for_each_node(tess, point, glq_lon, glq_lat, glq_r, |weight, geometry| {
        sum += weight * integrand(component, geometry);
    });
    sum * sum_scale(component, tess)
}

/// Evaluate the three gradient components of one tensor row in a single
/// pass over the integration nodes.
pub fn evaluate_tensor_row(
    tess: &Tesseroid,
    point: &ObservationPoint,
    quads: &Quadrature,
    row: TensorRow,
) -> [f64; 3] {
    let components = row.components();
    let mut sums = [0.0; 3];
    for_each_node(tess, point, &quads.lon, &quads.lat, &quads.r, |weight, geometry| {
        for (sum, &component) in sums.iter_mut().zip(components.iter()) {
            *sum += weight * integrand(component, geometry);
        }
    });
    [
        sums[0] * sum_scale(components[0], tess),
        sums[1] * sum_scale(components[1], tess),
        sums[2] * sum_scale(components[2], tess),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MEAN_EARTH_RADIUS;

    fn sample() -> Tesseroid {
        Tesseroid::new(
            44.0,
            46.0,
            -1.0,
            1.0,
            MEAN_EARTH_RADIUS - 100_000.0,
            MEAN_EARTH_RADIUS,
            1000.0,
        )
        .unwrap()
    }

    fn quads() -> Quadrature {
        Quadrature::new(8).unwrap()
    }

    fn rel_close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * a.abs().max(b.abs()).max(1e-30)
    }

    #[test]
    fn test_signs_above_positive_density() {
        let tess = sample();
        let q = quads();
        let point = ObservationPoint::new(45.0, 0.0, MEAN_EARTH_RADIUS + 1_000_000.0);

        let pot = evaluate_component(&tess, &point, &q.lon, &q.lat, &q.r, FieldComponent::Potential);
        let gz = evaluate_component(&tess, &point, &q.lon, &q.lat, &q.r, FieldComponent::Gz);
        let gzz = evaluate_component(&tess, &point, &q.lon, &q.lat, &q.r, FieldComponent::Gzz);

        assert!(pot > 0.0, "potential above a positive mass: {}", pot);
        assert!(gz > 0.0, "gz positive down above a positive mass: {}", gz);
        assert!(gzz > 0.0, "gzz above the element center: {}", gzz);
    }

    #[test]
    fn test_mirror_symmetry_across_central_meridian() {
        let tess = sample();
        let q = quads();
        let r = MEAN_EARTH_RADIUS + 500_000.0;
        let west = ObservationPoint::new(43.0, 10.0, r);
        let east = ObservationPoint::new(47.0, 10.0, r);

        let gxx_w = evaluate_component(&tess, &west, &q.lon, &q.lat, &q.r, FieldComponent::Gxx);
        let gxx_e = evaluate_component(&tess, &east, &q.lon, &q.lat, &q.r, FieldComponent::Gxx);
        assert!(rel_close(gxx_w, gxx_e, 1e-10), "gxx {} vs {}", gxx_w, gxx_e);

        let gxy_w = evaluate_component(&tess, &west, &q.lon, &q.lat, &q.r, FieldComponent::Gxy);
        let gxy_e = evaluate_component(&tess, &east, &q.lon, &q.lat, &q.r, FieldComponent::Gxy);
        assert!(
            rel_close(gxy_w, -gxy_e, 1e-10),
            "gxy antisymmetric: {} vs {}",
            gxy_w,
            gxy_e
        );
    }

    #[test]
    fn test_laplace_trace_vanishes_outside_source() {
        let tess = sample();
        let q = quads();
        let point = ObservationPoint::new(0.0, 0.0, MEAN_EARTH_RADIUS + 1_500_000.0);

        let gxx = evaluate_component(&tess, &point, &q.lon, &q.lat, &q.r, FieldComponent::Gxx);
        let gyy = evaluate_component(&tess, &point, &q.lon, &q.lat, &q.r, FieldComponent::Gyy);
        let gzz = evaluate_component(&tess, &point, &q.lon, &q.lat, &q.r, FieldComponent::Gzz);

        let trace = gxx + gyy + gzz;
        assert!(trace.abs() < 1e-4, "trace = {} Eötvös", trace);
    }

    #[test]
    fn test_tensor_row_matches_single_components() {
        let tess = sample();
        let q = quads();
        let point = ObservationPoint::new(40.0, 5.0, MEAN_EARTH_RADIUS + 300_000.0);

        for row in [TensorRow::X, TensorRow::Y, TensorRow::Z] {
            let grouped = evaluate_tensor_row(&tess, &point, &q, row);
            for (value, component) in grouped.iter().zip(row.components()) {
                let single =
                    evaluate_component(&tess, &point, &q.lon, &q.lat, &q.r, component);
                assert!(
                    rel_close(*value, single, 1e-14),
                    "{:?} {:?}: {} vs {}",
                    row,
                    component,
                    value,
                    single
                );
            }
        }
    }

    #[test]
    fn test_doubling_density_doubles_field() {
        let tess = sample();
        let mut dense = tess;
        dense.density = 2000.0;
        let q = quads();
        let point = ObservationPoint::new(45.0, 0.0, MEAN_EARTH_RADIUS + 800_000.0);

        let one = evaluate_component(&tess, &point, &q.lon, &q.lat, &q.r, FieldComponent::Gzz);
        let two = evaluate_component(&dense, &point, &q.lon, &q.lat, &q.r, FieldComponent::Gzz);
        assert!(rel_close(2.0 * one, two, 1e-14));
    }
}
