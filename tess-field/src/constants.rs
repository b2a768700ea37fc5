//! Physical constants, unit conversions, and accuracy ratios
//!
//! All values are in SI units unless noted otherwise.

use std::f64::consts::PI;

/// Mean Earth radius (m)
pub const MEAN_EARTH_RADIUS: f64 = 6378137.0;

/// The gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.673e-11;

/// Vacuum permeability μ₀ (T m A⁻¹)
pub const MU_0: f64 = 4.0 * PI * 1e-7;

/// Conversion factor from SI units (1/s²) to Eötvös
pub const SI2EOTVOS: f64 = 1e9;

/// Conversion factor from Eötvös to SI units
pub const EOTVOS2SI: f64 = 1e-9;

/// Conversion factor from SI units (m/s²) to mGal
pub const SI2MGAL: f64 = 1e5;

/// Degrees to radians
pub const DEG2RAD: f64 = PI / 180.0;

/// Minimum distance-to-size ratio for accurate potential computation
pub const POT_SIZE_RATIO: f64 = 1.5;
/// Minimum distance-to-size ratio for accurate gx computation
pub const GX_SIZE_RATIO: f64 = 3.0;
/// Minimum distance-to-size ratio for accurate gy computation
pub const GY_SIZE_RATIO: f64 = 3.0;
/// Minimum distance-to-size ratio for accurate gz computation
pub const GZ_SIZE_RATIO: f64 = 2.0;
/// Minimum distance-to-size ratio for accurate gxx computation
pub const GXX_SIZE_RATIO: f64 = 3.0;
/// Minimum distance-to-size ratio for accurate gxy computation
pub const GXY_SIZE_RATIO: f64 = 4.5;
/// Minimum distance-to-size ratio for accurate gxz computation
pub const GXZ_SIZE_RATIO: f64 = 4.0;
/// Minimum distance-to-size ratio for accurate gyy computation
pub const GYY_SIZE_RATIO: f64 = 3.0;
/// Minimum distance-to-size ratio for accurate gyz computation
pub const GYZ_SIZE_RATIO: f64 = 4.0;
/// Minimum distance-to-size ratio for accurate gzz computation
pub const GZZ_SIZE_RATIO: f64 = 3.0;

/// Maximum number of octant halvings applied to a single model element.
///
/// The subdivision loop terminates geometrically for any point off the
/// element; the bound only guards floating-point edge-alignment pathologies.
pub const MAX_SPLIT_DEPTH: u32 = 32;
