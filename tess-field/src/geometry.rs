//! Model geometry: tesseroids and observation points
//!
//! A tesseroid is a volumetric element bounded by two meridians, two
//! parallels, and two concentric spheres. Bounds are immutable once
//! constructed; new tesseroids only come out of [`Tesseroid::split`].

use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, MEAN_EARTH_RADIUS, MU_0};
use crate::error::{ModelError, Result};

/// Magnetic attributes of a tesseroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Magnetization {
    /// Magnetic susceptibility (dimensionless, SI)
    pub susceptibility: f64,
    /// Ambient field components (Bx north, By east, Bz down), in nT
    pub field: [f64; 3],
}

impl Magnetization {
    /// The induced magnetization vector `χ/μ₀ · B` in the element's local
    /// north-east-down frame.
    pub fn magnetization(&self) -> [f64; 3] {
        let b_to_h = self.susceptibility / MU_0;
        [
            self.field[0] * b_to_h,
            self.field[1] * b_to_h,
            self.field[2] * b_to_h,
        ]
    }
}

/// A spherical-shell prism element.
///
/// Angular bounds are in degrees; radial bounds are measured from the
/// Earth's center in meters, with `r1 < r2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tesseroid {
    /// Western longitude bound (degrees)
    pub w: f64,
    /// Eastern longitude bound (degrees)
    pub e: f64,
    /// Southern latitude bound (degrees)
    pub s: f64,
    /// Northern latitude bound (degrees)
    pub n: f64,
    /// Inner radius bound (m)
    pub r1: f64,
    /// Outer radius bound (m)
    pub r2: f64,
    /// Density (kg/m³)
    pub density: f64,
    /// Optional magnetic attributes
    pub mag: Option<Magnetization>,
}

impl Tesseroid {
    /// Create a tesseroid, validating the bound ordering.
    ///
    /// Malformed bounds are a fatal input error: they are reported, never
    /// silently reordered.
    #[allow(clippy::too_many_arguments)]
    pub fn new(w: f64, e: f64, s: f64, n: f64, r1: f64, r2: f64, density: f64) -> Result<Self> {
        if !(w < e && s < n && r1 < r2) {
            return Err(ModelError::InvalidBounds { w, e, s, n, r1, r2 });
        }
        Ok(Self {
            w,
            e,
            s,
            n,
            r1,
            r2,
            density,
            mag: None,
        })
    }

    /// Attach magnetic attributes.
    pub fn with_magnetization(mut self, mag: Magnetization) -> Self {
        self.mag = Some(mag);
        self
    }

    /// Angular midpoint (longitude, latitude) in degrees.
    pub fn center(&self) -> (f64, f64) {
        (0.5 * (self.w + self.e), 0.5 * (self.s + self.n))
    }

    /// Whether the point falls within (or on the boundary of) the element.
    pub fn contains(&self, point: &ObservationPoint) -> bool {
        point.lon >= self.w
            && point.lon <= self.e
            && point.lat >= self.s
            && point.lat <= self.n
            && point.radius >= self.r1
            && point.radius <= self.r2
    }

    /// Volume of the element (m³): `Δλ (sin φn − sin φs) (r2³ − r1³) / 3`.
    pub fn volume(&self) -> f64 {
        let dlon = DEG2RAD * (self.e - self.w);
        let dsin = (DEG2RAD * self.n).sin() - (DEG2RAD * self.s).sin();
        dlon * dsin * (self.r2.powi(3) - self.r1.powi(3)) / 3.0
    }

    /// Partition the element into 8 children of half the extent along each
    /// axis. Density and magnetic attributes are copied unchanged.
    ///
    /// Child order: radius slowest, then latitude, then longitude.
    pub fn split(&self) -> [Tesseroid; 8] {
        let dlon = 0.5 * (self.e - self.w);
        let dlat = 0.5 * (self.n - self.s);
        let dr = 0.5 * (self.r2 - self.r1);
        let ws = [self.w, self.w + dlon];
        let ss = [self.s, self.s + dlat];
        let r1s = [self.r1, self.r1 + dr];

        std::array::from_fn(|t| {
            let i = t % 2;
            let j = (t / 2) % 2;
            let k = t / 4;
            Tesseroid {
                w: ws[i],
                e: ws[i] + dlon,
                s: ss[j],
                n: ss[j] + dlat,
                r1: r1s[k],
                r2: r1s[k] + dr,
                density: self.density,
                mag: self.mag,
            }
        })
    }
}

/// A computation point in spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoint {
    /// Longitude (degrees)
    pub lon: f64,
    /// Latitude (degrees)
    pub lat: f64,
    /// Radius from the Earth's center (m)
    pub radius: f64,
}

impl ObservationPoint {
    /// Create a point from longitude, latitude, and radius.
    pub fn new(lon: f64, lat: f64, radius: f64) -> Self {
        Self { lon, lat, radius }
    }

    /// Create a point from longitude, latitude, and height above the mean
    /// Earth radius.
    pub fn from_height(lon: f64, lat: f64, height: f64) -> Self {
        Self {
            lon,
            lat,
            radius: MEAN_EARTH_RADIUS + height,
        }
    }
}
