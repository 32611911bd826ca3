//! Spherical-astronomy geometry shared by both visualizations.
//!
//! Frames used throughout:
//! - **Equatorial**: x toward the vernal equinox (0h), y toward 6h, z toward
//!   the north celestial pole.
//! - **Ecliptic**: x toward the vernal equinox, z toward the ecliptic pole.
//!   Equatorial = Rx(ε) · ecliptic.
//! - **Horizon**: x east, y north, z zenith.
//!
//! All vectors are unit vectors on the celestial sphere. The sun moves
//! uniformly along the ecliptic (circular orbit), with mean longitude
//! λ = 90° + t where t is the time-of-year angle from the June solstice.
//! This gives the declination sin δ = sin ε · cos t.

pub mod sky;
pub mod sun_path;

#[cfg(test)]
mod proptest_geometry;

use std::f64::consts::TAU;

use bevy::math::{DMat3, DVec3};

pub use sky::{Cardinal, SkyGeometry, SunPosition, evaluate_sky};
pub use sun_path::{
    AnnualPoint, AnnualSeries, DailySunPath, DaylightRegime, Insolation, SeasonPath, Sunrise,
    SunPathSample, annual_series, daily_insolation, evaluate_sun_path, reference_latitudes,
    solstice_paths, sunrise_azimuth, sunrise_hour_angle,
};

/// Number of segments used for every circle on the sphere.
pub const CIRCLE_SEGMENTS: usize = 100;

/// Horizontal extent below which a direction is treated as the zenith or nadir.
const AZIMUTH_EPSILON: f64 = 1e-12;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid {name}: {value} (expected {min} to {max})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(&'static str),
}

/// Sun position on the ecliptic for a time-of-year angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarCoordinates {
    /// Mean ecliptic longitude (radians). Also the right ascension of the mean sun.
    pub longitude: f64,
    /// Declination (radians).
    pub declination: f64,
    /// Right ascension (radians, `[0, 2π)`).
    pub right_ascension: f64,
}

/// Ecliptic coordinates of the sun for an obliquity and time of year (both radians).
pub fn solar_coordinates(obliquity: f64, time_of_year: f64) -> SolarCoordinates {
    let longitude = std::f64::consts::FRAC_PI_2 + time_of_year;
    let (sin_l, cos_l) = longitude.sin_cos();
    SolarCoordinates {
        longitude,
        declination: solar_declination(obliquity, time_of_year),
        right_ascension: (obliquity.cos() * sin_l).atan2(cos_l).rem_euclid(TAU),
    }
}

/// Solar declination (radians): sin δ = sin ε · cos t.
pub fn solar_declination(obliquity: f64, time_of_year: f64) -> f64 {
    (time_of_year.cos() * obliquity.sin()).clamp(-1.0, 1.0).asin()
}

/// Rotation taking ecliptic vectors into the equatorial frame.
pub fn ecliptic_to_equatorial(obliquity: f64) -> DMat3 {
    DMat3::from_rotation_x(obliquity)
}

/// Rotation taking equatorial vectors into the horizon frame of an observer
/// at `latitude` whose meridian lies at sidereal angle `sidereal` (both radians).
pub fn equatorial_to_horizon(latitude: f64, sidereal: f64) -> DMat3 {
    meridian_to_horizon(latitude) * DMat3::from_rotation_z(-sidereal)
}

/// Rotation from the meridian frame (x: equator on the meridian, y: east,
/// z: celestial pole) into the horizon frame.
fn meridian_to_horizon(latitude: f64) -> DMat3 {
    let (s, c) = latitude.sin_cos();
    DMat3::from_cols(
        DVec3::new(0.0, -s, c),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, c, s),
    )
}

/// Horizon-frame direction of a body at `declination` and `hour_angle`
/// seen from `latitude` (all radians).
///
/// Equivalent to the spherical law of cosines:
/// sin a = sin φ sin δ + cos φ cos δ cos H.
pub fn hour_angle_to_horizon(latitude: f64, declination: f64, hour_angle: f64) -> DVec3 {
    let (sin_d, cos_d) = declination.sin_cos();
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let meridian = DVec3::new(cos_d * cos_h, -cos_d * sin_h, sin_d);
    meridian_to_horizon(latitude) * meridian
}

/// Altitude and azimuth of a direction in the horizon frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Horizontal {
    /// Altitude above the horizon, `[-90, 90]` degrees.
    pub altitude_deg: f64,
    /// Azimuth clockwise from north, `[0, 360)` degrees.
    pub azimuth_deg: f64,
}

impl Horizontal {
    /// Altitude/azimuth of a horizon-frame vector.
    ///
    /// Azimuth is undefined at the zenith and nadir; it is reported as 0° (north) there.
    pub fn from_vector(v: DVec3) -> Self {
        Self {
            altitude_deg: altitude_deg(v),
            azimuth_deg: azimuth_deg(v).unwrap_or(0.0),
        }
    }
}

/// Altitude of a horizon-frame vector in degrees.
pub fn altitude_deg(v: DVec3) -> f64 {
    (v.z / v.length()).clamp(-1.0, 1.0).asin().to_degrees()
}

/// Azimuth of a horizon-frame vector in degrees clockwise from north.
pub fn azimuth_deg(v: DVec3) -> Result<f64, GeometryError> {
    if v.x.hypot(v.y) < AZIMUTH_EPSILON * v.length() {
        return Err(GeometryError::NumericDegeneracy(
            "azimuth undefined at the zenith or nadir",
        ));
    }
    Ok(normalize_degrees(v.x.atan2(v.y).to_degrees()))
}

/// Wrap an angle into `[0, 360)` degrees.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Parallel (small circle) at polar angle `colatitude` around the z axis.
pub fn parallel(colatitude: f64) -> Vec<DVec3> {
    let (sin_q, cos_q) = colatitude.sin_cos();
    circle_samples()
        .map(|p| DVec3::new(sin_q * p.cos(), sin_q * p.sin(), cos_q))
        .collect()
}

/// Great circle through both poles at longitude `longitude`.
pub fn meridian(longitude: f64) -> Vec<DVec3> {
    let (sin_p, cos_p) = longitude.sin_cos();
    circle_samples()
        .map(|q| DVec3::new(q.sin() * cos_p, q.sin() * sin_p, q.cos()))
        .collect()
}

/// Coordinate grid with `2 * parallels - 1` interior parallels and
/// `2 * meridians` meridian great circles.
pub fn globe(parallels: usize, meridians: usize) -> Vec<Vec<DVec3>> {
    let mut result = Vec::new();
    let rows = parallels * 2;
    for i in 1..rows {
        result.push(parallel(std::f64::consts::PI * i as f64 / rows as f64));
    }
    let cols = meridians * 2;
    for j in 0..cols {
        result.push(meridian(std::f64::consts::PI * j as f64 / cols as f64));
    }
    result
}

/// Apply a rotation to every point of a curve.
pub fn transform(rotation: DMat3, curve: &[DVec3]) -> Vec<DVec3> {
    curve.iter().map(|&p| rotation * p).collect()
}

/// Evenly spaced angles over `[-π, π]`, both ends included.
fn circle_samples() -> impl Iterator<Item = f64> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| -std::f64::consts::PI + TAU * i as f64 / CIRCLE_SEGMENTS as f64)
}
