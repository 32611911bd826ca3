//! Daily path of the sun, daylight, and sunrise position.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use bevy::math::DVec3;

use super::{GeometryError, Horizontal, hour_angle_to_horizon, solar_declination};
use crate::types::{DEGREES_PER_HOUR, HOURS_PER_DAY, SunPathConfig};

/// Samples taken across one solar day (15-minute steps).
pub const SAMPLES_PER_DAY: usize = 96;

/// Samples taken across one year for the annual series.
pub const ANNUAL_SAMPLES: usize = 361;

/// Below this, cos φ · cos δ is treated as zero (pole, or sun at a celestial pole).
const POLAR_EPSILON: f64 = 1e-12;

/// Whether the sun crosses the horizon during the day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DaylightRegime {
    /// Sun rises and sets.
    Normal,
    /// Sun stays above the horizon all day.
    PolarDay,
    /// Sun stays below the horizon all day.
    PolarNight,
}

/// Daily insolation measures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insolation {
    /// Fraction of the solar day with the sun above the horizon, `[0, 1]`.
    pub daylight_fraction: f64,
    /// Daily mean of the cosine of the solar zenith angle, clipped at zero
    /// below the horizon (top-of-atmosphere insolation relative to the
    /// solar constant).
    pub mean_cos_zenith: f64,
}

/// Sunrise position.
///
/// For polar day and polar night there is no horizon crossing; the azimuth is then
/// the limiting value at lower culmination (polar day) or upper culmination
/// (polar night), which is where the sun comes closest to the horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sunrise {
    /// Azimuth clockwise from north, `[0, 360)` degrees.
    pub azimuth_deg: f64,
    /// Hour angle of sunrise, `[-180, 0]` degrees.
    pub hour_angle_deg: f64,
    pub regime: DaylightRegime,
}

/// One sample of the sun's daily path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunPathSample {
    /// Apparent solar time, `[0, 24]` hours.
    pub hour: f64,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    /// Unit vector in the horizon frame (x east, y north, z zenith).
    pub direction: DVec3,
}

/// Sun path over one day with its derived scalars.
#[derive(Clone, Debug, PartialEq)]
pub struct DailySunPath {
    pub declination_deg: f64,
    /// `SAMPLES_PER_DAY + 1` samples from midnight to midnight.
    pub samples: Vec<SunPathSample>,
    pub insolation: Insolation,
    pub sunrise: Sunrise,
}

impl DailySunPath {
    /// Hours of daylight.
    pub fn day_length_hours(&self) -> f64 {
        self.insolation.daylight_fraction * HOURS_PER_DAY
    }

    /// Highest altitude reached during the day (degrees).
    pub fn max_altitude_deg(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.altitude_deg)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Evaluate the sun's daily path for a latitude and day of year.
pub fn evaluate_sun_path(config: &SunPathConfig) -> Result<DailySunPath, GeometryError> {
    config.validate()?;

    let latitude = config.latitude_deg.to_radians();
    let declination = solar_declination(config.obliquity_deg.to_radians(), config.time_of_year());

    let samples = (0..=SAMPLES_PER_DAY)
        .map(|i| {
            let hour = HOURS_PER_DAY * i as f64 / SAMPLES_PER_DAY as f64;
            let hour_angle = ((hour - 12.0) * DEGREES_PER_HOUR).to_radians();
            let direction = hour_angle_to_horizon(latitude, declination, hour_angle);
            let horizontal = Horizontal::from_vector(direction);
            SunPathSample {
                hour,
                altitude_deg: horizontal.altitude_deg,
                azimuth_deg: horizontal.azimuth_deg,
                direction,
            }
        })
        .collect();

    Ok(DailySunPath {
        declination_deg: declination.to_degrees(),
        samples,
        insolation: daily_insolation(latitude, declination),
        sunrise: sunrise_azimuth(latitude, declination),
    })
}

/// Cosine and sine of the sunrise hour angle H0 (radians), with the regime.
///
/// Solves cos H0 = −tan φ tan δ, written as −(sin φ sin δ)/(cos φ cos δ) so the
/// pole needs no special tangent handling. Exact pairs are returned for the polar
/// regimes so downstream limits land exactly on the meridian.
fn sunrise_cos_sin(latitude: f64, declination: f64) -> (f64, f64, DaylightRegime) {
    let numerator = latitude.sin() * declination.sin();
    let denominator = latitude.cos() * declination.cos();

    if denominator.abs() < POLAR_EPSILON {
        return if numerator > 0.0 {
            (-1.0, 0.0, DaylightRegime::PolarDay)
        } else if numerator < 0.0 {
            (1.0, 0.0, DaylightRegime::PolarNight)
        } else {
            // Sun circling on the horizon: treat as six hours either side of noon
            (0.0, 1.0, DaylightRegime::Normal)
        };
    }

    let cos_h0 = -numerator / denominator;
    if cos_h0 <= -1.0 {
        (-1.0, 0.0, DaylightRegime::PolarDay)
    } else if cos_h0 >= 1.0 {
        (1.0, 0.0, DaylightRegime::PolarNight)
    } else {
        (cos_h0, (1.0 - cos_h0 * cos_h0).sqrt(), DaylightRegime::Normal)
    }
}

/// Sunrise hour angle H0 in radians, `[0, π]`: π for polar day, 0 for polar night.
pub fn sunrise_hour_angle(latitude: f64, declination: f64) -> (f64, DaylightRegime) {
    let (cos_h0, sin_h0, regime) = sunrise_cos_sin(latitude, declination);
    (sin_h0.atan2(cos_h0), regime)
}

/// Daylight fraction and clipped mean cos(zenith) for a day (arguments in radians).
///
/// The mean is the closed-form integral of max(0, cos Z) over the day:
/// (H0 sin φ sin δ + cos φ cos δ sin H0) / π.
pub fn daily_insolation(latitude: f64, declination: f64) -> Insolation {
    let (cos_h0, sin_h0, _) = sunrise_cos_sin(latitude, declination);
    let h0 = sin_h0.atan2(cos_h0);
    let integral =
        h0 * latitude.sin() * declination.sin() + latitude.cos() * declination.cos() * sin_h0;
    Insolation {
        daylight_fraction: h0 / PI,
        mean_cos_zenith: (integral / PI).max(0.0),
    }
}

/// Sunrise azimuth for a latitude and declination (radians).
///
/// The spherical triangle pole–zenith–sun is solved at hour angle −H0:
/// east component cos δ sin H0, north component cos φ sin δ − sin φ cos δ cos H0.
pub fn sunrise_azimuth(latitude: f64, declination: f64) -> Sunrise {
    let (cos_h0, sin_h0, regime) = sunrise_cos_sin(latitude, declination);
    let east = declination.cos() * sin_h0;
    let north = latitude.cos() * declination.sin() - latitude.sin() * declination.cos() * cos_h0;
    let azimuth_deg = super::azimuth_deg(DVec3::new(east, north, 0.0)).unwrap_or(0.0);
    Sunrise {
        azimuth_deg,
        hour_angle_deg: -sin_h0.atan2(cos_h0).to_degrees(),
        regime,
    }
}

/// Reference sun path for a season marker.
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonPath {
    pub label: &'static str,
    /// Time-of-year angle (radians from the June solstice).
    pub time_of_year: f64,
    /// Closed curve in the horizon frame.
    pub points: Vec<DVec3>,
}

/// Sun paths at the June solstice, the equinoxes, and the December solstice.
pub fn solstice_paths(obliquity_deg: f64, latitude_deg: f64) -> Vec<SeasonPath> {
    let obliquity = obliquity_deg.to_radians();
    let latitude = latitude_deg.to_radians();
    [
        ("June solstice", 0.0),
        ("equinoxes", FRAC_PI_2),
        ("December solstice", PI),
    ]
    .into_iter()
    .map(|(label, time_of_year)| SeasonPath {
        label,
        time_of_year,
        points: diurnal_circle(latitude, solar_declination(obliquity, time_of_year)),
    })
    .collect()
}

/// Closed diurnal circle in the horizon frame (radians in).
pub fn diurnal_circle(latitude: f64, declination: f64) -> Vec<DVec3> {
    (0..=super::CIRCLE_SEGMENTS)
        .map(|i| {
            let hour_angle = -PI + TAU * i as f64 / super::CIRCLE_SEGMENTS as f64;
            hour_angle_to_horizon(latitude, declination, hour_angle)
        })
        .collect()
}

/// One point of an annual series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnualPoint {
    /// Fraction of the year from the June solstice, `[-0.5, 0.5]`.
    pub year_fraction: f64,
    pub daylight_fraction: f64,
    pub sunrise_azimuth_deg: f64,
}

/// Yearly variation of daylight and sunrise azimuth at one latitude.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnualSeries {
    pub latitude_deg: f64,
    pub points: Vec<AnnualPoint>,
}

/// Sample daylight fraction and sunrise azimuth over one year.
pub fn annual_series(obliquity_deg: f64, latitude_deg: f64, samples: usize) -> AnnualSeries {
    let obliquity = obliquity_deg.to_radians();
    let latitude = latitude_deg.to_radians();
    let steps = samples.max(2) - 1;
    let points = (0..=steps)
        .map(|i| {
            let year_fraction = -0.5 + i as f64 / steps as f64;
            let declination = solar_declination(obliquity, TAU * year_fraction);
            AnnualPoint {
                year_fraction,
                daylight_fraction: daily_insolation(latitude, declination).daylight_fraction,
                sunrise_azimuth_deg: sunrise_azimuth(latitude, declination).azimuth_deg,
            }
        })
        .collect();
    AnnualSeries { latitude_deg, points }
}

/// Latitudes plotted by the annual charts: 0° to 75° in 15° steps.
pub fn reference_latitudes() -> [f64; 6] {
    [0.0, 15.0, 30.0, 45.0, 60.0, 75.0]
}
