//! Parameter state and constants shared by both visualizations.
//!
//! Time of year is a uniform (mean) angle measured from the June solstice,
//! so the sun moves on a circular orbit and only the obliquity shapes its
//! apparent path.

use std::f64::consts::TAU;

use bevy::prelude::*;

use crate::geometry::GeometryError;

/// Obliquity of the Earth's axis at J2000 (degrees).
pub const EARTH_OBLIQUITY_DEG: f64 = 23.4392811;

/// Length of the year used by the time-of-year angle (days).
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Day of year of the June solstice; the time-of-year angle is zero here.
pub const JUNE_SOLSTICE_DAY: f64 = 172.0;

/// Day of year of the September equinox (a quarter year after the June solstice).
pub const SEPTEMBER_EQUINOX_DAY: f64 = JUNE_SOLSTICE_DAY + DAYS_PER_YEAR / 4.0;

/// Day of year of the December solstice.
pub const DECEMBER_SOLSTICE_DAY: f64 = JUNE_SOLSTICE_DAY + DAYS_PER_YEAR / 2.0;

/// Day of year of the March equinox.
pub const MARCH_EQUINOX_DAY: f64 = JUNE_SOLSTICE_DAY - DAYS_PER_YEAR / 4.0;

/// Hours in a solar day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Rotation of the sky per hour of time (degrees).
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Valid obliquity range (degrees, inclusive).
pub const OBLIQUITY_RANGE: (f64, f64) = (0.0, 90.0);

/// Valid latitude range (degrees, inclusive).
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid day-of-year range: `[1, 366)`, so every integer day 1..=365 is accepted.
pub const DAY_OF_YEAR_RANGE: (f64, f64) = (1.0, 366.0);

/// Valid hour-of-day range: `[0, 24)`.
pub const HOUR_OF_DAY_RANGE: (f64, f64) = (0.0, HOURS_PER_DAY);

/// Largest value the hour slider can produce (23:59).
pub const HOUR_SLIDER_MAX: f64 = HOURS_PER_DAY - 1.0 / 60.0;

/// Time-of-year angle in radians for a (possibly fractional) day of year.
///
/// Zero at the June solstice, ±π at the December solstice.
pub fn time_of_year(day_of_year: f64) -> f64 {
    TAU * (day_of_year - JUNE_SOLSTICE_DAY) / DAYS_PER_YEAR
}

/// How the hour-of-day slider maps onto the rotation of the sky.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DayType {
    /// Apparent solar time: the sun crosses the meridian at 12:00.
    #[default]
    Apparent,
    /// Mean solar time: noon positions of the sun trace an analemma.
    Mean,
    /// Local sidereal time: the sky is fixed to the clock.
    Sidereal,
}

impl DayType {
    /// Next day type in the cycle order used by the UI.
    pub fn next(self) -> Self {
        match self {
            DayType::Apparent => DayType::Mean,
            DayType::Mean => DayType::Sidereal,
            DayType::Sidereal => DayType::Apparent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayType::Apparent => "apparent solar",
            DayType::Mean => "mean solar",
            DayType::Sidereal => "sidereal",
        }
    }
}

/// Which reference frame is held fixed on screen.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ViewFrame {
    /// Ecliptic plane horizontal, ecliptic pole up.
    Ecliptic,
    /// Celestial equator horizontal, north celestial pole up.
    Equator,
    /// Local horizon horizontal, zenith up.
    #[default]
    Horizon,
}

impl ViewFrame {
    /// Next view in the cycle order used by the UI.
    pub fn next(self) -> Self {
        match self {
            ViewFrame::Ecliptic => ViewFrame::Equator,
            ViewFrame::Equator => ViewFrame::Horizon,
            ViewFrame::Horizon => ViewFrame::Ecliptic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewFrame::Ecliptic => "ecliptic",
            ViewFrame::Equator => "equator",
            ViewFrame::Horizon => "horizon",
        }
    }
}

/// Parameters of the celestial-sphere view.
///
/// Replaced wholesale whenever a control changes; never mutated field by field
/// from outside the controller.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ObserverConfig {
    /// Tilt of the rotation axis against the orbital plane (degrees, 0..=90).
    pub obliquity_deg: f64,
    /// Observer latitude (degrees, -90..=90).
    pub latitude_deg: f64,
    /// Day of year, `[1, 366)`; fractional days are allowed.
    pub day_of_year: f64,
    /// Hour of day, `[0, 24)`, interpreted according to `day_type`.
    pub hour_of_day: f64,
    /// Clock convention for `hour_of_day`.
    pub day_type: DayType,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            obliquity_deg: EARTH_OBLIQUITY_DEG,
            latitude_deg: 40.0,
            day_of_year: JUNE_SOLSTICE_DAY,
            hour_of_day: 12.0,
            day_type: DayType::Apparent,
        }
    }
}

impl ObserverConfig {
    /// Check every field against its domain.
    pub fn validate(&self) -> Result<(), GeometryError> {
        check_inclusive("obliquity", self.obliquity_deg, OBLIQUITY_RANGE)?;
        check_inclusive("latitude", self.latitude_deg, LATITUDE_RANGE)?;
        check_half_open("day of year", self.day_of_year, DAY_OF_YEAR_RANGE)?;
        check_half_open("hour of day", self.hour_of_day, HOUR_OF_DAY_RANGE)
    }

    /// Time-of-year angle (radians from the June solstice).
    pub fn time_of_year(&self) -> f64 {
        time_of_year(self.day_of_year)
    }
}

/// Parameters of the sun-path view.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct SunPathConfig {
    /// Tilt of the rotation axis against the orbital plane (degrees, 0..=90).
    pub obliquity_deg: f64,
    /// Observer latitude (degrees, -90..=90).
    pub latitude_deg: f64,
    /// Day of year, `[1, 366)`.
    pub day_of_year: f64,
}

impl Default for SunPathConfig {
    fn default() -> Self {
        Self {
            obliquity_deg: EARTH_OBLIQUITY_DEG,
            latitude_deg: 40.0,
            day_of_year: JUNE_SOLSTICE_DAY,
        }
    }
}

impl SunPathConfig {
    pub fn validate(&self) -> Result<(), GeometryError> {
        check_inclusive("obliquity", self.obliquity_deg, OBLIQUITY_RANGE)?;
        check_inclusive("latitude", self.latitude_deg, LATITUDE_RANGE)?;
        check_half_open("day of year", self.day_of_year, DAY_OF_YEAR_RANGE)
    }

    pub fn time_of_year(&self) -> f64 {
        time_of_year(self.day_of_year)
    }
}

fn check_inclusive(
    name: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), GeometryError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameter { name, value, min, max })
    }
}

fn check_half_open(
    name: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), GeometryError> {
    if value.is_finite() && (min..max).contains(&value) {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameter { name, value, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_time_of_year_landmarks() {
        assert_eq!(time_of_year(JUNE_SOLSTICE_DAY), 0.0);
        assert_abs_diff_eq!(time_of_year(SEPTEMBER_EQUINOX_DAY), FRAC_PI_2, epsilon = 1e-15);
        assert_abs_diff_eq!(time_of_year(DECEMBER_SOLSTICE_DAY), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(time_of_year(MARCH_EQUINOX_DAY), -FRAC_PI_2, epsilon = 1e-15);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ObserverConfig::default().validate().is_ok());
        assert!(SunPathConfig::default().validate().is_ok());
    }

    #[test]
    fn test_every_integer_day_is_valid() {
        for day in 1..=365 {
            let config = ObserverConfig {
                day_of_year: day as f64,
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "day {day} rejected");
        }
    }

    #[test]
    fn test_out_of_range_fields_rejected() {
        let with = |edit: fn(&mut ObserverConfig)| {
            let mut config = ObserverConfig::default();
            edit(&mut config);
            config
        };
        let bad = [
            with(|c| c.obliquity_deg = -1.0),
            with(|c| c.obliquity_deg = 90.5),
            with(|c| c.latitude_deg = 91.0),
            with(|c| c.latitude_deg = f64::NAN),
            with(|c| c.day_of_year = 0.0),
            with(|c| c.day_of_year = 366.0),
            with(|c| c.hour_of_day = 24.0),
            with(|c| c.hour_of_day = -0.5),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(GeometryError::InvalidParameter { .. })),
                "{config:?} accepted"
            );
        }
    }

    #[test]
    fn test_invalid_parameter_names_field() {
        let config = SunPathConfig {
            latitude_deg: -120.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("latitude"), "{err}");
    }

    #[test]
    fn test_cycles_return_to_start() {
        let mut view = ViewFrame::default();
        let mut day = DayType::default();
        for _ in 0..3 {
            view = view.next();
            day = day.next();
        }
        assert_eq!(view, ViewFrame::default());
        assert_eq!(day, DayType::default());
    }
}
