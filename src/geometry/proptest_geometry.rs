//! Property-based tests for the sky and sun-path evaluators using proptest.
//!
//! These tests check range and consistency invariants across the whole
//! parameter domain, poles included.

use proptest::prelude::*;

use super::{DaylightRegime, evaluate_sky, evaluate_sun_path, solar_declination};
use crate::types::{
    DayType, EARTH_OBLIQUITY_DEG, JUNE_SOLSTICE_DAY, ObserverConfig, SunPathConfig, time_of_year,
};

fn day_type() -> impl Strategy<Value = DayType> {
    prop_oneof![
        Just(DayType::Apparent),
        Just(DayType::Mean),
        Just(DayType::Sidereal),
    ]
}

fn observer_config() -> impl Strategy<Value = ObserverConfig> {
    (
        0.0f64..=90.0,
        -90.0f64..=90.0,
        1u32..=365,
        0.0f64..24.0,
        day_type(),
    )
        .prop_map(|(obliquity_deg, latitude_deg, day, hour_of_day, day_type)| ObserverConfig {
            obliquity_deg,
            latitude_deg,
            day_of_year: day as f64,
            hour_of_day,
            day_type,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Altitude stays in [-90, 90] and azimuth in [0, 360) everywhere.
    #[test]
    fn prop_sky_angles_in_range(config in observer_config()) {
        let sky = evaluate_sky(&config).unwrap();
        let sun = &sky.sun;
        prop_assert!((-90.0..=90.0).contains(&sun.altitude_deg), "altitude {}", sun.altitude_deg);
        prop_assert!((0.0..360.0).contains(&sun.azimuth_deg), "azimuth {}", sun.azimuth_deg);
        prop_assert!((-180.0..180.0).contains(&sky.sun.hour_angle_deg));
    }

    /// Same configuration, same geometry.
    #[test]
    fn prop_sky_is_deterministic(config in observer_config()) {
        prop_assert_eq!(evaluate_sky(&config).unwrap(), evaluate_sky(&config).unwrap());
    }

    /// Every sample of the daily path stays in range, and the sunrise azimuth too.
    #[test]
    fn prop_sun_path_angles_in_range(
        latitude_deg in -90.0f64..=90.0,
        day in 1u32..=365,
    ) {
        let config = SunPathConfig {
            obliquity_deg: EARTH_OBLIQUITY_DEG,
            latitude_deg,
            day_of_year: day as f64,
        };
        let path = evaluate_sun_path(&config).unwrap();
        for s in &path.samples {
            prop_assert!((-90.0..=90.0).contains(&s.altitude_deg));
            prop_assert!((0.0..360.0).contains(&s.azimuth_deg));
        }
        prop_assert!((0.0..360.0).contains(&path.sunrise.azimuth_deg));
        prop_assert!((0.0..=1.0).contains(&path.insolation.daylight_fraction));
        prop_assert!(path.insolation.mean_cos_zenith >= 0.0);
        prop_assert!(path.insolation.mean_cos_zenith <= 1.0);
    }

    /// Regime agrees with the sampled altitudes.
    #[test]
    fn prop_regime_matches_samples(
        latitude_deg in -89.0f64..=89.0,
        day in 1u32..=365,
    ) {
        let config = SunPathConfig {
            obliquity_deg: EARTH_OBLIQUITY_DEG,
            latitude_deg,
            day_of_year: day as f64,
        };
        let path = evaluate_sun_path(&config).unwrap();
        match path.sunrise.regime {
            DaylightRegime::PolarDay => {
                prop_assert!(path.samples.iter().all(|s| s.altitude_deg >= -1e-9))
            }
            DaylightRegime::PolarNight => {
                prop_assert!(path.samples.iter().all(|s| s.altitude_deg <= 1e-9))
            }
            DaylightRegime::Normal => {}
        }
    }

    /// At the pole the sun's altitude equals its declination at every hour.
    #[test]
    fn prop_pole_altitude_constant(day in 1u32..=365, hour in 0.0f64..24.0) {
        let config = ObserverConfig {
            latitude_deg: 90.0,
            day_of_year: day as f64,
            hour_of_day: hour,
            ..Default::default()
        };
        let sky = evaluate_sky(&config).unwrap();
        prop_assert!((sky.sun.altitude_deg - sky.sun.declination_deg).abs() < 1e-9);
    }

    /// At the June solstice, daylight grows with latitude over the northern
    /// hemisphere and saturates at polar day.
    #[test]
    fn prop_solstice_daylight_monotone(a in 0.0f64..=90.0, b in 0.0f64..=90.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let declination = solar_declination(
            EARTH_OBLIQUITY_DEG.to_radians(),
            time_of_year(JUNE_SOLSTICE_DAY),
        );
        let at = |lat: f64| {
            super::daily_insolation(lat.to_radians(), declination).daylight_fraction
        };
        prop_assert!(at(low) <= at(high) + 1e-12, "daylight at {} > at {}", low, high);
    }
}
