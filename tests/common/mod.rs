//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::prelude::*;
use skysphere::scene::{SkyScenePlugin, SunPathScenePlugin};
use skysphere::types::{DayType, EARTH_OBLIQUITY_DEG, ObserverConfig, SunPathConfig};

/// Headless app with the celestial-sphere scene, starting from `config`.
pub fn sky_app(config: ObserverConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .add_plugins(SkyScenePlugin);
    app
}

/// Headless app with the sun-path scene, starting from `config`.
pub fn sun_path_app(config: SunPathConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .add_plugins(SunPathScenePlugin);
    app
}

/// Earth-tilt observer at apparent solar time.
pub fn observer(latitude_deg: f64, day_of_year: f64, hour_of_day: f64) -> ObserverConfig {
    ObserverConfig {
        obliquity_deg: EARTH_OBLIQUITY_DEG,
        latitude_deg,
        day_of_year,
        hour_of_day,
        day_type: DayType::Apparent,
    }
}

/// Earth-tilt sun-path config.
pub fn sun_path(latitude_deg: f64, day_of_year: f64) -> SunPathConfig {
    SunPathConfig {
        obliquity_deg: EARTH_OBLIQUITY_DEG,
        latitude_deg,
        day_of_year,
    }
}

/// Unique scratch file in the system temp directory.
pub fn temp_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("skysphere-it-{}-{name}", std::process::id()))
}
