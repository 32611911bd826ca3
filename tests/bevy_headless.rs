//! Headless Bevy integration tests.
//!
//! These tests verify the scene plugins re-evaluate on config changes without a GPU.

mod common;

use bevy::prelude::*;
use skysphere::geometry::GeometryError;
use skysphere::input::SkyInputPlugin;
use skysphere::scene::{InitialConfig, SkyScene, SunPathScene};
use skysphere::types::{DayType, ObserverConfig, SunPathConfig, ViewFrame};

use common::{observer, sky_app, sun_path, sun_path_app};

#[test]
fn test_first_frame_evaluates_inserted_config() {
    let mut app = sky_app(observer(45.0, 172.0, 12.0));
    app.update();

    let scene = app.world().resource::<SkyScene>();
    assert_eq!(scene.evaluations, 1);
    let sky = scene.geometry.as_ref().expect("geometry after first frame");
    assert!((sky.sun.altitude_deg - 68.44).abs() < 0.05);
    assert!(scene.last_error.is_none());
}

#[test]
fn test_unchanged_config_is_not_re_evaluated() {
    let mut app = sky_app(ObserverConfig::default());
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(app.world().resource::<SkyScene>().evaluations, 1);
}

#[test]
fn test_each_change_re_evaluates_once() {
    let mut app = sky_app(ObserverConfig::default());
    app.update();

    app.world_mut().resource_mut::<ObserverConfig>().hour_of_day = 18.0;
    app.update();
    app.update();
    assert_eq!(app.world().resource::<SkyScene>().evaluations, 2);

    // Writing an equal value through set_if_neq does not trigger
    let same = *app.world().resource::<ObserverConfig>();
    app.world_mut().resource_mut::<ObserverConfig>().set_if_neq(same);
    app.update();
    assert_eq!(app.world().resource::<SkyScene>().evaluations, 2);
}

#[test]
fn test_invalid_config_keeps_last_geometry() {
    let mut app = sky_app(ObserverConfig::default());
    app.update();
    let before = app.world().resource::<SkyScene>().geometry.clone();

    app.world_mut().resource_mut::<ObserverConfig>().day_of_year = 0.0;
    app.update();

    let scene = app.world().resource::<SkyScene>();
    assert_eq!(scene.geometry, before);
    assert!(matches!(
        scene.last_error,
        Some(GeometryError::InvalidParameter { name: "day of year", .. })
    ));

    // A valid edit clears the error
    app.world_mut().resource_mut::<ObserverConfig>().day_of_year = 100.0;
    app.update();
    assert!(app.world().resource::<SkyScene>().last_error.is_none());
}

#[test]
fn test_initial_config_captured_at_startup() {
    let start = observer(-20.0, 300.0, 9.0);
    let mut app = sky_app(start);
    app.update();

    app.world_mut().resource_mut::<ObserverConfig>().latitude_deg = 60.0;
    app.update();

    let initial = app.world().resource::<InitialConfig<ObserverConfig>>();
    assert_eq!(initial.0, start);
}

#[test]
fn test_view_frame_defaults_to_horizon() {
    let mut app = sky_app(ObserverConfig::default());
    app.update();
    assert_eq!(*app.world().resource::<ViewFrame>(), ViewFrame::Horizon);
}

#[test]
fn test_day_type_change_moves_sun() {
    let mut app = sky_app(observer(40.0, 50.0, 12.0));
    app.update();
    let apparent = app.world().resource::<SkyScene>().geometry.clone().unwrap();

    app.world_mut().resource_mut::<ObserverConfig>().day_type = DayType::Mean;
    app.update();
    let mean = app.world().resource::<SkyScene>().geometry.clone().unwrap();

    // Away from the equinoxes and solstices the mean sun is off the meridian
    assert!((apparent.sun.azimuth_deg - mean.sun.azimuth_deg).abs() > 0.5);
}

#[test]
fn test_sun_path_scene_builds_references() {
    let mut app = sun_path_app(sun_path(52.0, 172.0));
    app.update();

    let scene = app.world().resource::<SunPathScene>();
    assert_eq!(scene.evaluations, 1);
    assert!(scene.path.is_some());
    assert_eq!(scene.seasons.len(), 3);
    assert_eq!(scene.annual.len(), 6);
}

#[test]
fn test_sun_path_day_change_keeps_references() {
    let mut app = sun_path_app(sun_path(52.0, 172.0));
    app.update();
    let seasons = app.world().resource::<SunPathScene>().seasons.clone();

    app.world_mut().resource_mut::<SunPathConfig>().day_of_year = 30.0;
    app.update();

    let scene = app.world().resource::<SunPathScene>();
    assert_eq!(scene.evaluations, 2);
    assert_eq!(scene.seasons, seasons);
    let day = scene.path.as_ref().unwrap();
    assert!(day.day_length_hours() < 10.0);
}

#[test]
fn test_sun_path_latitude_change_rebuilds_references() {
    let mut app = sun_path_app(sun_path(52.0, 172.0));
    app.update();
    let seasons = app.world().resource::<SunPathScene>().seasons.clone();

    app.world_mut().resource_mut::<SunPathConfig>().latitude_deg = -10.0;
    app.update();

    assert_ne!(app.world().resource::<SunPathScene>().seasons, seasons);
}

#[test]
fn test_sun_path_rejects_out_of_range_obliquity() {
    let mut app = sun_path_app(sun_path(10.0, 100.0));
    app.update();

    app.world_mut().resource_mut::<SunPathConfig>().obliquity_deg = 95.0;
    app.update();

    let scene = app.world().resource::<SunPathScene>();
    assert!(matches!(
        scene.last_error,
        Some(GeometryError::InvalidParameter { name: "obliquity", .. })
    ));
    assert!(scene.path.is_some());
}

#[test]
fn test_key_edit_evaluated_in_same_frame() {
    let mut app = sky_app(observer(40.0, 50.0, 12.0));
    app.init_resource::<ButtonInput<KeyCode>>()
        .add_plugins(SkyInputPlugin);
    app.update();
    assert_eq!(app.world().resource::<SkyScene>().evaluations, 1);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Digit2);
    app.update();

    assert_eq!(
        app.world().resource::<ObserverConfig>().day_type,
        DayType::Mean
    );
    assert_eq!(app.world().resource::<SkyScene>().evaluations, 2);
}

#[test]
fn test_post_update_edit_evaluated_next_frame() {
    // Stands in for the egui panel, which writes during PostUpdate
    fn panel_edit(mut config: ResMut<ObserverConfig>, mut done: Local<bool>) {
        if !*done {
            config.latitude_deg = 10.0;
            *done = true;
        }
    }

    let mut app = sky_app(observer(40.0, 50.0, 12.0));
    app.add_systems(PostUpdate, panel_edit);
    app.update();
    assert_eq!(app.world().resource::<SkyScene>().evaluations, 1);

    app.update();
    assert_eq!(app.world().resource::<SkyScene>().evaluations, 2);
    app.update();
    assert_eq!(app.world().resource::<SkyScene>().evaluations, 2);
}
