//! Cached evaluation results and the systems that refresh them.
//!
//! A config resource is the single source of truth for each view. Whenever it
//! changes, the matching scene resource is re-evaluated once; drawing systems
//! only read the cached scene.

use bevy::prelude::*;

use crate::geometry::{
    AnnualSeries, DailySunPath, GeometryError, SeasonPath, SkyGeometry, annual_series,
    evaluate_sky, evaluate_sun_path, reference_latitudes, solstice_paths,
    sun_path::ANNUAL_SAMPLES,
};
use crate::types::{ObserverConfig, SunPathConfig, ViewFrame};

/// Systems that re-evaluate a scene from its config.
///
/// Config writers in `Update` run before this set and gizmo drawing runs
/// after it, so a keyboard edit is evaluated and drawn in the same frame.
/// Panel edits happen in the egui pass during `PostUpdate` and are evaluated
/// at the next frame's `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneRefresh;

/// Config captured at startup, restored by the reset controls.
#[derive(Resource, Clone, Debug)]
pub struct InitialConfig<C: Clone + Send + Sync + 'static>(pub C);

/// Last successfully evaluated celestial sphere.
#[derive(Resource, Default)]
pub struct SkyScene {
    pub geometry: Option<SkyGeometry>,
    /// Error from the most recent evaluation, if it was rejected.
    pub last_error: Option<GeometryError>,
    /// Number of evaluations performed.
    pub evaluations: u32,
}

/// Last successfully evaluated sun path, with the season references.
#[derive(Resource, Default)]
pub struct SunPathScene {
    pub path: Option<DailySunPath>,
    pub seasons: Vec<SeasonPath>,
    pub annual: Vec<AnnualSeries>,
    pub last_error: Option<GeometryError>,
    pub evaluations: u32,
}

/// Plugin evaluating the celestial sphere whenever [`ObserverConfig`] changes.
pub struct SkyScenePlugin;

impl Plugin for SkyScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObserverConfig>()
            .init_resource::<ViewFrame>()
            .init_resource::<SkyScene>()
            .add_systems(Startup, capture_initial::<ObserverConfig>)
            .add_systems(
                Update,
                refresh_sky_scene
                    .run_if(resource_changed::<ObserverConfig>)
                    .in_set(SceneRefresh),
            );
    }
}

/// Plugin evaluating the sun path whenever [`SunPathConfig`] changes.
pub struct SunPathScenePlugin;

impl Plugin for SunPathScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SunPathConfig>()
            .init_resource::<SunPathScene>()
            .add_systems(Startup, capture_initial::<SunPathConfig>)
            .add_systems(
                Update,
                refresh_sun_path_scene
                    .run_if(resource_changed::<SunPathConfig>)
                    .in_set(SceneRefresh),
            );
    }
}

fn capture_initial<C: Resource + Clone>(mut commands: Commands, config: Res<C>) {
    commands.insert_resource(InitialConfig(config.clone()));
}

/// Re-evaluate the sky. A rejected config keeps the previous geometry on screen.
pub fn refresh_sky_scene(config: Res<ObserverConfig>, mut scene: ResMut<SkyScene>) {
    scene.evaluations += 1;
    match evaluate_sky(&config) {
        Ok(geometry) => {
            debug!(
                "Sky evaluated: sun alt {:.2}°, az {:.2}°",
                geometry.sun.altitude_deg, geometry.sun.azimuth_deg
            );
            scene.geometry = Some(geometry);
            scene.last_error = None;
        }
        Err(err) => {
            warn!("Rejected observer config: {err}");
            scene.last_error = Some(err);
        }
    }
}

/// Re-evaluate the sun path; season references and annual series follow the
/// obliquity and latitude only.
pub fn refresh_sun_path_scene(
    config: Res<SunPathConfig>,
    mut scene: ResMut<SunPathScene>,
    mut last_shape: Local<Option<(f64, f64)>>,
) {
    scene.evaluations += 1;
    match evaluate_sun_path(&config) {
        Ok(path) => {
            debug!(
                "Sun path evaluated: daylight {:.2} h, sunrise az {:.2}°",
                path.day_length_hours(),
                path.sunrise.azimuth_deg
            );
            scene.path = Some(path);
            scene.last_error = None;
        }
        Err(err) => {
            warn!("Rejected sun path config: {err}");
            scene.last_error = Some(err);
            return;
        }
    }

    let shape = (config.obliquity_deg, config.latitude_deg);
    if *last_shape != Some(shape) {
        scene.seasons = solstice_paths(config.obliquity_deg, config.latitude_deg);
        scene.annual = reference_latitudes()
            .into_iter()
            .map(|lat| annual_series(config.obliquity_deg, lat, ANNUAL_SAMPLES))
            .collect();
        *last_shape = Some(shape);
    }
}
