//! Rendering systems for both visualizations.
//!
//! Geometry is drawn with Bevy gizmos from the cached scene resources; text
//! labels are painted with egui at the projected positions.

mod labels;
mod sky;
mod sun_path;

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::scene::{SceneRefresh, SkyScenePlugin, SunPathScenePlugin};

pub use self::labels::{draw_sky_labels, draw_sun_path_labels};
pub use self::sky::draw_sky;
pub use self::sun_path::draw_sun_path;

/// Background clear color.
pub const BACKGROUND: Color = Color::srgb(0.03, 0.03, 0.06);

/// Map a geometry-frame vector (z up) into Bevy render space (y up).
///
/// Geometry x stays x, geometry z becomes render y, and geometry y points
/// into the screen so the frame stays right-handed.
pub fn to_render(v: DVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.z as f32, -v.y as f32)
}

/// Line colors shared by the window and the static export.
pub mod palette {
    use bevy::prelude::Color;

    pub const GRID: Color = Color::srgba(0.8, 0.8, 0.9, 0.12);
    pub const ECLIPTIC: Color = Color::srgba(0.95, 0.3, 0.25, 0.35);
    pub const SUN_PATH: Color = Color::srgb(0.95, 0.3, 0.25);
    pub const SUN: Color = Color::srgb(1.0, 0.85, 0.3);
    pub const HORIZON: Color = Color::srgba(0.35, 0.55, 1.0, 0.35);
    pub const ZENITH: Color = Color::srgb(0.35, 0.55, 1.0);
    pub const EQUATOR: Color = Color::srgba(0.8, 0.8, 0.9, 0.3);
    pub const JUNE: Color = Color::srgb(0.9, 0.3, 0.25);
    pub const EQUINOX: Color = Color::srgb(0.3, 0.8, 0.35);
    pub const DECEMBER: Color = Color::srgb(0.3, 0.5, 1.0);
    /// Season references in the order `solstice_paths` returns them.
    pub const SEASONS: [Color; 3] = [JUNE, EQUINOX, DECEMBER];
    pub const SELECTED_DAY: Color = Color::srgb(1.0, 0.85, 0.3);
    pub const SUNRISE: Color = Color::srgb(1.0, 0.6, 0.2);
    pub const LABEL: Color = Color::srgba(0.86, 0.86, 0.86, 0.9);

    /// Curve legend of the celestial-sphere view.
    pub const SKY_LEGEND: [(&str, Color); 6] = [
        ("RA/Dec grid", GRID),
        ("equator", EQUATOR),
        ("ecliptic", ECLIPTIC),
        ("sun path", SUN_PATH),
        ("horizon", HORIZON),
        ("zenith", ZENITH),
    ];
}

/// Gizmo and label rendering for the celestial-sphere view.
pub struct SkyRenderPlugin;

impl Plugin for SkyRenderPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<SkyScenePlugin>() {
            app.add_plugins(SkyScenePlugin);
        }
        app.add_systems(Update, draw_sky.after(SceneRefresh))
            .add_systems(EguiPrimaryContextPass, draw_sky_labels);
    }
}

/// Gizmo and label rendering for the sun-path view.
pub struct SunPathRenderPlugin;

impl Plugin for SunPathRenderPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<SunPathScenePlugin>() {
            app.add_plugins(SunPathScenePlugin);
        }
        app.add_systems(Update, draw_sun_path.after(SceneRefresh))
            .add_systems(EguiPrimaryContextPass, draw_sun_path_labels);
    }
}
