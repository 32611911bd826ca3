//! Orbiting camera around the unit celestial sphere.
//!
//! The default view looks at the sphere from 10° above the reference plane,
//! from the -y side, with +x to the right. The same view is used by the static
//! export so figures match the window.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    math::DVec3,
    prelude::*,
};
use bevy_egui::EguiContexts;

use crate::render::to_render;

/// Default elevation of the eye above the reference plane (degrees).
pub const DEFAULT_ELEVATION_DEG: f64 = 10.0;

/// Default azimuth of the eye around the vertical axis (degrees, -90 = from -y).
pub const DEFAULT_AZIMUTH_DEG: f64 = -90.0;

/// Default distance from the sphere center, in sphere radii.
pub const DEFAULT_DISTANCE: f32 = 3.2;

/// Closest zoom.
pub const MIN_DISTANCE: f32 = 1.5;

/// Furthest zoom.
pub const MAX_DISTANCE: f32 = 10.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Degrees of rotation per pixel of mouse drag.
pub const ORBIT_SPEED: f64 = 0.3;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking the orbit around the sphere.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub distance: f32,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self {
            azimuth_deg: DEFAULT_AZIMUTH_DEG,
            elevation_deg: DEFAULT_ELEVATION_DEG,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl OrbitState {
    /// Unit vector from the sphere center toward the eye (geometry frame, z up).
    pub fn eye_direction(&self) -> DVec3 {
        view_direction(self.azimuth_deg, self.elevation_deg)
    }

    /// Camera transform in render space.
    pub fn transform(&self) -> Transform {
        let eye = to_render(self.eye_direction()) * self.distance;
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Unit vector toward an eye at `azimuth_deg`/`elevation_deg` (z up).
pub fn view_direction(azimuth_deg: f64, elevation_deg: f64) -> DVec3 {
    let (sin_az, cos_az) = azimuth_deg.to_radians().sin_cos();
    let (sin_el, cos_el) = elevation_deg.to_radians().sin_cos();
    DVec3::new(cos_az * cos_el, sin_az * cos_el, sin_el)
}

/// Orthographic projection of `p` onto the screen of an eye looking along
/// `-eye`. Returns `(right, up, depth)`; larger depth is closer to the eye.
pub fn project_orthographic(p: DVec3, eye: DVec3) -> (f64, f64, f64) {
    let right = DVec3::Z.cross(eye).try_normalize().unwrap_or(DVec3::X);
    let up = eye.cross(right);
    (p.dot(right), p.dot(up), p.dot(eye))
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitState>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_orbit, camera_zoom, apply_orbit).chain());
    }
}

fn setup_camera(mut commands: Commands, orbit: Res<OrbitState>) {
    commands.spawn((Camera3d::default(), orbit.transform(), MainCamera));
}

/// Whether egui currently owns the pointer (dragging a slider, hovering a panel).
fn egui_has_pointer(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area() || ctx.is_using_pointer())
        .unwrap_or(false)
}

/// Left mouse drag orbits the camera.
fn camera_orbit(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut contexts: EguiContexts,
    mut orbit: ResMut<OrbitState>,
) {
    if !mouse_buttons.pressed(MouseButton::Left) || mouse_motion.delta == Vec2::ZERO {
        return;
    }
    if egui_has_pointer(&mut contexts) {
        return;
    }

    let delta = mouse_motion.delta.as_dvec2() * ORBIT_SPEED;
    orbit.azimuth_deg = (orbit.azimuth_deg - delta.x).rem_euclid(360.0);
    orbit.elevation_deg = (orbit.elevation_deg + delta.y).clamp(-89.0, 89.0);
}

/// Mouse scroll zooms toward the sphere.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut contexts: EguiContexts,
    mut orbit: ResMut<OrbitState>,
) {
    if mouse_scroll.delta.y == 0.0 || egui_has_pointer(&mut contexts) {
        return;
    }

    // Logarithmic zoom: multiply distance by factor based on scroll direction
    let zoom_factor = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;
    orbit.distance = (orbit.distance * zoom_factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
}

fn apply_orbit(orbit: Res<OrbitState>, mut camera_query: Query<&mut Transform, With<MainCamera>>) {
    if !orbit.is_changed() {
        return;
    }
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = orbit.transform();
}
