//! Celestial sphere drawn with gizmos.

use bevy::math::{DMat3, DVec3};
use bevy::prelude::*;

use super::{palette, to_render};
use crate::scene::SkyScene;
use crate::types::ViewFrame;

/// Radius of the sun marker.
const SUN_RADIUS: f32 = 0.04;

/// Half-size of the zenith cross.
const ZENITH_MARK: f32 = 0.04;

/// Draw the cached sky scene in the selected view frame.
pub fn draw_sky(mut gizmos: Gizmos, scene: Res<SkyScene>, view: Res<ViewFrame>) {
    let Some(sky) = scene.geometry.as_ref() else {
        return;
    };
    let rotation = sky.view_rotation(*view);

    for line in &sky.grid {
        draw_curve(&mut gizmos, rotation, line, palette::GRID);
    }
    draw_curve(&mut gizmos, rotation, &sky.equator, palette::EQUATOR);
    draw_curve(&mut gizmos, rotation, &sky.ecliptic, palette::ECLIPTIC);
    draw_curve(&mut gizmos, rotation, &sky.sun_diurnal_circle, palette::SUN_PATH);
    draw_curve(&mut gizmos, rotation, &sky.horizon, palette::HORIZON);
    draw_curve(&mut gizmos, rotation, &sky.zenith_diurnal_circle, palette::ZENITH);

    let zenith = to_render(rotation * sky.zenith);
    gizmos.line(Vec3::ZERO, zenith, palette::HORIZON);
    draw_cross(&mut gizmos, zenith, palette::ZENITH);

    let sun = to_render(rotation * sky.sun.direction);
    gizmos.sphere(Isometry3d::from_translation(sun), SUN_RADIUS, palette::SUN);
}

fn draw_curve(gizmos: &mut Gizmos, rotation: DMat3, curve: &[DVec3], color: Color) {
    gizmos.linestrip(curve.iter().map(|&p| to_render(rotation * p)), color);
}

fn draw_cross(gizmos: &mut Gizmos, at: Vec3, color: Color) {
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        gizmos.line(at - axis * ZENITH_MARK, at + axis * ZENITH_MARK, color);
    }
}
