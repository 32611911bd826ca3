//! Sun paths over the local horizon drawn with gizmos.

use bevy::math::DVec3;
use bevy::prelude::*;

use super::{palette, to_render};
use crate::geometry::{CIRCLE_SEGMENTS, DaylightRegime, parallel};
use crate::scene::SunPathScene;

const SUN_RADIUS: f32 = 0.035;

/// Draw the horizon, the season references, and the selected day.
pub fn draw_sun_path(mut gizmos: Gizmos, scene: Res<SunPathScene>) {
    let horizon = parallel(std::f64::consts::FRAC_PI_2);
    gizmos.linestrip(horizon.into_iter().map(to_render), palette::HORIZON);
    gizmos.line(Vec3::ZERO, Vec3::Y, palette::HORIZON);
    // Meridian: north-zenith-south half circle
    gizmos.linestrip(
        (0..=CIRCLE_SEGMENTS / 2).map(|i| {
            let a = std::f64::consts::PI * i as f64 / (CIRCLE_SEGMENTS / 2) as f64;
            to_render(DVec3::new(0.0, a.cos(), a.sin()))
        }),
        palette::GRID,
    );

    for (season, color) in scene.seasons.iter().zip(palette::SEASONS) {
        gizmos.linestrip(season.points.iter().copied().map(to_render), color.with_alpha(0.6));
    }

    let Some(path) = scene.path.as_ref() else {
        return;
    };
    gizmos.linestrip(
        path.samples.iter().map(|s| to_render(s.direction)),
        palette::SELECTED_DAY,
    );

    if let Some(highest) = path
        .samples
        .iter()
        .max_by(|a, b| a.altitude_deg.total_cmp(&b.altitude_deg))
        .filter(|s| s.altitude_deg > 0.0)
    {
        gizmos.sphere(
            Isometry3d::from_translation(to_render(highest.direction)),
            SUN_RADIUS,
            palette::SUN,
        );
    }

    if path.sunrise.regime == DaylightRegime::Normal {
        let (sin_a, cos_a) = path.sunrise.azimuth_deg.to_radians().sin_cos();
        let at = to_render(DVec3::new(sin_a, cos_a, 0.0));
        gizmos.line(at * 0.9, at * 1.1, palette::SUNRISE);
    }
}
