//! Text labels using egui for text rendering.
//!
//! Renders grid, compass, and zenith labels at their projected positions.

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::to_render;
use crate::camera::MainCamera;
use crate::geometry::Cardinal;
use crate::scene::{SkyScene, SunPathScene};
use crate::types::ViewFrame;

const FONT_SIZE: f32 = 14.0;

/// Draw grid and compass labels for the celestial sphere.
pub fn draw_sky_labels(
    mut contexts: EguiContexts,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    scene: Res<SkyScene>,
    view: Res<ViewFrame>,
) {
    let Some(sky) = scene.geometry.as_ref() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };

    let rotation = sky.view_rotation(*view);
    let labels = sky
        .grid_labels
        .iter()
        .map(|(text, p)| (*text, rotation * *p))
        .chain(
            sky.cardinal_points
                .iter()
                .map(|(c, p)| (c.label(), rotation * *p)),
        )
        .chain(std::iter::once(("zenith", rotation * sky.zenith * 1.08)));

    paint_labels(ctx, camera, camera_transform, "sky_labels", labels);
}

/// Draw compass and zenith labels for the sun-path view.
pub fn draw_sun_path_labels(
    mut contexts: EguiContexts,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    scene: Res<SunPathScene>,
) {
    if scene.path.is_none() {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };

    let labels = Cardinal::ALL
        .iter()
        .map(|c| (c.label(), c.horizon_vector() * 1.08))
        .chain(std::iter::once(("Z", DVec3::Z * 1.08)));

    paint_labels(ctx, camera, camera_transform, "sun_path_labels", labels);
}

fn paint_labels<'a>(
    ctx: &egui::Context,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    layer: &str,
    labels: impl Iterator<Item = (&'a str, DVec3)>,
) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new(layer),
    ));
    let font = egui::FontId::proportional(FONT_SIZE);

    for (text, position) in labels {
        // Project world position to screen
        let Ok(screen) = camera.world_to_viewport(camera_transform, to_render(position)) else {
            continue;
        };
        let at = egui::pos2(screen.x, screen.y);

        // Shadow
        painter.text(
            at + egui::vec2(1.0, 1.0),
            egui::Align2::CENTER_CENTER,
            text,
            font.clone(),
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
        );

        // Main text
        painter.text(
            at,
            egui::Align2::CENTER_CENTER,
            text,
            font.clone(),
            egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230),
        );
    }
}
