//! UI module providing egui-based control panels.
//!
//! Each view gets a bottom panel of sliders. Sliders edit a copy of the
//! config; the resource is replaced only when the copy differs, so change
//! detection fires exactly once per edit.

pub mod icons;
mod sky_panel;
mod sun_path_panel;

use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::{EguiPrimaryContextPass, egui};

pub use sky_panel::sky_panel_system;
pub use sun_path_panel::sun_path_panel_system;

/// Plugin adding the celestial-sphere controls.
pub struct SkyUiPlugin;

impl Plugin for SkyUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                sky_panel_system
                    .after(icons::setup_fonts)
                    .run_if(icons::fonts_ready),
            );
    }
}

/// Plugin adding the sun-path controls.
pub struct SunPathUiPlugin;

impl Plugin for SunPathUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                sun_path_panel_system
                    .after(icons::setup_fonts)
                    .run_if(icons::fonts_ready),
            );
    }
}

/// Colors used by the panels.
pub mod colors {
    use bevy_egui::egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(20, 20, 30, 220);
    pub const TEXT_DIM: Color32 = Color32::from_rgb(160, 160, 170);
    pub const ERROR: Color32 = Color32::from_rgb(240, 110, 90);
    pub const SUN: Color32 = Color32::from_rgb(255, 215, 80);
}

/// Bottom panel frame shared by both views.
fn panel_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::PANEL_BG)
        .inner_margin(egui::Margin::symmetric(16, 8))
}

/// Labeled degree slider. Returns true when the value changed.
fn degree_slider(ui: &mut egui::Ui, label: &str, value: &mut f64, min: f64, max: f64) -> bool {
    ui.add(
        egui::Slider::new(value, min..=max)
            .text(label)
            .suffix("°")
            .fixed_decimals(1),
    )
    .changed()
}

/// Opaque egui color of a render palette color.
fn egui_color(color: Color) -> egui::Color32 {
    let [r, g, b, _] = color.to_srgba().to_u8_array();
    egui::Color32::from_rgb(r, g, b)
}

/// Format fractional hours as HH:MM.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    format!("{:02}:{:02}", total_minutes.div_euclid(60), total_minutes.rem_euclid(60))
}
