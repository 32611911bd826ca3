//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

/// Run condition: icon fonts are ready.
pub fn fonts_ready(initialized: Res<FontsInitialized>) -> bool {
    initialized.0
}

/// Reset/reload icon (circular arrow)
pub const RESET: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
/// View frame toggle
pub const VIEW: &str = egui_phosphor::regular::EYE;
/// Day type toggle
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
/// Sun
pub const SUN: &str = egui_phosphor::regular::SUN;
/// Night
pub const MOON: &str = egui_phosphor::regular::MOON;
/// Warning for rejected parameters
pub const WARNING: &str = egui_phosphor::regular::WARNING;
