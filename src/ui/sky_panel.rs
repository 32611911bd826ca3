//! Control panel for the celestial-sphere view.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{colors, degree_slider, egui_color, format_hours, icons, panel_frame};
use crate::render::palette;
use crate::scene::{InitialConfig, SkyScene};
use crate::types::{
    DAY_OF_YEAR_RANGE, HOUR_SLIDER_MAX, LATITUDE_RANGE, OBLIQUITY_RANGE, ObserverConfig, ViewFrame,
};

/// System that renders the bottom control panel.
pub fn sky_panel_system(
    mut contexts: EguiContexts,
    mut config: ResMut<ObserverConfig>,
    mut view: ResMut<ViewFrame>,
    scene: Res<SkyScene>,
    initial: Option<Res<InitialConfig<ObserverConfig>>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut next = *config;
    let mut next_view = *view;

    egui::TopBottomPanel::bottom("sky_controls")
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    degree_slider(
                        ui,
                        "obliquity",
                        &mut next.obliquity_deg,
                        OBLIQUITY_RANGE.0,
                        OBLIQUITY_RANGE.1,
                    );
                    degree_slider(
                        ui,
                        "latitude",
                        &mut next.latitude_deg,
                        LATITUDE_RANGE.0,
                        LATITUDE_RANGE.1,
                    );
                });

                ui.separator();

                ui.vertical(|ui| {
                    ui.add(
                        egui::Slider::new(
                            &mut next.day_of_year,
                            DAY_OF_YEAR_RANGE.0..=DAY_OF_YEAR_RANGE.1 - 1.0,
                        )
                        .text("day of year")
                        .fixed_decimals(0),
                    );
                    ui.add(
                        egui::Slider::new(&mut next.hour_of_day, 0.0..=HOUR_SLIDER_MAX)
                            .text("time of day")
                            .custom_formatter(|h, _| format_hours(h)),
                    );
                });

                ui.separator();

                ui.vertical(|ui| {
                    if ui
                        .button(format!("{} view: {}", icons::VIEW, next_view.label()))
                        .on_hover_text("Cycle view frame (1)")
                        .clicked()
                    {
                        next_view = next_view.next();
                    }
                    if ui
                        .button(format!("{} day: {}", icons::CLOCK, next.day_type.label()))
                        .on_hover_text("Cycle day type (2)")
                        .clicked()
                    {
                        next.day_type = next.day_type.next();
                    }
                });

                ui.separator();

                render_readout(ui, &scene);

                ui.separator();

                render_legend(ui);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(egui::RichText::new(icons::RESET).size(20.0))
                        .on_hover_text("Reset (R)")
                        .clicked()
                    {
                        next = initial.as_ref().map(|i| i.0).unwrap_or_default();
                    }
                });
            });
        });

    if config.set_if_neq(next) {
        debug!("Observer config changed: {:?}", next);
    }
    if view.set_if_neq(next_view) {
        info!("View frame: {}", next_view.label());
    }
}

/// Colored names of the drawn curves, two per row.
fn render_legend(ui: &mut egui::Ui) {
    egui::Grid::new("sky_legend").show(ui, |ui| {
        for row in palette::SKY_LEGEND.chunks(2) {
            for &(label, color) in row {
                ui.colored_label(egui_color(color), label);
            }
            ui.end_row();
        }
    });
}

/// Sun coordinates, or the rejection reason.
fn render_readout(ui: &mut egui::Ui, scene: &SkyScene) {
    ui.vertical(|ui| {
        if let Some(err) = &scene.last_error {
            ui.colored_label(colors::ERROR, format!("{} {err}", icons::WARNING));
        }
        let Some(sky) = scene.geometry.as_ref() else {
            return;
        };
        let sun = &sky.sun;
        let icon = if sky.is_sun_up() { icons::SUN } else { icons::MOON };
        ui.label(
            egui::RichText::new(format!(
                "{icon} alt {:+.1}°  az {:.1}°",
                sun.altitude_deg, sun.azimuth_deg
            ))
            .color(colors::SUN)
            .monospace(),
        );
        ui.label(
            egui::RichText::new(format!(
                "dec {:+.1}°  RA {:.1}h  HA {:+.1}h",
                sun.declination_deg,
                sun.right_ascension_deg / 15.0,
                sun.hour_angle_deg / 15.0
            ))
            .color(colors::TEXT_DIM)
            .monospace(),
        );
    });
}
