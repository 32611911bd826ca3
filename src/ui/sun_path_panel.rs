//! Control panel and annual charts for the sun-path view.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{colors, degree_slider, egui_color, format_hours, icons, panel_frame};
use crate::geometry::{AnnualSeries, DailySunPath, DaylightRegime};
use crate::render::palette;
use crate::scene::{InitialConfig, SunPathScene};
use crate::types::{
    DAY_OF_YEAR_RANGE, DAYS_PER_YEAR, JUNE_SOLSTICE_DAY, LATITUDE_RANGE, OBLIQUITY_RANGE,
    SunPathConfig,
};

const CHART_SIZE: egui::Vec2 = egui::vec2(260.0, 140.0);

/// Line colors for the reference latitudes, low to high.
const SERIES_COLORS: [egui::Color32; 6] = [
    egui::Color32::from_rgb(230, 90, 80),
    egui::Color32::from_rgb(235, 160, 70),
    egui::Color32::from_rgb(220, 210, 90),
    egui::Color32::from_rgb(110, 200, 110),
    egui::Color32::from_rgb(90, 170, 230),
    egui::Color32::from_rgb(170, 120, 230),
];

/// System that renders the controls, the readout, and the annual charts.
pub fn sun_path_panel_system(
    mut contexts: EguiContexts,
    mut config: ResMut<SunPathConfig>,
    scene: Res<SunPathScene>,
    initial: Option<Res<InitialConfig<SunPathConfig>>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut next = *config;

    egui::SidePanel::right("annual_charts")
        .frame(panel_frame())
        .resizable(false)
        .show(ctx, |ui| {
            let marker = year_fraction(next.day_of_year);
            ui.label(egui::RichText::new("sunlit fraction of solar day").color(colors::TEXT_DIM));
            annual_chart(ui, &scene.annual, marker, (0.0, 1.0), |p| p.daylight_fraction);
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("sunrise azimuth (° from north)").color(colors::TEXT_DIM),
            );
            annual_chart(ui, &scene.annual, marker, (0.0, 180.0), |p| p.sunrise_azimuth_deg);
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for (series, color) in scene.annual.iter().zip(SERIES_COLORS) {
                    ui.colored_label(color, format!("{:.0}°", series.latitude_deg));
                }
            });
            ui.label(
                egui::RichText::new("x: fraction of year from June solstice")
                    .small()
                    .color(colors::TEXT_DIM),
            );
        });

    egui::TopBottomPanel::bottom("sun_path_controls")
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
                    ui.add(
                        egui::Slider::new(
                            &mut next.day_of_year,
                            DAY_OF_YEAR_RANGE.0..=DAY_OF_YEAR_RANGE.1 - 1.0,
                        )
                        .text("day of year")
                        .fixed_decimals(0),
                    );
                });

                ui.separator();

                if let Some(err) = &scene.last_error {
                    ui.colored_label(colors::ERROR, format!("{} {err}", icons::WARNING));
                }
                if let Some(path) = scene.path.as_ref() {
                    render_readout(ui, path);
                }

                ui.separator();

                ui.vertical(|ui| {
                    for (season, color) in scene.seasons.iter().zip(palette::SEASONS) {
                        ui.colored_label(egui_color(color), season.label);
                    }
                    ui.colored_label(egui_color(palette::SELECTED_DAY), "selected day");
                });

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
        debug!("Sun path config changed: {:?}", next);
    }
}

fn render_readout(ui: &mut egui::Ui, path: &DailySunPath) {
    let regime = match path.sunrise.regime {
        DaylightRegime::Normal => format!(
            "sunrise {}",
            format_hours(12.0 + path.sunrise.hour_angle_deg / 15.0)
        ),
        DaylightRegime::PolarDay => format!("{} polar day", icons::SUN),
        DaylightRegime::PolarNight => format!("{} polar night", icons::MOON),
    };
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(regime).color(colors::SUN).monospace());
        ui.label(
            egui::RichText::new(format!(
                "daylight {}  ({:.1}% of day)",
                format_hours(path.day_length_hours()),
                path.insolation.daylight_fraction * 100.0
            ))
            .monospace(),
        );
        ui.label(
            egui::RichText::new(format!(
                "mean cos(zenith) {:.3}  sunrise az {:.1}°",
                path.insolation.mean_cos_zenith, path.sunrise.azimuth_deg
            ))
            .monospace(),
        );
        ui.label(
            egui::RichText::new(format!(
                "dec {:+.1}°  max alt {:+.1}°",
                path.declination_deg,
                path.max_altitude_deg()
            ))
            .color(colors::TEXT_DIM)
            .monospace(),
        );
    });
}

/// Position of a day of year on the annual chart axis, `[-0.5, 0.5)`.
pub fn year_fraction(day_of_year: f64) -> f64 {
    ((day_of_year - JUNE_SOLSTICE_DAY) / DAYS_PER_YEAR + 0.5).rem_euclid(1.0) - 0.5
}

/// Paint one annual chart with a vertical marker at the selected day.
fn annual_chart(
    ui: &mut egui::Ui,
    series: &[AnnualSeries],
    marker: f64,
    (y_min, y_max): (f64, f64),
    value: impl Fn(&crate::geometry::AnnualPoint) -> f64,
) {
    let (rect, _) = ui.allocate_exact_size(CHART_SIZE, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, colors::TEXT_DIM),
        egui::StrokeKind::Inside,
    );

    let to_screen = |x: f64, y: f64| {
        let tx = (x + 0.5) as f32;
        let ty = ((y - y_min) / (y_max - y_min)) as f32;
        egui::pos2(
            rect.left() + tx * rect.width(),
            rect.bottom() - ty.clamp(0.0, 1.0) * rect.height(),
        )
    };

    for (s, color) in series.iter().zip(SERIES_COLORS) {
        let points = s
            .points
            .iter()
            .map(|p| to_screen(p.year_fraction, value(p)))
            .collect();
        painter.add(egui::Shape::line(points, egui::Stroke::new(1.5, color)));
    }

    let top = to_screen(marker, y_max);
    let bottom = to_screen(marker, y_min);
    painter.line_segment([top, bottom], egui::Stroke::new(1.0, colors::SUN));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_year_fraction_wraps_around_solstice() {
        assert_abs_diff_eq!(year_fraction(JUNE_SOLSTICE_DAY), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(year_fraction(JUNE_SOLSTICE_DAY + 91.25), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(
            year_fraction(1.0),
            (1.0 - JUNE_SOLSTICE_DAY) / DAYS_PER_YEAR,
            epsilon = 1e-12
        );
        assert!(year_fraction(365.0) < 0.5);
    }
}
