//! Static figures written with plotters.
//!
//! The sphere figures reuse the window's default camera: every point is
//! projected orthographically onto the screen of an eye at 10° elevation.
//! Curve segments on the far side of the sphere are drawn fainter.
//!
//! Text is laid out and rasterized with the proportional font egui ships,
//! registered with plotters once per process.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use bevy::color::Color;
use bevy::log::{debug, info};
use bevy::math::DVec3;
use bevy_egui::egui;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontStyle, register_font};

use crate::camera::{
    DEFAULT_AZIMUTH_DEG, DEFAULT_ELEVATION_DEG, project_orthographic, view_direction,
};
use crate::geometry::{
    AnnualPoint, AnnualSeries, Cardinal, DailySunPath, DaylightRegime, GeometryError,
    SkyGeometry, annual_series, evaluate_sun_path, parallel, reference_latitudes,
    solstice_paths, sun_path::ANNUAL_SAMPLES, transform,
};
use crate::render::{BACKGROUND, palette};
use crate::types::{SunPathConfig, ViewFrame};

type PlotResult = std::result::Result<(), Box<dyn std::error::Error>>;

type SphereChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const SPHERE_SIZE: (u32, u32) = (800, 800);
const CHART_SIZE: (u32, u32) = (800, 600);

/// Half-width of the sphere plot, in sphere radii.
const SPHERE_EXTENT: f64 = 1.2;

/// Opacity multiplier for curve segments behind the sphere.
const HIDDEN_ALPHA: f64 = 0.3;

/// Family every figure draws its text in.
const FONT_FAMILY: &str = "sans-serif";

static FONT_REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("unsupported output format: {0} (expected .svg or .png)")]
    UnsupportedFormat(String),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("no usable font: {0}")]
    Font(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Output encoding, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => Ok(ImageFormat::Svg),
            "png" => Ok(ImageFormat::Png),
            _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// egui's first proportional font, which is compiled into the binary.
fn bundled_font() -> Option<&'static [u8]> {
    let fonts = egui::FontDefinitions::default();
    let names = fonts.families.get(&egui::FontFamily::Proportional)?;
    names
        .iter()
        .find_map(|name| match &fonts.font_data.get(name)?.font {
            Cow::Borrowed(bytes) => Some(*bytes),
            Cow::Owned(_) => None,
        })
}

/// Register the bundled font as [`FONT_FAMILY`]. Later calls reuse the first outcome.
pub fn register_fonts() -> Result<(), ExportError> {
    FONT_REGISTERED
        .get_or_init(|| {
            let bytes = bundled_font().ok_or("egui ships no proportional font")?;
            register_font(FONT_FAMILY, FontStyle::Normal, bytes)
                .map_err(|_| "invalid font data".to_string())?;
            debug!("Registered {} bytes of font data as {FONT_FAMILY}", bytes.len());
            Ok(())
        })
        .clone()
        .map_err(ExportError::Font)
}

/// Something that can be drawn onto any plotters backend.
trait Figure {
    fn size(&self) -> (u32, u32);

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotResult
    where
        DB::ErrorType: 'static;
}

fn write_figure<F: Figure>(figure: &F, path: &Path) -> Result<(), ExportError> {
    let format = ImageFormat::from_path(path)?;
    register_fonts()?;
    let result = match format {
        ImageFormat::Svg => {
            present(figure, SVGBackend::new(path, figure.size()).into_drawing_area())
        }
        ImageFormat::Png => {
            present(figure, BitMapBackend::new(path, figure.size()).into_drawing_area())
        }
    };
    result.map_err(|e| ExportError::Drawing(e.to_string()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn present<F: Figure, DB: DrawingBackend>(figure: &F, root: DrawingArea<DB, Shift>) -> PlotResult
where
    DB::ErrorType: 'static,
{
    root.fill(&plot_color(BACKGROUND))?;
    figure.draw(&root)?;
    root.present()?;
    Ok(())
}

/// Convert a render palette color into a plotters color.
fn plot_color(color: Color) -> RGBAColor {
    let c = color.to_srgba();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBAColor(channel(c.red), channel(c.green), channel(c.blue), c.alpha as f64)
}

fn faded(color: RGBAColor, factor: f64) -> RGBAColor {
    RGBAColor(color.0, color.1, color.2, color.3 * factor)
}

fn opaque(color: RGBAColor) -> RGBAColor {
    RGBAColor(color.0, color.1, color.2, 1.0)
}

fn label_font(size: f64) -> TextStyle<'static> {
    (FONT_FAMILY, size).into_font().color(&plot_color(palette::LABEL))
}

/// Screen position and depth of a point seen by the default camera.
pub fn project(p: DVec3) -> (f64, f64, f64) {
    project_orthographic(p, view_direction(DEFAULT_AZIMUTH_DEG, DEFAULT_ELEVATION_DEG))
}

/// Split a projected curve into runs that stay on one side of the sphere.
fn split_by_depth(curve: &[DVec3]) -> Vec<(bool, Vec<(f64, f64)>)> {
    let mut runs: Vec<(bool, Vec<(f64, f64)>)> = Vec::new();
    for &p in curve {
        let (x, y, depth) = project(p);
        let front = depth >= 0.0;
        match runs.last_mut() {
            Some((side, points)) if *side == front => points.push((x, y)),
            Some((_, points)) => {
                // Share the crossing point so runs join up
                let last = points.last().copied();
                runs.push((front, last.into_iter().chain([(x, y)]).collect()));
            }
            None => runs.push((front, vec![(x, y)])),
        }
    }
    runs
}

fn sphere_chart<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    caption: &str,
) -> Result<SphereChart<'a, DB>, Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let chart = ChartBuilder::on(root)
        .margin(20)
        .caption(caption, label_font(22.0))
        .build_cartesian_2d(-SPHERE_EXTENT..SPHERE_EXTENT, -SPHERE_EXTENT..SPHERE_EXTENT)?;
    Ok(chart)
}

fn draw_curve<DB: DrawingBackend>(
    chart: &mut SphereChart<DB>,
    curve: &[DVec3],
    color: Color,
    width: u32,
) -> PlotResult
where
    DB::ErrorType: 'static,
{
    let color = plot_color(color);
    for (front, points) in split_by_depth(curve) {
        let style = if front { color } else { faded(color, HIDDEN_ALPHA) };
        chart.draw_series(std::iter::once(PathElement::new(
            points,
            style.stroke_width(width),
        )))?;
    }
    Ok(())
}

fn draw_segment<DB: DrawingBackend>(
    chart: &mut SphereChart<DB>,
    from: DVec3,
    to: DVec3,
    color: Color,
) -> PlotResult
where
    DB::ErrorType: 'static,
{
    let (x0, y0, _) = project(from);
    let (x1, y1, _) = project(to);
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x0, y0), (x1, y1)],
        plot_color(color).stroke_width(2),
    )))?;
    Ok(())
}

fn draw_marker<DB: DrawingBackend>(
    chart: &mut SphereChart<DB>,
    at: DVec3,
    color: Color,
) -> PlotResult
where
    DB::ErrorType: 'static,
{
    let (x, y, _) = project(at);
    chart.draw_series(std::iter::once(Circle::new((x, y), 8, plot_color(color).filled())))?;
    Ok(())
}

fn draw_labels<'t, DB: DrawingBackend>(
    chart: &mut SphereChart<DB>,
    labels: impl Iterator<Item = (&'t str, DVec3)>,
) -> PlotResult
where
    DB::ErrorType: 'static,
{
    let style = label_font(16.0).pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(labels.map(|(text, p)| {
        let (x, y, _) = project(p);
        Text::new(text.to_string(), (x, y), style.clone())
    }))?;
    Ok(())
}

/// Color swatch and name of each curve, stacked in the top-left corner.
fn draw_legend<DB: DrawingBackend>(
    chart: &mut SphereChart<DB>,
    entries: &[(&str, Color)],
) -> PlotResult
where
    DB::ErrorType: 'static,
{
    let style = label_font(14.0).pos(Pos::new(HPos::Left, VPos::Center));
    let left = 0.05 - SPHERE_EXTENT;
    for (row, &(name, color)) in entries.iter().enumerate() {
        let y = SPHERE_EXTENT - 0.08 * (row as f64 + 1.0);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(left, y), (left + 0.1, y)],
            opaque(plot_color(color)).stroke_width(3),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            name.to_string(),
            (left + 0.14, y),
            style.clone(),
        )))?;
    }
    Ok(())
}

struct SkyFigure<'a> {
    sky: &'a SkyGeometry,
    view: ViewFrame,
}

impl Figure for SkyFigure<'_> {
    fn size(&self) -> (u32, u32) {
        SPHERE_SIZE
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotResult
    where
        DB::ErrorType: 'static,
    {
        let sky = self.sky;
        let rotation = sky.view_rotation(self.view);
        let caption = format!(
            "{} frame: sun alt {:+.1}°, az {:.1}°",
            self.view.label(),
            sky.sun.altitude_deg,
            sky.sun.azimuth_deg
        );
        let mut chart = sphere_chart(root, &caption)?;

        let curves = sky.grid.iter().map(|c| (c, palette::GRID, 1)).chain([
            (&sky.equator, palette::EQUATOR, 1),
            (&sky.ecliptic, palette::ECLIPTIC, 2),
            (&sky.horizon, palette::HORIZON, 2),
            (&sky.zenith_diurnal_circle, palette::ZENITH, 1),
            (&sky.sun_diurnal_circle, palette::SUN_PATH, 2),
        ]);
        for (curve, color, width) in curves {
            draw_curve(&mut chart, &transform(rotation, curve), color, width)?;
        }
        draw_segment(&mut chart, DVec3::ZERO, rotation * sky.zenith, palette::ZENITH)?;
        draw_marker(&mut chart, rotation * sky.sun.direction, palette::SUN)?;

        let labels = sky
            .grid_labels
            .iter()
            .map(|(text, p)| (*text, rotation * *p))
            .chain(sky.cardinal_points.iter().map(|(c, p)| (c.label(), rotation * *p)))
            .chain(std::iter::once(("zenith", rotation * sky.zenith * 1.08)));
        draw_labels(&mut chart, labels)?;
        draw_legend(&mut chart, &palette::SKY_LEGEND)?;
        Ok(())
    }
}

struct SunPathFigure<'a> {
    config: &'a SunPathConfig,
    path: &'a DailySunPath,
}

impl Figure for SunPathFigure<'_> {
    fn size(&self) -> (u32, u32) {
        SPHERE_SIZE
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotResult
    where
        DB::ErrorType: 'static,
    {
        let caption = format!(
            "latitude {:.1}°, day {:.0}: {:.1} h of daylight",
            self.config.latitude_deg,
            self.config.day_of_year,
            self.path.day_length_hours()
        );
        let mut chart = sphere_chart(root, &caption)?;

        draw_curve(&mut chart, &parallel(std::f64::consts::FRAC_PI_2), palette::HORIZON, 2)?;
        draw_segment(&mut chart, DVec3::ZERO, DVec3::Z, palette::ZENITH)?;

        let seasons = solstice_paths(self.config.obliquity_deg, self.config.latitude_deg);
        for (season, color) in seasons.iter().zip(palette::SEASONS) {
            draw_curve(&mut chart, &season.points, color, 1)?;
        }

        let day: Vec<DVec3> = self.path.samples.iter().map(|s| s.direction).collect();
        draw_curve(&mut chart, &day, palette::SELECTED_DAY, 3)?;

        if let Some(highest) = self
            .path
            .samples
            .iter()
            .max_by(|a, b| a.altitude_deg.total_cmp(&b.altitude_deg))
            .filter(|s| s.altitude_deg > 0.0)
        {
            draw_marker(&mut chart, highest.direction, palette::SUN)?;
        }
        if self.path.sunrise.regime == DaylightRegime::Normal {
            let (sin_a, cos_a) = self.path.sunrise.azimuth_deg.to_radians().sin_cos();
            let at = DVec3::new(sin_a, cos_a, 0.0);
            draw_segment(&mut chart, at * 0.9, at * 1.1, palette::SUNRISE)?;
        }

        let labels = Cardinal::ALL
            .iter()
            .map(|c| (c.label(), c.horizon_vector() * 1.08))
            .chain(std::iter::once(("Z", DVec3::Z * 1.08)));
        draw_labels(&mut chart, labels)?;
        Ok(())
    }
}

/// Line chart of one annual quantity at the reference latitudes.
struct AnnualFigure {
    title: &'static str,
    y_desc: &'static str,
    y_range: (f64, f64),
    series: Vec<AnnualSeries>,
    value: fn(&AnnualPoint) -> f64,
}

/// Colors for the reference latitudes, low to high.
const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(230, 90, 80),
    RGBColor(235, 160, 70),
    RGBColor(220, 210, 90),
    RGBColor(110, 200, 110),
    RGBColor(90, 170, 230),
    RGBColor(170, 120, 230),
];

impl Figure for AnnualFigure {
    fn size(&self) -> (u32, u32) {
        CHART_SIZE
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotResult
    where
        DB::ErrorType: 'static,
    {
        let ink = plot_color(palette::LABEL);
        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .caption(self.title, label_font(22.0))
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..0.5, self.y_range.0..self.y_range.1)?;

        chart
            .configure_mesh()
            .axis_style(ink)
            .light_line_style(faded(plot_color(palette::GRID), 0.5))
            .bold_line_style(plot_color(palette::GRID))
            .x_desc("fraction of year from June solstice")
            .y_desc(self.y_desc)
            .label_style(label_font(14.0))
            .draw()?;

        for (series, color) in self.series.iter().zip(SERIES_COLORS) {
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().map(|p| (p.year_fraction, (self.value)(p))),
                    color.stroke_width(2),
                ))?
                .label(format!("{:.0}°", series.latitude_deg))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(plot_color(BACKGROUND))
            .border_style(ink)
            .label_font(label_font(14.0))
            .draw()?;
        Ok(())
    }
}

fn reference_series(obliquity_deg: f64) -> Vec<AnnualSeries> {
    reference_latitudes()
        .into_iter()
        .map(|latitude| annual_series(obliquity_deg, latitude, ANNUAL_SAMPLES))
        .collect()
}

/// Write the celestial sphere as seen from the default camera.
pub fn export_sky(sky: &SkyGeometry, view: ViewFrame, path: &Path) -> Result<(), ExportError> {
    write_figure(&SkyFigure { sky, view }, path)
}

/// Evaluate `config` and write the sun-path figure to `path`, plus the two
/// annual charts next to it as `<stem>-daylight.<ext>` and `<stem>-sunrise.<ext>`.
pub fn export_sun_path(config: &SunPathConfig, path: &Path) -> Result<Vec<PathBuf>, ExportError> {
    // Reject the format before anything touches the disk
    ImageFormat::from_path(path)?;
    let path_of_sun = evaluate_sun_path(config)?;

    write_figure(
        &SunPathFigure {
            config,
            path: &path_of_sun,
        },
        path,
    )?;
    let daylight = sibling(path, "daylight");
    let sunrise = sibling(path, "sunrise");
    export_annual_daylight(config.obliquity_deg, &daylight)?;
    export_annual_sunrise(config.obliquity_deg, &sunrise)?;
    Ok(vec![path.to_path_buf(), daylight, sunrise])
}

/// Write the sunlit fraction of the solar day over one year at the reference
/// latitudes.
pub fn export_annual_daylight(obliquity_deg: f64, path: &Path) -> Result<(), ExportError> {
    let figure = AnnualFigure {
        title: "Daylight over the year",
        y_desc: "sunlit fraction of solar day",
        y_range: (0.0, 1.0),
        series: reference_series(obliquity_deg),
        value: |p| p.daylight_fraction,
    };
    write_figure(&figure, path)
}

/// Write the sunrise azimuth over one year at the reference latitudes.
pub fn export_annual_sunrise(obliquity_deg: f64, path: &Path) -> Result<(), ExportError> {
    let figure = AnnualFigure {
        title: "Sunrise azimuth over the year",
        y_desc: "azimuth (° from north)",
        y_range: (0.0, 180.0),
        series: reference_series(obliquity_deg),
        value: |p| p.sunrise_azimuth_deg,
    };
    write_figure(&figure, path)
}

/// `dir/stem.ext` → `dir/stem-suffix.ext`.
pub fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("figure");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}-{suffix}.{ext}"),
        None => format!("{stem}-{suffix}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::evaluate_sky;
    use crate::types::ObserverConfig;
    use approx::assert_abs_diff_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skysphere-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_format_from_extension() {
        let format = |name: &str| ImageFormat::from_path(Path::new(name));
        assert_eq!(format("a.svg").unwrap(), ImageFormat::Svg);
        assert_eq!(format("a.PNG").unwrap(), ImageFormat::Png);
        assert!(matches!(
            ImageFormat::from_path(Path::new("a.pdf")),
            Err(ExportError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ImageFormat::from_path(Path::new("noext")),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_sibling_names() {
        assert_eq!(
            sibling(Path::new("out/sun.svg"), "daylight"),
            PathBuf::from("out/sun-daylight.svg")
        );
        assert_eq!(sibling(Path::new("sun"), "sunrise"), PathBuf::from("sun-sunrise"));
    }

    #[test]
    fn test_default_view_projection() {
        // Eye is on the -y side, 10° up: x stays right, zenith stays up
        let (x, y, _) = project(DVec3::X);
        assert_abs_diff_eq!(x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);
        let (_, up, _) = project(DVec3::Z);
        assert_abs_diff_eq!(up, DEFAULT_ELEVATION_DEG.to_radians().cos(), epsilon = 1e-12);
        let (_, _, depth) = project(DVec3::NEG_Y);
        assert!(depth > 0.0);
    }

    #[test]
    fn test_split_by_depth_shares_crossings() {
        let horizon = parallel(std::f64::consts::FRAC_PI_2);
        let runs = split_by_depth(&horizon);
        assert!(runs.len() >= 2);
        assert!(runs.iter().any(|(front, _)| *front));
        assert!(runs.iter().any(|(front, _)| !*front));
        let total: usize = runs.iter().map(|(_, pts)| pts.len()).sum();
        assert_eq!(total, horizon.len() + runs.len() - 1);
    }

    #[test]
    fn test_unsupported_format_writes_nothing() {
        let path = temp_path("sky.gif");
        let sky = evaluate_sky(&ObserverConfig::default()).unwrap();
        assert!(matches!(
            export_sky(&sky, ViewFrame::Horizon, &path),
            Err(ExportError::UnsupportedFormat(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_sky_svg() {
        let path = temp_path("sky.svg");
        let sky = evaluate_sky(&ObserverConfig::default()).unwrap();
        export_sky(&sky, ViewFrame::Equator, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("zenith"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_sky_svg_names_every_curve() {
        let path = temp_path("legend.svg");
        let sky = evaluate_sky(&ObserverConfig::default()).unwrap();
        export_sky(&sky, ViewFrame::Horizon, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        for (name, _) in palette::SKY_LEGEND {
            assert!(svg.contains(name), "legend entry {name} missing");
        }
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_font_registration_is_repeatable() {
        assert!(bundled_font().is_some());
        register_fonts().unwrap();
        register_fonts().unwrap();
    }

    #[test]
    fn test_bitmap_text_is_rasterized() {
        register_fonts().unwrap();
        let (width, height) = (200u32, 60u32);
        let mut pixels = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            root.draw(&Text::new("N E S W", (10, 10), label_font(32.0)))
                .unwrap();
            root.present().unwrap();
        }
        assert!(pixels.iter().any(|&p| p > 0), "no glyph pixels drawn");
    }

    #[test]
    fn test_sun_path_caption_follows_config() {
        let path = temp_path("caption.svg");
        let config = SunPathConfig {
            latitude_deg: 78.0,
            ..Default::default()
        };
        let written = export_sun_path(&config, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("latitude 78.0°"));
        assert!(svg.contains("24.0 h of daylight"));
        for file in written {
            std::fs::remove_file(file).unwrap();
        }
    }

    #[test]
    fn test_export_sun_path_writes_three_files() {
        let path = temp_path("sunpath.svg");
        let written = export_sun_path(&SunPathConfig::default(), &path).unwrap();
        assert_eq!(written.len(), 3);
        for file in &written {
            assert!(file.exists(), "{} missing", file.display());
            std::fs::remove_file(file).unwrap();
        }
    }

    #[test]
    fn test_plot_color_conversion() {
        let c = plot_color(Color::srgba(1.0, 0.0, 0.5, 0.25));
        assert_eq!((c.0, c.1, c.2), (255, 0, 128));
        assert_abs_diff_eq!(c.3, 0.25, epsilon = 1e-6);
    }
}
