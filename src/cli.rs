//! Command-line arguments and the two subcommands.

use std::path::PathBuf;

use bevy::app::AppExit;
use clap::{Args, Parser, Subcommand};

use crate::app::{celesph_app, sunpath_app};
use crate::export::{ExportError, export_sky, export_sun_path};
use crate::geometry::{GeometryError, evaluate_sky};
use crate::types::{
    DayType, EARTH_OBLIQUITY_DEG, JUNE_SOLSTICE_DAY, ObserverConfig, SunPathConfig, ViewFrame,
};

#[derive(Parser, Debug)]
#[command(name = "skysphere")]
#[command(about = "Celestial sphere and sun path visualizations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Celestial sphere seen by an observer on a rotating planet
    Celesph(CelesphArgs),

    /// Daily path of the sun over the local horizon
    Sunpath(SunpathArgs),
}

#[derive(Args, Debug)]
pub struct CelesphArgs {
    /// Write a static figure (.svg or .png) instead of opening a window
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Axial tilt in degrees
    #[arg(long, default_value_t = EARTH_OBLIQUITY_DEG, allow_negative_numbers = true)]
    pub obliquity: f64,

    /// Observer latitude in degrees
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Day of year (172 is the June solstice)
    #[arg(long, default_value_t = JUNE_SOLSTICE_DAY)]
    pub day: f64,

    /// Hour of day, 0 to 24
    #[arg(long, default_value_t = 12.0)]
    pub hour: f64,

    /// How the hour maps onto the sky's rotation
    #[arg(long, value_enum, default_value_t = DayType::Apparent)]
    pub day_type: DayType,

    /// Reference frame held fixed on screen
    #[arg(long, value_enum, default_value_t = ViewFrame::Horizon)]
    pub view: ViewFrame,
}

impl CelesphArgs {
    pub fn config(&self) -> ObserverConfig {
        ObserverConfig {
            obliquity_deg: self.obliquity,
            latitude_deg: self.latitude,
            day_of_year: self.day,
            hour_of_day: self.hour,
            day_type: self.day_type,
        }
    }
}

#[derive(Args, Debug)]
pub struct SunpathArgs {
    /// Write static figures (.svg or .png) instead of opening a window
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Axial tilt in degrees
    #[arg(long, default_value_t = EARTH_OBLIQUITY_DEG, allow_negative_numbers = true)]
    pub obliquity: f64,

    /// Observer latitude in degrees
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Day of year (172 is the June solstice)
    #[arg(long, default_value_t = JUNE_SOLSTICE_DAY)]
    pub day: f64,
}

impl SunpathArgs {
    pub fn config(&self) -> SunPathConfig {
        SunPathConfig {
            obliquity_deg: self.obliquity,
            latitude_deg: self.latitude,
            day_of_year: self.day,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("app exited with code {0}")]
    App(u8),
}

/// Run the selected subcommand.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Celesph(args) => run_celesph(args),
        Commands::Sunpath(args) => run_sunpath(args),
    }
}

/// Export the sphere, or open the window when no output is given.
pub fn run_celesph(args: &CelesphArgs) -> Result<(), CliError> {
    let config = args.config();
    // Fail before opening a window
    let sky = evaluate_sky(&config)?;

    match &args.output {
        Some(path) => {
            export_sky(&sky, args.view, path)?;
            println!("wrote {}", path.display());
            Ok(())
        }
        None => exit_result(celesph_app(config, args.view).run()),
    }
}

/// Export the sun path and annual charts, or open the window.
pub fn run_sunpath(args: &SunpathArgs) -> Result<(), CliError> {
    let config = args.config();
    config.validate()?;

    match &args.output {
        Some(path) => {
            for written in export_sun_path(&config, path)? {
                println!("wrote {}", written.display());
            }
            Ok(())
        }
        None => exit_result(sunpath_app(config).run()),
    }
}

fn exit_result(exit: AppExit) -> Result<(), CliError> {
    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(CliError::App(code.get())),
    }
}
