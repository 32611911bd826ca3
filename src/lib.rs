//! Skysphere - celestial sphere and sun path visualizations
//!
//! Library crate holding the geometry, the Bevy plugins for both interactive
//! views, and the static figure export. The binary wires them to the CLI.

pub mod app;
pub mod camera;
pub mod cli;
pub mod export;
pub mod geometry;
pub mod input;
pub mod render;
pub mod scene;
pub mod types;
pub mod ui;
