//! Interactive app assembly for both visualizations.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::camera::CameraPlugin;
use crate::input::{SkyInputPlugin, SunPathInputPlugin};
use crate::render::{BACKGROUND, SkyRenderPlugin, SunPathRenderPlugin};
use crate::types::{ObserverConfig, SunPathConfig, ViewFrame};
use crate::ui::{SkyUiPlugin, SunPathUiPlugin};

fn window_plugins(title: &str) -> impl PluginGroup {
    DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: title.to_string(),
            ..default()
        }),
        ..default()
    })
}

/// Celestial-sphere window starting from `config`, viewed in `view`.
pub fn celesph_app(config: ObserverConfig, view: ViewFrame) -> App {
    let mut app = App::new();
    app.add_plugins(window_plugins("Celestial sphere"))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(BACKGROUND))
        // Insert before the scene plugin so its defaults don't win
        .insert_resource(config)
        .insert_resource(view)
        .add_plugins((CameraPlugin, SkyRenderPlugin, SkyUiPlugin, SkyInputPlugin));
    app
}

/// Sun-path window starting from `config`.
pub fn sunpath_app(config: SunPathConfig) -> App {
    let mut app = App::new();
    app.add_plugins(window_plugins("Sun path"))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(config)
        .add_plugins((
            CameraPlugin,
            SunPathRenderPlugin,
            SunPathUiPlugin,
            SunPathInputPlugin,
        ));
    app
}
