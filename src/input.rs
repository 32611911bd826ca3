//! Keyboard shortcuts.
//!
//! `1` cycles the view frame, `2` cycles the day type, `R` restores the
//! startup configuration.

use bevy::prelude::*;

use crate::scene::{InitialConfig, SceneRefresh};
use crate::types::{ObserverConfig, SunPathConfig, ViewFrame};

/// Plugin providing the celestial-sphere keyboard shortcuts.
pub struct SkyInputPlugin;

impl Plugin for SkyInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sky_shortcuts.before(SceneRefresh));
    }
}

/// Plugin providing the sun-path keyboard shortcuts.
pub struct SunPathInputPlugin;

impl Plugin for SunPathInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sun_path_shortcuts.before(SceneRefresh));
    }
}

fn sky_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut config: ResMut<ObserverConfig>,
    mut view: ResMut<ViewFrame>,
    initial: Option<Res<InitialConfig<ObserverConfig>>>,
) {
    // 1: cycle view frame
    if keys.just_pressed(KeyCode::Digit1) {
        let next = view.next();
        view.set_if_neq(next);
        info!("View frame: {}", next.label());
    }

    // 2: cycle day type
    if keys.just_pressed(KeyCode::Digit2) {
        config.day_type = config.day_type.next();
        info!("Day type: {}", config.day_type.label());
    }

    if keys.just_pressed(KeyCode::KeyR) {
        let reset = initial.map(|i| i.0).unwrap_or_default();
        if config.set_if_neq(reset) {
            info!("Observer config reset");
        }
    }
}

fn sun_path_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut config: ResMut<SunPathConfig>,
    initial: Option<Res<InitialConfig<SunPathConfig>>>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        let reset = initial.map(|i| i.0).unwrap_or_default();
        if config.set_if_neq(reset) {
            info!("Sun path config reset");
        }
    }
}
