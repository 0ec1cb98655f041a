//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - we then call `dash_platformer::game::configure_headless` to install the
//!   gameplay plugins (no window, no renderer, no render-only plugins).

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

pub fn app_headless() -> App {
    let mut app = App::new();

    // Core ECS + states. AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    dash_platformer::game::configure_headless(&mut app);
    app
}

/// Boot the app and run the initial state transition so `OnEnter(InGame)`
/// spawn systems have executed.
#[allow(dead_code)]
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.update();
    app.update();
    app
}
