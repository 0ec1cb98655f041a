//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod enemies;
pub mod game_flow;
pub mod physics;
pub mod player;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod ui;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    game_flow::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    ui::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
