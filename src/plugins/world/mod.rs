//! World plugin: level geometry and trigger volumes.
//!
//! Solid geometry (floor, platforms, one slope, side walls) lives on the
//! `World` layer. Coins, the death zone below the level and the finish zone
//! are static sensors on the `Trigger` layer; they only produce contact-begin
//! events, the game_flow plugin decides what those mean.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

#[cfg(test)]
mod tests;

pub const COIN_RADIUS: f32 = 10.0;

#[derive(Component)]
pub struct Coin;

#[derive(Component)]
pub struct DeathZone;

#[derive(Component)]
pub struct FinishZone;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_geometry, spawn_triggers));
}

fn spawn_geometry(mut commands: Commands) {
    let ground_color = Color::srgb(0.3, 0.5, 0.25);
    let ground_layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy]);

    let mut spawn_block = |name: String, pos: Vec2, size: Vec2, angle: f32| {
        commands.spawn((
            Name::new(name),
            Sprite {
                color: ground_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(pos.x, pos.y, 0.0).with_rotation(Quat::from_rotation_z(angle)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    // Main floor, split around the pit that the death zone covers.
    spawn_block("FloorLeft".into(), Vec2::new(-260.0, -180.0), Vec2::new(560.0, 40.0), 0.0);
    spawn_block("FloorRight".into(), Vec2::new(330.0, -180.0), Vec2::new(460.0, 40.0), 0.0);

    // Raised platforms.
    spawn_block("Platform0".into(), Vec2::new(-40.0, -60.0), Vec2::new(160.0, 24.0), 0.0);
    spawn_block("Platform1".into(), Vec2::new(430.0, 0.0), Vec2::new(220.0, 24.0), 0.0);

    // A slope the locomotion engine can climb along its surface tangent.
    spawn_block(
        "Slope".into(),
        Vec2::new(140.0, -120.0),
        Vec2::new(220.0, 24.0),
        0.35,
    );

    // Side walls keep the player inside the level.
    spawn_block("WallLeft".into(), Vec2::new(-560.0, 0.0), Vec2::new(40.0, 480.0), 0.0);
    spawn_block("WallRight".into(), Vec2::new(640.0, 0.0), Vec2::new(40.0, 480.0), 0.0);
}

fn spawn_triggers(mut commands: Commands) {
    let trigger_layers = CollisionLayers::new(Layer::Trigger, [Layer::Player]);

    for (i, (x, y)) in [(-40.0, -20.0), (140.0, -60.0), (430.0, 40.0)]
        .into_iter()
        .enumerate()
    {
        commands.spawn((
            Name::new(format!("Coin{i}")),
            Coin,
            Sprite {
                color: Color::srgb(0.95, 0.8, 0.2),
                custom_size: Some(Vec2::splat(COIN_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_xyz(x, y, 1.0),
            RigidBody::Static,
            Collider::circle(COIN_RADIUS),
            Sensor,
            trigger_layers,
            DespawnOnExit(GameState::InGame),
        ));
    }

    // Catches anything that falls through the pit.
    commands.spawn((
        Name::new("DeathZone"),
        DeathZone,
        Transform::from_xyz(0.0, -320.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(1400.0, 40.0),
        Sensor,
        trigger_layers,
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("FinishZone"),
        FinishZone,
        Sprite {
            color: Color::srgba(0.9, 0.9, 1.0, 0.4),
            custom_size: Some(Vec2::new(40.0, 120.0)),
            ..default()
        },
        Transform::from_xyz(590.0, -100.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 120.0),
        Sensor,
        trigger_layers,
        DespawnOnExit(GameState::InGame),
    ));
}
