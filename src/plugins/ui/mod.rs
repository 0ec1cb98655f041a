//! HUD plugin (render-only): coin counter pinned to the camera.
//!
//! World-space `Text2d` repositioned relative to the camera every frame, the
//! same trick as a fullscreen overlay: no UI tree needed for a single label.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::camera::MainCamera;
use crate::plugins::game_flow::Score;

const HUD_OFFSET: Vec2 = Vec2::new(-580.0, 320.0);

#[derive(Component)]
struct CoinText;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(Update, update_coin_text)
        .add_systems(
            PostUpdate,
            pin_to_camera
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("CoinText"),
        CoinText,
        Text2d::new("Coins: 0"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_xyz(HUD_OFFSET.x, HUD_OFFSET.y, 500.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn update_coin_text(score: Res<Score>, mut q: Query<&mut Text2d, With<CoinText>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = format!("Coins: {}", score.coins);
    }
}

fn pin_to_camera(
    q_cam: Query<&Transform, (With<MainCamera>, Without<CoinText>)>,
    mut q_text: Query<&mut Transform, (With<CoinText>, Without<MainCamera>)>,
) {
    let Ok(cam) = q_cam.single() else {
        return;
    };
    for mut tf in &mut q_text {
        tf.translation.x = cam.translation.x + HUD_OFFSET.x;
        tf.translation.y = cam.translation.y + HUD_OFFSET.y;
    }
}
