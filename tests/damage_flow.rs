//! End-to-end damage and respawn flow against the full plugin set.
//!
//! The fixed-step schedules are driven directly with `run_schedule` so the
//! flow is deterministic and does not depend on wall-clock accumulation.

mod common;

use avian2d::prelude::*;
use bevy::prelude::*;

use dash_platformer::plugins::player::health::{Health, Invincibility, PlayerDamaged, Respawning};
use dash_platformer::plugins::player::Player;

fn player_entity(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("player should exist after entering InGame")
}

#[test]
fn damage_is_applied_once_per_invincibility_window() {
    let mut app = common::app_in_game();
    let player = player_entity(&mut app);

    let max = app.world().get::<Health>(player).unwrap().max;

    app.world_mut().write_message(PlayerDamaged {
        amount: 10.0,
        direction: Vec2::Y,
        force: 500.0,
    });
    app.world_mut().run_schedule(FixedPostUpdate);

    assert_eq!(app.world().get::<Health>(player).unwrap().current, max - 10.0);
    assert!(app.world().get::<Invincibility>(player).unwrap().is_active());

    // A second hit inside the window is swallowed by the guard.
    app.world_mut().write_message(PlayerDamaged {
        amount: 10.0,
        direction: Vec2::Y,
        force: 500.0,
    });
    app.world_mut().run_schedule(FixedPostUpdate);

    assert_eq!(app.world().get::<Health>(player).unwrap().current, max - 10.0);
}

#[test]
fn lethal_damage_freezes_the_player_for_respawn() {
    let mut app = common::app_in_game();
    let player = player_entity(&mut app);

    app.world_mut().write_message(PlayerDamaged {
        amount: 10_000.0,
        direction: Vec2::Y,
        force: 500.0,
    });
    app.world_mut().run_schedule(FixedPostUpdate);

    let world = app.world();
    assert_eq!(world.get::<Health>(player).unwrap().current, 0.0);
    assert!(world.get::<Respawning>(player).is_some());
    assert!(world.get::<RigidBodyDisabled>(player).is_some());
    assert!(world.get::<ColliderDisabled>(player).is_some());
    assert!(matches!(
        *world.get::<Visibility>(player).unwrap(),
        Visibility::Hidden
    ));
}
