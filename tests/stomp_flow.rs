//! Contact resolution flow: a fabricated contact-begin event between the
//! player and an enemy runs through the combat resolver and the enemy
//! lifecycle.

mod common;

use avian2d::prelude::*;
use bevy::prelude::*;

use dash_platformer::common::config::MovementConfig;
use dash_platformer::common::layers::Layer;
use dash_platformer::plugins::enemies::{Enemy, EnemyLifeState};
use dash_platformer::plugins::player::movement::StepVelocity;
use dash_platformer::plugins::player::Player;

#[test]
fn stomping_an_enemy_starts_its_death_and_bounces_the_player() {
    let mut app = common::app_in_game();

    let player = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .unwrap();
    let bounce = app
        .world()
        .get::<MovementConfig>(player)
        .unwrap()
        .stomp_bounce;

    // Park a fresh enemy well away from level geometry, player right above it.
    let enemy = app
        .world_mut()
        .spawn((
            Enemy,
            EnemyLifeState::Alive,
            Transform::from_xyz(2000.0, 0.0, 0.0),
            CollisionLayers::new(Layer::Enemy, [Layer::Player]),
            LinearVelocity::ZERO,
        ))
        .id();
    {
        let mut player_mut = app.world_mut().entity_mut(player);
        *player_mut.get_mut::<Transform>().unwrap() = Transform::from_xyz(2000.0, 60.0, 0.0);
        player_mut.get_mut::<StepVelocity>().unwrap().0 = Vec2::new(0.0, -20.0);
    }

    app.world_mut().write_message(CollisionStart {
        collider1: player,
        collider2: enemy,
        body1: Some(player),
        body2: Some(enemy),
    });
    app.world_mut().run_schedule(FixedPostUpdate);

    assert!(matches!(
        app.world().get::<EnemyLifeState>(enemy).unwrap(),
        EnemyLifeState::Dying { .. }
    ));
    assert_eq!(app.world().get::<LinearVelocity>(player).unwrap().0.y, bounce);
}
