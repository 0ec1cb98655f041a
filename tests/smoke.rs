mod common;

use bevy::prelude::*;

use dash_platformer::common::config::MovementConfig;
use dash_platformer::plugins::enemies::Enemy;
use dash_platformer::plugins::player::dash::DashState;
use dash_platformer::plugins::player::health::Health;
use dash_platformer::plugins::player::movement::GroundContact;
use dash_platformer::plugins::player::Player;
use dash_platformer::plugins::world::Coin;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn player_controller_is_wired() {
    let mut app = common::app_in_game();

    let ok = app
        .world_mut()
        .query::<(&Player, &MovementConfig, &DashState, &Health, &GroundContact)>()
        .iter(app.world())
        .next()
        .is_some();

    assert!(ok, "player should spawn with the full controller component set");
}

#[test]
fn level_spawns_enemies_and_coins() {
    let mut app = common::app_in_game();

    let enemies = app
        .world_mut()
        .query::<&Enemy>()
        .iter(app.world())
        .count();
    let coins = app.world_mut().query::<&Coin>().iter(app.world()).count();

    assert_eq!(enemies, 3);
    assert_eq!(coins, 3);
}
