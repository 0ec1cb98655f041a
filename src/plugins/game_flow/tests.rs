#![cfg(test)]

use super::*;

use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::plugins::player::Player;

use bevy::ecs::message::Messages;

fn trigger_world() -> World {
    let mut world = World::new();
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Score>();
    world.insert_resource(Tunables::default());
    world.init_resource::<NextState<GameState>>();
    world
}

fn spawn_player(world: &mut World) -> Entity {
    world
        .spawn((Player, Transform::default()))
        .id()
}

#[test]
fn coin_contact_scores_once_and_despawns_the_coin() {
    let mut world = trigger_world();
    let player = spawn_player(&mut world);
    let coin = world
        .spawn((
            Coin,
            Transform::default(),
            CollisionLayers::new(Layer::Trigger, [Layer::Player]),
        ))
        .id();

    // Duplicate contact pairs within the same tick.
    world.write_message(CollisionStart {
        collider1: player,
        collider2: coin,
        body1: Some(player),
        body2: None,
    });
    world.write_message(CollisionStart {
        collider1: coin,
        collider2: player,
        body1: None,
        body2: Some(player),
    });

    run_system_once(&mut world, process_trigger_contacts);

    assert_eq!(world.resource::<Score>().coins, 1);
    assert!(world.get_entity(coin).is_err());
}

#[test]
fn death_zone_contact_requests_a_reload() {
    let mut world = trigger_world();
    let player = spawn_player(&mut world);
    let zone = world.spawn((DeathZone, Transform::default())).id();

    world.write_message(CollisionStart {
        collider1: player,
        collider2: zone,
        body1: Some(player),
        body2: None,
    });

    run_system_once(&mut world, process_trigger_contacts);

    assert!(matches!(
        *world.resource::<NextState<GameState>>(),
        NextState::Pending(GameState::Reloading)
    ));
}

#[test]
fn finish_zone_latches_a_single_win_sequence() {
    let mut world = trigger_world();
    let player = spawn_player(&mut world);
    let finish = world.spawn((FinishZone, Transform::default())).id();

    world.write_message(CollisionStart {
        collider1: player,
        collider2: finish,
        body1: Some(player),
        body2: None,
    });
    world.write_message(CollisionStart {
        collider1: finish,
        collider2: player,
        body1: None,
        body2: Some(player),
    });

    run_system_once(&mut world, process_trigger_contacts);
    assert!(world.get_resource::<WinSequence>().is_some());

    // Re-entering while the sequence runs must not restart it.
    let elapsed_before = world.resource::<WinSequence>().timer.elapsed();
    world.write_message(CollisionStart {
        collider1: player,
        collider2: finish,
        body1: Some(player),
        body2: None,
    });
    run_system_once(&mut world, process_trigger_contacts);
    assert_eq!(world.resource::<WinSequence>().timer.elapsed(), elapsed_before);
}

#[test]
fn non_trigger_contacts_are_ignored() {
    let mut world = trigger_world();
    let player = spawn_player(&mut world);
    let wall = world.spawn(Transform::default()).id();

    world.write_message(CollisionStart {
        collider1: player,
        collider2: wall,
        body1: Some(player),
        body2: None,
    });

    run_system_once(&mut world, process_trigger_contacts);

    assert_eq!(world.resource::<Score>().coins, 0);
    assert!(world.get_resource::<WinSequence>().is_none());
}
