#![cfg(test)]

use super::*;
use crate::common::test_utils::run_system_once;

#[test]
fn spawns_static_geometry_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_geometry);

    let blocks = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(_, rb)| matches!(**rb, RigidBody::Static))
        .count();
    // Two floors, two platforms, one slope, two walls.
    assert_eq!(blocks, 7);

    let slopes = world
        .query::<(&Name, &Transform)>()
        .iter(&world)
        .filter(|(n, tf)| n.as_str() == "Slope" && tf.rotation != Quat::IDENTITY)
        .count();
    assert_eq!(slopes, 1, "the slope must actually be rotated");
}

#[test]
fn spawns_trigger_volumes_as_sensors() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_triggers);

    let coins = world.query::<(&Coin, &Sensor)>().iter(&world).count();
    assert_eq!(coins, 3);
    assert_eq!(world.query::<(&DeathZone, &Sensor)>().iter(&world).count(), 1);
    assert_eq!(world.query::<(&FinishZone, &Sensor)>().iter(&world).count(), 1);
}
