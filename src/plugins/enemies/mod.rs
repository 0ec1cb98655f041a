//! Enemies plugin: patrol walkers with a short death state.
//!
//! The life cycle is an explicit state machine:
//! - Alive: patrols between two extents around its spawn point.
//! - Dying: short shrink/fade transition, collision interaction cleared.
//! - Dead: terminal marker, despawn pending.
//!
//! Structural changes never happen inside the fixed step; dead enemies are
//! marked with `PendingDespawn` and removed in PostUpdate.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::player::combat::EnemyKilled;


pub const ENEMY_SIZE: f32 = 28.0;

#[derive(Component)]
pub struct Enemy;

#[derive(Component, Debug, Clone)]
pub enum EnemyLifeState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

/// Marker: enemy should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Back-and-forth sweep around the spawn x position.
#[derive(Component, Debug, Clone, Copy)]
pub struct Patrol {
    pub origin_x: f32,
    pub half_range: f32,
    pub dir: f32,
}

/// Collision layers for an enemy that should no longer interact with anything.
///
/// Membership stays `Enemy` but the filters are cleared, which stops new
/// contact events without a structural change.
#[inline]
fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, LayerMask::NONE)
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_walkers);

    app.add_systems(
        FixedUpdate,
        patrol.run_if(in_state(GameState::InGame)),
    );

    // Consume kill messages after the combat resolver has produced them.
    app.add_systems(
        FixedPostUpdate,
        (
            consume_kills.after(crate::plugins::player::combat::resolve_enemy_contacts),
            death_progress,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_marked.run_if(in_state(GameState::InGame)),
    );
}

fn spawn_walkers(mut commands: Commands, tunables: Res<Tunables>) {
    let enemy_layers = CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player]);

    for (i, (x, y)) in [(-60.0, -146.0), (240.0, -146.0), (430.0, 34.0)]
        .into_iter()
        .enumerate()
    {
        commands.spawn((
            Name::new(format!("Walker{i}")),
            Enemy,
            EnemyLifeState::Alive,
            Patrol {
                origin_x: x,
                half_range: tunables.enemy_patrol_half_range,
                dir: if i % 2 == 0 { 1.0 } else { -1.0 },
            },
            Sprite {
                color: Color::srgb(0.8, 0.25, 0.3),
                custom_size: Some(Vec2::splat(ENEMY_SIZE)),
                ..default()
            },
            Transform::from_xyz(x, y, 1.0),
            RigidBody::Kinematic,
            Collider::rectangle(ENEMY_SIZE, ENEMY_SIZE),
            enemy_layers,
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Sweep between the patrol extents, flipping direction at each end.
fn patrol(
    tunables: Res<Tunables>,
    mut q: Query<
        (&Transform, &mut Patrol, &mut LinearVelocity, &EnemyLifeState),
        With<Enemy>,
    >,
) {
    for (tf, mut patrol, mut vel, life) in &mut q {
        if !matches!(life, EnemyLifeState::Alive) {
            vel.0 = Vec2::ZERO;
            continue;
        }

        let x = tf.translation.x;
        if x >= patrol.origin_x + patrol.half_range {
            patrol.dir = -1.0;
        } else if x <= patrol.origin_x - patrol.half_range {
            patrol.dir = 1.0;
        }
        vel.0.x = patrol.dir * tunables.enemy_patrol_speed;
    }
}

/// Transition Alive -> Dying for enemies the combat resolver destroyed.
fn consume_kills(
    mut kills: MessageReader<EnemyKilled>,
    mut q: Query<
        (&mut EnemyLifeState, &mut CollisionLayers, &mut LinearVelocity),
        (With<Enemy>, Without<PendingDespawn>),
    >,
) {
    for kill in kills.read() {
        let Ok((mut life, mut layers, mut vel)) = q.get_mut(kill.enemy) else {
            continue;
        };
        if !matches!(*life, EnemyLifeState::Alive) {
            continue;
        }

        *life = EnemyLifeState::Dying {
            timer: Timer::from_seconds(0.35, TimerMode::Once),
        };
        *layers = non_interacting_enemy_layers();
        vel.0 = Vec2::ZERO;
    }
}

/// Animate the Dying state and mark PendingDespawn once finished.
fn death_progress(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<
        (Entity, &mut EnemyLifeState, &mut Sprite, &mut Transform),
        (With<Enemy>, Without<PendingDespawn>),
    >,
) {
    for (entity, mut life, mut sprite, mut tf) in &mut q {
        let EnemyLifeState::Dying { timer } = &mut *life else {
            continue;
        };

        timer.tick(time.delta());

        let dur = timer.duration().as_secs_f32().max(0.0001);
        let t = (timer.elapsed_secs() / dur).clamp(0.0, 1.0);

        tf.scale = Vec3::splat(1.0 - t);
        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();

        if timer.is_finished() {
            *life = EnemyLifeState::Dead;
            commands.entity(entity).insert(PendingDespawn);
        }
    }
}

/// Despawn enemies marked for removal; the only structural exit point.
fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for entity in &q {
        commands.entity(entity).despawn();
    }
}
