//! Combat resolver: one outcome per contact-begin event with a hostile.
//!
//! Decision policy, first rule wins:
//! 1. active dash burst -> enemy destroyed
//! 2. stomp (contact from above while not strongly ascending) -> destroyed +
//!    upward bounce; failing that, a horizontal speed over the attack
//!    threshold also destroys, without the bounce
//! 3. otherwise the player takes damage with knockback away from the enemy
//!
//! Outcomes leave this system as messages (`EnemyKilled` to the enemies
//! plugin, `PlayerDamaged` to the health module); the only state touched
//! directly here is the player's velocity for the stomp bounce.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::{config::MovementConfig, layers::Layer};
use crate::plugins::enemies::{Enemy, EnemyLifeState};

use super::dash::DashState;
use super::health::{PlayerDamaged, Respawning};
use super::movement::StepVelocity;
use super::{Player, PLAYER_HEIGHT};

#[derive(Message, Clone, Copy, Debug)]
pub struct EnemyKilled {
    pub enemy: Entity,
}

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContactOutcome {
    DashKill,
    StompKill,
    SpeedKill,
    Damage,
}

/// Pure decision function; exactly one outcome per evaluation.
///
/// The stomp test compares the player's collider bottom to the enemy's
/// vertical center with a fixed tolerance, and excludes contacts where the
/// player is still ascending fast (hitting an underside mid-jump).
pub(crate) fn resolve_outcome(
    cfg: &MovementConfig,
    dashing: bool,
    player_bottom: f32,
    enemy_center_y: f32,
    velocity: Vec2,
) -> ContactOutcome {
    if dashing {
        return ContactOutcome::DashKill;
    }
    let from_above = player_bottom >= enemy_center_y - cfg.stomp_tolerance;
    if from_above && velocity.y <= cfg.stomp_max_ascent {
        return ContactOutcome::StompKill;
    }
    if velocity.x.abs() > cfg.attack_speed {
        return ContactOutcome::SpeedKill;
    }
    ContactOutcome::Damage
}

/// Knockback direction: away from the enemy, blended with a fixed upward
/// component so the impulse cannot pin the player against the ground.
pub(crate) fn knockback_direction(player_pos: Vec2, enemy_pos: Vec2, up_bias: f32) -> Vec2 {
    let away = player_pos - enemy_pos;
    let away = if away.length_squared() > 1e-6 {
        away.normalize()
    } else {
        Vec2::Y
    };
    let biased = away + Vec2::Y * up_bias;
    if biased.length_squared() > 1e-6 {
        biased.normalize()
    } else {
        Vec2::Y
    }
}

pub fn resolve_enemy_contacts(
    mut started: MessageReader<CollisionStart>,
    mut q_player: Query<
        (
            Entity,
            &Transform,
            &MovementConfig,
            &DashState,
            &StepVelocity,
            &mut LinearVelocity,
        ),
        (With<Player>, Without<Respawning>),
    >,
    q_enemies: Query<(&Transform, &EnemyLifeState), (With<Enemy>, Without<Player>)>,
    q_layers: Query<&CollisionLayers>,
    mut kills: MessageWriter<EnemyKilled>,
    mut damage: MessageWriter<PlayerDamaged>,
    // Per-tick dedupe: one outcome per enemy per contact-begin batch.
    mut seen: Local<HashSet<Entity>>,
) {
    let Ok((player_e, player_tf, cfg, dash, step_vel, mut vel)) = q_player.single_mut() else {
        return;
    };
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);
        let (_player_side, other_side) = if t1.gameplay_owner() == player_e {
            (t1, t2)
        } else if t2.gameplay_owner() == player_e {
            (t2, t1)
        } else {
            continue;
        };

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };
        if !other_layers.memberships.has_all(Layer::Enemy) {
            continue;
        }

        let enemy_e = other_side.gameplay_owner();
        if !seen.insert(enemy_e) {
            continue;
        }

        let Ok((enemy_tf, life)) = q_enemies.get(enemy_e) else {
            continue;
        };
        if !matches!(life, EnemyLifeState::Alive) {
            continue;
        }

        let player_pos = player_tf.translation.truncate();
        let enemy_pos = enemy_tf.translation.truncate();
        let player_bottom = player_pos.y - PLAYER_HEIGHT * 0.5;

        match resolve_outcome(cfg, dash.is_bursting(), player_bottom, enemy_pos.y, step_vel.0) {
            ContactOutcome::DashKill | ContactOutcome::SpeedKill => {
                debug!("enemy {enemy_e} destroyed by dash/speed");
                kills.write(EnemyKilled { enemy: enemy_e });
            }
            ContactOutcome::StompKill => {
                debug!("enemy {enemy_e} stomped");
                kills.write(EnemyKilled { enemy: enemy_e });
                // Zero the fall and bounce off the target.
                vel.0.y = cfg.stomp_bounce;
            }
            ContactOutcome::Damage => {
                damage.write(PlayerDamaged {
                    amount: cfg.contact_damage,
                    direction: knockback_direction(player_pos, enemy_pos, cfg.knockback_up_bias),
                    force: cfg.knockback_force,
                });
            }
        }
    }
}
