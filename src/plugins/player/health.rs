//! Health, invincibility and the respawn life cycle.
//!
//! Two independent invincibility sources gate damage, OR'd together:
//! - `manual`: latched by the dash subsystem for burst + grace
//! - `timed_remaining`: armed after surviving a hit, with a visibility
//!   flicker while it runs
//!
//! Health reaching zero enters `Respawning`, which is terminal for the life
//! instance: physics and collision response are disabled, visuals hidden, and
//! after `respawn_delay` the level reload is requested. Respawn wins any race
//! with a running flicker; the invincibility tick never touches a respawning
//! character.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::config::MovementConfig;
use crate::common::state::GameState;

use super::Player;

#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

#[derive(Component, Debug, Default, Clone)]
pub struct Invincibility {
    /// Latched and released by the dash subsystem.
    pub manual: bool,
    /// Post-damage window, seconds left.
    pub timed_remaining: f32,
    flicker_accum: f32,
}

impl Invincibility {
    pub fn is_active(&self) -> bool {
        self.manual || self.timed_remaining > 0.0
    }
}

/// Terminal state for the current life instance.
#[derive(Component, Debug)]
pub struct Respawning {
    pub timer: Timer,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct PlayerDamaged {
    pub amount: f32,
    pub direction: Vec2,
    pub force: f32,
}

/// Consume damage messages produced by the combat resolver.
///
/// Silently no-ops while any invincibility source is active or health is
/// already depleted; that guard is the behaviour, not an error.
pub fn apply_damage(
    mut commands: Commands,
    mut damaged: MessageReader<PlayerDamaged>,
    mut q: Query<
        (
            Entity,
            &MovementConfig,
            &mut Health,
            &mut Invincibility,
            &mut LinearVelocity,
        ),
        (With<Player>, Without<Respawning>),
    >,
) {
    for msg in damaged.read() {
        let Ok((entity, cfg, mut health, mut inv, mut vel)) = q.single_mut() else {
            return;
        };
        if inv.is_active() || health.is_depleted() {
            continue;
        }

        health.current = (health.current - msg.amount).max(0.0);
        // Kill the current motion, then the knockback impulse.
        vel.0 = msg.direction * msg.force;
        info!("player took {} damage, health {}", msg.amount, health.current);

        if health.is_depleted() {
            commands.entity(entity).insert(Respawning {
                timer: Timer::from_seconds(cfg.respawn_delay, TimerMode::Once),
            });
        } else {
            inv.timed_remaining = cfg.invincibility_time;
            inv.flicker_accum = 0.0;
        }
    }
}

/// Freeze a freshly dead player: no simulation, no collision response, no
/// visuals. Also cancels an in-flight flicker so respawn always wins that
/// race.
pub fn begin_respawn(
    mut commands: Commands,
    mut q: Query<(Entity, &mut Visibility, &mut Invincibility), (With<Player>, Added<Respawning>)>,
) {
    for (entity, mut vis, mut inv) in &mut q {
        commands.entity(entity).insert((RigidBodyDisabled, ColliderDisabled));
        *vis = Visibility::Hidden;
        inv.timed_remaining = 0.0;
        inv.flicker_accum = 0.0;
        info!("player died, respawn pending");
    }
}

/// Advance the post-damage invincibility window and its visibility flicker.
/// Ends by forcing the sprite visible again.
pub fn tick_invincibility(
    time: Res<Time<Fixed>>,
    mut q: Query<
        (&MovementConfig, &mut Invincibility, &mut Visibility),
        (With<Player>, Without<Respawning>),
    >,
) {
    let dt = time.delta_secs();

    for (cfg, mut inv, mut vis) in &mut q {
        if inv.timed_remaining <= 0.0 {
            continue;
        }

        inv.timed_remaining -= dt;
        if inv.timed_remaining <= 0.0 {
            inv.timed_remaining = 0.0;
            inv.flicker_accum = 0.0;
            *vis = Visibility::Inherited;
            continue;
        }

        inv.flicker_accum += dt;
        if inv.flicker_accum >= cfg.flicker_interval {
            inv.flicker_accum -= cfg.flicker_interval;
            *vis = if matches!(*vis, Visibility::Hidden) {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

/// Wait out the respawn delay, then request the level reload.
pub fn tick_respawn(
    time: Res<Time<Fixed>>,
    mut next: ResMut<NextState<GameState>>,
    mut q: Query<&mut Respawning, With<Player>>,
) {
    for mut respawning in &mut q {
        respawning.timer.tick(time.delta());
        if respawning.timer.is_finished() {
            next.set(GameState::Reloading);
        }
    }
}
