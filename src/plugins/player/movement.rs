//! Ground sensing and the locomotion engine.
//!
//! The ground sensor is stateless: every fixed tick it casts a box slightly
//! narrower than the player's collider a short distance down from the
//! collider's bottom edge. Losing contact for a single tick immediately flips
//! `grounded`; the jump buffer absorbs the resulting input/physics gap.
//!
//! The integration itself lives in [`step_locomotion`], a pure function of
//! config + contact + input + velocity + dt. The system around it only moves
//! data between the ECS and that function, which is what makes the velocity
//! trajectory reproducible in tests.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{config::MovementConfig, layers::Layer};

use super::dash::DashState;
use super::health::Respawning;
use super::{AnimationFlags, Facing, Player, PlayerInput, PLAYER_HEIGHT, PLAYER_WIDTH};

/// Fresh-per-tick ground sample. `normal` is `Vec2::Y` when airborne.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundContact {
    pub grounded: bool,
    pub normal: Vec2,
}

impl Default for GroundContact {
    fn default() -> Self {
        Self {
            grounded: false,
            normal: Vec2::Y,
        }
    }
}

/// Countdown armed on a jump press, consumed on the first grounded tick.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct JumpBuffer {
    pub remaining: f32,
}

/// Velocity as written by this tick's locomotion/dash step, before the solver
/// perturbs `LinearVelocity`. The combat resolver samples this copy so stomp
/// and speed tests see the pre-resolution value.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct StepVelocity(pub Vec2);

pub fn ground_sense(
    spatial: SpatialQuery,
    mut q: Query<
        (Entity, &Transform, &MovementConfig, &mut GroundContact),
        (With<Player>, Without<Respawning>),
    >,
) {
    for (entity, tf, cfg, mut contact) in &mut q {
        let bottom = tf.translation.truncate() - Vec2::new(0.0, PLAYER_HEIGHT * 0.5);
        let shape = Collider::rectangle(PLAYER_WIDTH * 0.9, cfg.ground_check_height);
        let filter =
            SpatialQueryFilter::from_mask(Layer::World).with_excluded_entities([entity]);

        let hit = spatial.cast_shape(
            &shape,
            bottom,
            0.0,
            Dir2::NEG_Y,
            &ShapeCastConfig::from_max_distance(cfg.ground_check_height),
            &filter,
        );

        *contact = match hit {
            Some(hit) => GroundContact {
                grounded: true,
                // Outward normal on the hit collider, pointing up out of the
                // ground surface.
                normal: hit.normal2,
            },
            None => GroundContact::default(),
        };
    }
}

/// Result of one locomotion integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
    pub velocity: Vec2,
    pub jump_buffer: f32,
    pub jumped: bool,
}

/// Direction along the ground surface for the given input sign.
///
/// The tangent is the surface normal rotated a quarter turn so that positive
/// input moves rightward on flat ground and uphill/downhill follows the slope.
pub(crate) fn slope_tangent(normal: Vec2, axis: f32) -> Vec2 {
    Vec2::new(normal.y, -normal.x) * axis
}

/// Exponential decay of `v` toward zero, saturating at a full stop when
/// `rate * dt` reaches 1.
pub(crate) fn decay_toward_zero(v: f32, rate: f32, dt: f32) -> f32 {
    v * (1.0 - (rate * dt).clamp(0.0, 1.0))
}

/// One fixed-step integration of the locomotion engine.
///
/// `jump_buffer` must already be armed by the caller on a press; this function
/// consumes it on the first grounded tick (one impulse per arm event) and
/// decays it otherwise. The horizontal component is clamped to `max_speed`,
/// the vertical component is never clamped.
pub(crate) fn step_locomotion(
    cfg: &MovementConfig,
    contact: GroundContact,
    axis: f32,
    jump_buffer: f32,
    velocity: Vec2,
    dt: f32,
) -> LocomotionStep {
    let mut vel = velocity;
    let mut buffer = jump_buffer;
    let mut grounded = contact.grounded;
    let mut jumped = false;

    if buffer > 0.0 && grounded {
        vel.y = cfg.jump_force;
        buffer = 0.0;
        // Airborne for the rest of this tick so the grounded path below
        // cannot touch the fresh jump velocity.
        grounded = false;
        jumped = true;
    }
    buffer = (buffer - dt).max(0.0);

    if grounded {
        if axis != 0.0 {
            vel += slope_tangent(contact.normal, axis) * cfg.acceleration * dt;
        } else {
            vel.x = decay_toward_zero(vel.x, cfg.deceleration, dt);
        }
    } else if axis != 0.0 {
        vel.x += axis * cfg.acceleration * 0.5 * dt;
    } else {
        vel.x = decay_toward_zero(vel.x, cfg.air_drag, dt);
    }

    vel.x = vel.x.clamp(-cfg.max_speed, cfg.max_speed);

    LocomotionStep {
        velocity: vel,
        jump_buffer: buffer,
        jumped,
    }
}

pub fn apply_locomotion(
    time: Res<Time<Fixed>>,
    input: Res<PlayerInput>,
    mut q: Query<
        (
            &MovementConfig,
            &GroundContact,
            &DashState,
            &mut JumpBuffer,
            &mut LinearVelocity,
            &mut StepVelocity,
            &mut Facing,
            &mut AnimationFlags,
        ),
        (With<Player>, Without<Respawning>),
    >,
) {
    let dt = time.delta_secs();

    for (cfg, contact, dash, mut buffer, mut vel, mut step_vel, mut facing, mut flags) in &mut q {
        if dash.is_bursting() {
            // The dash owns the body for the duration of the burst; jump and
            // movement input are ignored and the buffer is not armed.
            flags.is_running = false;
            flags.is_stopping = false;
            flags.is_jumping = true;
            step_vel.0 = vel.0;
            continue;
        }

        if input.jump_pressed {
            buffer.remaining = cfg.jump_buffer;
        }

        let step = step_locomotion(cfg, *contact, input.axis, buffer.remaining, vel.0, dt);
        vel.0 = step.velocity;
        buffer.remaining = step.jump_buffer;
        step_vel.0 = step.velocity;

        if input.axis > 0.0 {
            facing.0 = 1.0;
        } else if input.axis < 0.0 {
            facing.0 = -1.0;
        }

        let grounded_now = contact.grounded && !step.jumped;
        flags.is_stopping = grounded_now
            && input.axis != 0.0
            && vel.0.x.abs() > cfg.skid_speed
            && input.axis * vel.0.x < 0.0;
        flags.is_running = grounded_now && input.axis != 0.0 && !flags.is_stopping;
        flags.is_jumping = !grounded_now;
    }
}
