//! Dash subsystem: a timed override of the locomotion engine.
//!
//! Explicit state machine, one instance per character:
//!
//! ```text
//! Idle --press--> Dashing{remaining} --burst over--> Cooling{grace, cooldown} --> Idle
//! ```
//!
//! While `Dashing` the body moves at a fixed horizontal speed with gravity
//! suspended, and contacts auto-kill (the attack window). Invincibility stays
//! latched through the grace portion of `Cooling` so residual overlap with the
//! target cannot deal retaliatory damage; the cooldown only starts counting
//! once the grace period has ended.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::config::MovementConfig;

use super::health::{Invincibility, Respawning};
use super::{Facing, Player, PlayerInput};

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum DashState {
    #[default]
    Idle,
    Dashing {
        remaining: f32,
        dir: f32,
    },
    Cooling {
        grace: f32,
        cooldown: f32,
    },
}

/// What elapsed during one tick of the state machine.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct DashTick {
    pub burst_ended: bool,
    pub grace_ended: bool,
}

impl DashState {
    /// Attack window: contacts during the burst destroy the opponent.
    pub fn is_bursting(&self) -> bool {
        matches!(self, Self::Dashing { .. })
    }

    /// Dash input is accepted only here.
    pub fn can_dash(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub(crate) fn tick(&mut self, cfg: &MovementConfig, dt: f32) -> DashTick {
        let mut out = DashTick::default();
        match self {
            Self::Idle => {}
            Self::Dashing { remaining, .. } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    *self = Self::Cooling {
                        grace: cfg.dash_grace,
                        cooldown: cfg.dash_cooldown,
                    };
                    out.burst_ended = true;
                }
            }
            Self::Cooling { grace, cooldown } => {
                if *grace > 0.0 {
                    *grace -= dt;
                    if *grace <= 0.0 {
                        out.grace_ended = true;
                    }
                } else {
                    *cooldown -= dt;
                    if *cooldown <= 0.0 {
                        *self = Self::Idle;
                    }
                }
            }
        }
        out
    }
}

pub fn tick_dash(
    time: Res<Time<Fixed>>,
    input: Res<PlayerInput>,
    mut q: Query<
        (
            &MovementConfig,
            &Facing,
            &mut DashState,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Invincibility,
        ),
        (With<Player>, Without<Respawning>),
    >,
) {
    let dt = time.delta_secs();

    for (cfg, facing, mut dash, mut vel, mut gravity, mut inv) in &mut q {
        if input.dash_pressed && dash.can_dash() {
            let dir = if input.axis != 0.0 {
                input.axis.signum()
            } else {
                facing.0
            };
            *dash = DashState::Dashing {
                remaining: cfg.dash_duration,
                dir,
            };
            inv.manual = true;
            gravity.0 = 0.0;
            vel.0 = Vec2::new(dir * cfg.dash_speed, 0.0);
            debug!("dash started, dir {dir}");
            continue;
        }

        let ticked = dash.tick(cfg, dt);
        if ticked.burst_ended {
            gravity.0 = 1.0;
            vel.0 = Vec2::ZERO;
        }
        if ticked.grace_ended {
            inv.manual = false;
        }

        // Hold the burst velocity against solver contact impulses.
        if let DashState::Dashing { dir, .. } = *dash {
            vel.0 = Vec2::new(dir * cfg.dash_speed, 0.0);
        }
    }
}
