//! Per-character movement and combat tuning.
//!
//! A `MovementConfig` is attached at spawn and never mutated afterwards;
//! every system that consumes it takes `&MovementConfig`. The struct is
//! serde-serializable so a tuning set can be stored and restored without
//! changing the resulting velocity trajectory (the integration is a pure
//! function of config, input and fixed `dt`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    // Locomotion
    pub acceleration: f32,
    /// Exponential braking rate applied when grounded with no input.
    pub deceleration: f32,
    pub max_speed: f32,
    pub jump_force: f32,
    /// Exponential horizontal decay rate while airborne with no input.
    pub air_drag: f32,
    /// Seconds a jump press is remembered while airborne.
    pub jump_buffer: f32,
    /// Horizontal speed above which reversing input reads as a skid.
    pub skid_speed: f32,
    /// Downward reach of the ground check box, px.
    pub ground_check_height: f32,

    // Dash
    pub dash_speed: f32,
    pub dash_duration: f32,
    /// Invincibility carried past the end of the burst.
    pub dash_grace: f32,
    /// Cooldown counted from the end of the grace period.
    pub dash_cooldown: f32,

    // Combat
    /// Slack when comparing the player's collider bottom to an enemy's center.
    pub stomp_tolerance: f32,
    /// Upward velocity above which a contact cannot count as a stomp.
    pub stomp_max_ascent: f32,
    pub stomp_bounce: f32,
    /// Horizontal speed above which any contact kills the enemy.
    pub attack_speed: f32,
    pub contact_damage: f32,
    pub knockback_force: f32,
    /// Fixed upward component blended into the knockback direction.
    pub knockback_up_bias: f32,

    // Health
    pub max_health: f32,
    pub invincibility_time: f32,
    pub flicker_interval: f32,
    pub respawn_delay: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            acceleration: 1400.0,
            deceleration: 10.0,
            max_speed: 420.0,
            jump_force: 760.0,
            air_drag: 4.0,
            jump_buffer: 0.2,
            skid_speed: 60.0,
            ground_check_height: 6.0,

            dash_speed: 900.0,
            dash_duration: 0.3,
            dash_grace: 0.2,
            dash_cooldown: 1.0,

            stomp_tolerance: 6.0,
            stomp_max_ascent: 40.0,
            stomp_bounce: 420.0,
            attack_speed: 380.0,
            contact_damage: 10.0,
            knockback_force: 520.0,
            knockback_up_bias: 0.6,

            max_health: 100.0,
            invincibility_time: 2.0,
            flicker_interval: 0.1,
            respawn_delay: 1.5,
        }
    }
}
