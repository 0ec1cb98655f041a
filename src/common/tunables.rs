//! Tunable gameplay constants that are not per-character.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Downward gravity magnitude, px/s^2.
    pub gravity: f32,
    pub enemy_patrol_speed: f32,
    pub enemy_patrol_half_range: f32,
    /// Score awarded per coin when the win sequence tallies up.
    pub coin_score: u32,
    /// Delay between entering the finish zone and the level reset.
    pub win_delay: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            gravity: 1800.0,
            enemy_patrol_speed: 90.0,
            enemy_patrol_half_range: 110.0,
            coin_score: 1000,
            win_delay: 2.0,
        }
    }
}
