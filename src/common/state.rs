//! Global state machine.
//!
//! `Reloading` is the level-reset bounce: everything level-scoped carries
//! `DespawnOnExit(InGame)`, so leaving and immediately re-entering `InGame`
//! rebuilds the level from scratch. The respawn sequence, the death zone and
//! the win sequence all reset the level by requesting this transition.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    Reloading,
}
