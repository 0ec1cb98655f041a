//! Game flow glue: score, trigger volumes and the level-reload bounce.
//!
//! The controller core never reaches for a global manager; coin pickups,
//! the death zone and the finish zone are resolved here from contact events,
//! and a level reload is just the `InGame -> Reloading -> InGame` state
//! bounce (everything level-scoped despawns on exit).

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::player::Player;
use crate::plugins::world::{Coin, DeathZone, FinishZone};

#[cfg(test)]
mod tests;

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Score {
    pub coins: u32,
}

/// Active win sequence: latched on entering the finish zone, reloads the
/// level once the delay runs out.
#[derive(Resource, Debug)]
pub struct WinSequence {
    pub timer: Timer,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Score>()
        .add_systems(
            FixedPostUpdate,
            process_trigger_contacts
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            tick_win_sequence
                .run_if(in_state(GameState::InGame))
                .run_if(resource_exists::<WinSequence>),
        )
        .add_systems(OnEnter(GameState::Reloading), reload_bounce);
}

pub fn process_trigger_contacts(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    mut score: ResMut<Score>,
    mut next: ResMut<NextState<GameState>>,
    win: Option<Res<WinSequence>>,
    q_player: Query<(), With<Player>>,
    q_coins: Query<(), With<Coin>>,
    q_death: Query<(), With<DeathZone>>,
    q_finish: Query<(), With<FinishZone>>,
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();
    let mut win_latched = win.is_some();

    for ev in started.read() {
        let pair = [
            (ev.body1.unwrap_or(ev.collider1), ev.collider2),
            (ev.body2.unwrap_or(ev.collider2), ev.collider1),
        ];
        // Identify which side is the player; the other collider is the trigger.
        let Some(&(_, trigger)) = pair.iter().find(|(owner, _)| q_player.contains(*owner)) else {
            continue;
        };

        if q_coins.contains(trigger) {
            // A coin can report several contact pairs in one tick; collect once.
            if !seen.insert(trigger) {
                continue;
            }
            score.coins += 1;
            info!("coin collected, total {}", score.coins);
            commands.entity(trigger).despawn();
        } else if q_death.contains(trigger) {
            info!("player fell out of the level");
            next.set(GameState::Reloading);
        } else if q_finish.contains(trigger) && !win_latched {
            win_latched = true;
            let final_score = score.coins * tunables.coin_score;
            info!("level complete, final score {final_score}");
            commands.insert_resource(WinSequence {
                timer: Timer::from_seconds(tunables.win_delay, TimerMode::Once),
            });
        }
    }
}

fn tick_win_sequence(
    time: Res<Time>,
    mut win: ResMut<WinSequence>,
    mut next: ResMut<NextState<GameState>>,
) {
    win.timer.tick(time.delta());
    if win.timer.is_finished() {
        next.set(GameState::Reloading);
    }
}

/// One-frame bounce back into InGame with a clean slate.
fn reload_bounce(
    mut commands: Commands,
    mut score: ResMut<Score>,
    mut next: ResMut<NextState<GameState>>,
) {
    *score = Score::default();
    commands.remove_resource::<WinSequence>();
    next.set(GameState::InGame);
}
