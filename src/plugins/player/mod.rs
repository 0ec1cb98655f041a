//! Player plugin: movement, dash, combat resolution and health.
//!
//! Pipeline per simulation tick:
//! - Update: sample input, write the PlayerInput resource (edge flags are
//!   latched until a fixed tick consumes them)
//! - FixedUpdate: ground sense -> dash -> locomotion, strictly in that order;
//!   locomotion is suspended while a dash burst is active
//! - FixedPostUpdate: contact events from the physics backend are resolved
//!   into kills or damage, then health/invincibility/respawn state advances
//!
//! All timed behaviour (jump buffer, dash phases, invincibility window,
//! respawn delay) is a countdown field ticked by the fixed clock. There is no
//! suspended control flow anywhere, which keeps cancellation (respawn
//! pre-empting the damage flicker) explicit and testable.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{config::MovementConfig, layers::Layer, state::GameState};

pub mod combat;
pub mod dash;
pub mod health;
pub mod movement;


pub const PLAYER_WIDTH: f32 = 24.0;
pub const PLAYER_HEIGHT: f32 = 36.0;
pub const PLAYER_SPAWN: Vec2 = Vec2::new(-420.0, -120.0);

#[derive(Component)]
pub struct Player;

/// Horizontal facing sign: +1.0 right, -1.0 left. Follows the last nonzero
/// input and decides the dash direction when no input is held.
#[derive(Component, Debug, Clone, Copy)]
pub struct Facing(pub f32);

/// Boolean flags for an external animator. The controller only writes them.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct AnimationFlags {
    pub is_running: bool,
    pub is_jumping: bool,
    pub is_stopping: bool,
}

/// Per-frame input sample.
///
/// `axis` is continuous; the two pressed flags are edge-triggered and stay
/// latched until the end of the next fixed tick so a press between physics
/// steps is never dropped.
#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub axis: f32,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_message::<combat::EnemyKilled>()
        .add_message::<health::PlayerDamaged>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, (gather_input, sync_facing_sprite))
        .add_systems(
            FixedUpdate,
            (
                movement::ground_sense,
                dash::tick_dash,
                movement::apply_locomotion,
                clear_input_edges,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            (
                combat::resolve_enemy_contacts,
                health::apply_damage,
                health::begin_respawn,
                health::tick_invincibility,
                health::tick_respawn,
            )
                .chain()
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands) {
    let cfg = MovementConfig::default();

    commands.spawn((
        Name::new("Player"),
        Player,
        Facing(1.0),
        AnimationFlags::default(),
        (
            health::Health::new(cfg.max_health),
            health::Invincibility::default(),
            dash::DashState::default(),
            movement::GroundContact::default(),
            movement::JumpBuffer::default(),
            movement::StepVelocity::default(),
            cfg,
        ),
        Sprite {
            color: Color::srgb(0.2, 0.45, 0.9),
            custom_size: Some(Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 1.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_WIDTH, PLAYER_HEIGHT),
            CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy, Layer::Trigger]),
            LockedAxes::ROTATION_LOCKED,
            Friction::new(0.0),
            GravityScale(1.0),
            LinearVelocity::ZERO,
        ),
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut axis = 0.0;
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis += 1.0;
    }
    input.axis = axis;

    // OR into the latch; fixed ticks clear it after consumption.
    input.jump_pressed |= keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::KeyW);
    input.dash_pressed |=
        keys.just_pressed(KeyCode::ShiftLeft) || keys.just_pressed(KeyCode::KeyJ);
}

/// Last system of the fixed chain: the edge flags have been seen by dash and
/// locomotion this tick, so drop them.
fn clear_input_edges(mut input: ResMut<PlayerInput>) {
    input.jump_pressed = false;
    input.dash_pressed = false;
}

fn sync_facing_sprite(mut q: Query<(&Facing, &mut Sprite), With<Player>>) {
    for (facing, mut sprite) in &mut q {
        sprite.flip_x = facing.0 < 0.0;
    }
}
