use bevy_ecs::{
    component::Component,
    event::EventWriter,
    query::With,
    system::{Query, Res},
};
use glam::Vec2;

use crate::config::FieldConfig;
use crate::error::GameError;
use crate::systems::components::{DeltaTime, PlayerControlled};
use crate::systems::gamepad::{apply_dead_zone, GamepadInput, GamepadSample};
use crate::systems::input::MovementState;

/// The center of an entity, in canvas pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// The motion applied on the most recent tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// Unit-capped direction of travel, zero when idle.
    pub direction: Vec2,
    /// The speed setting in effect, in pixels per tick.
    pub speed: f32,
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
}

/// Whether either input source asks for sprinting.
pub fn is_sprinting(movement: &MovementState, gamepad: Option<&GamepadSample>) -> bool {
    movement.sprint() || gamepad.is_some_and(|sample| sample.sprint_pressed)
}

/// Combines gamepad axes and keyboard flags into one direction.
///
/// Both sources are summed first and the sum is normalized only when it has two
/// nonzero components, so a diagonal is never faster than a straight line whichever
/// devices produced it. Single-axis input is left unnormalized.
pub fn direction(movement: &MovementState, gamepad: Option<&GamepadSample>, dead_zone: f32) -> Vec2 {
    let analog = gamepad.map_or(Vec2::ZERO, |sample| {
        Vec2::new(
            apply_dead_zone(sample.axes.x, dead_zone),
            apply_dead_zone(sample.axes.y, dead_zone),
        )
    });

    let combined = analog + movement.axes();
    if combined.x != 0.0 && combined.y != 0.0 {
        combined.normalize()
    } else {
        combined
    }
}

/// Computes the next position from the previous one and this tick's input.
///
/// `ticks` is how many nominal 60 Hz frames the step covers. The result is clamped
/// so the marker stays inside the canvas; nothing carries over between ticks.
pub fn resolve(
    prev: Vec2,
    movement: &MovementState,
    gamepad: Option<&GamepadSample>,
    ticks: f32,
    config: &FieldConfig,
) -> Resolved {
    let speed = if is_sprinting(movement, gamepad) {
        config.sprint_speed
    } else {
        config.movement_speed
    };

    let direction = direction(movement, gamepad, config.dead_zone);
    let position = config.clamp(prev + direction * speed * ticks);

    Resolved {
        position,
        direction,
        speed,
    }
}

pub fn player_movement_system(
    delta_time: Res<DeltaTime>,
    config: Res<FieldConfig>,
    movement: Res<MovementState>,
    gamepad: Res<GamepadInput>,
    mut players: Query<(&mut Position, &mut Velocity), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let (mut position, mut velocity) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player movement: {e}"
            )));
            return;
        }
    };

    let resolved = resolve(position.0, &movement, gamepad.0.as_ref(), delta_time.ticks, &config);

    if position.0 != resolved.position {
        position.0 = resolved.position;
    }

    let next = Velocity {
        direction: resolved.direction,
        speed: resolved.speed,
    };
    if *velocity != next {
        *velocity = next;
    }
}
