use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};

use crate::constants::LOOP_TIME;
use crate::systems::movement::{Position, Velocity};

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
    pub paused: bool,
}

/// Time covered by the current tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DeltaTime {
    /// Wall-clock seconds since the previous tick.
    pub seconds: f32,
    /// Nominal 60 Hz frames the tick stands for; movement speeds are scaled by this.
    pub ticks: f32,
}

impl Default for DeltaTime {
    fn default() -> Self {
        Self {
            seconds: 0.0,
            ticks: 1.0,
        }
    }
}

impl DeltaTime {
    /// A single nominal frame.
    pub fn fixed() -> Self {
        Self {
            seconds: LOOP_TIME.as_secs_f32(),
            ticks: 1.0,
        }
    }
}
