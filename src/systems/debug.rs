//! Debug overlay: frame rate, player position and speed, and per-system timings.

use bevy_ecs::{
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use smallvec::SmallVec;

use crate::systems::components::PlayerControlled;
use crate::systems::movement::{Position, Velocity};
use crate::systems::profiling::{SystemTimings, Timing};

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DebugState {
    pub enabled: bool,
    /// Ticks counted over the last full second, as reported by the scheduler.
    pub fps: u32,
}

impl DebugState {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

/// Text lines the renderer draws on top of the field; empty while the overlay is hidden.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DebugOverlay {
    pub lines: SmallVec<[String; 16]>,
}

/// The summary lines shown at the top of the overlay.
pub fn summary_lines(fps: u32, position: &Position, velocity: &Velocity) -> [String; 3] {
    [
        format!("FPS: {fps}"),
        format!("Position: ({}, {})", position.0.x.round(), position.0.y.round()),
        format!("Speed: {}", velocity.speed),
    ]
}

pub fn debug_overlay_system(
    debug: Res<DebugState>,
    timings: Res<SystemTimings>,
    timing: Res<Timing>,
    players: Query<(&Position, &Velocity), With<PlayerControlled>>,
    mut overlay: ResMut<DebugOverlay>,
) {
    if !debug.enabled {
        if !overlay.lines.is_empty() {
            overlay.lines.clear();
        }
        return;
    }

    let mut lines = SmallVec::new();
    if let Ok((position, velocity)) = players.single() {
        lines.extend(summary_lines(debug.fps, position, velocity));
    }
    lines.push(String::new());
    lines.extend(timings.format_timing_display(timing.current_tick()));

    overlay.lines = lines;
}
