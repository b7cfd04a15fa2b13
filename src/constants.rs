//! This module contains all the constants used in the game.

use std::time::Duration;

/// One nominal frame at 60 Hz. Movement speeds are expressed per frame of this length.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The most time a single unthrottled frame may cover, so a stall cannot teleport the player.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Pixels per meter of field.
pub const SCALE: f32 = 5.0;

/// The zoom applied to the window on top of the logical canvas size.
pub const WINDOW_SCALE: f32 = 1.0;

/// Real-world field measurements, in meters.
pub mod field {
    /// Touchline to touchline.
    pub const WIDTH: f32 = 70.0;
    /// Try line to try line.
    pub const LENGTH: f32 = 100.0;
    /// Depth of each in-goal (dead ball) area.
    pub const DEAD_BALL: f32 = 22.0;
    /// Grass drawn around the field on every side.
    pub const MARGIN: f32 = 10.0;
    /// Distance of the 22 meter lines from each try line.
    pub const TWENTY_TWO: f32 = 22.0;
}

/// Player marker settings.
pub mod player {
    use super::SCALE;

    /// Radius of the player marker, in pixels.
    pub const RADIUS: f32 = 8.0;
    /// The player spawns this many pixels below the halfway line (5 meters).
    pub const DISTANCE_BELOW_HALFWAY: f32 = 5.0 * SCALE;
    /// Walking speed, in pixels per tick.
    pub const MOVEMENT_SPEED: f32 = 0.6;
    /// Sprinting speed, in pixels per tick.
    pub const SPRINT_SPEED: f32 = 1.2;
}

/// Gamepad mapping and filtering, using the standard controller layout.
pub mod gamepad {
    /// Number of device slots polled each tick.
    pub const MAX_GAMEPADS: usize = 4;
    /// Analog values with a smaller magnitude are treated as zero.
    pub const DEAD_ZONE: f32 = 0.1;
    pub const ANALOG_LEFT_X: usize = 0;
    pub const ANALOG_LEFT_Y: usize = 1;
    pub const BUTTON_RT: usize = 7;
    /// Analog trigger travel past which the trigger counts as pressed.
    pub const TRIGGER_THRESHOLD: f32 = 0.5;
}

/// The logical canvas width in pixels for the default field.
pub const CANVAS_WIDTH: u32 = ((field::WIDTH + 2.0 * field::MARGIN) * SCALE) as u32;
/// The logical canvas height in pixels for the default field.
pub const CANVAS_HEIGHT: u32 = ((field::LENGTH + 2.0 * field::DEAD_BALL + 2.0 * field::MARGIN) * SCALE) as u32;
