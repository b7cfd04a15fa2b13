//! Field configuration: measurements, speeds and input filtering, fixed before the game starts.

use bevy_ecs::resource::Resource;
use glam::{UVec2, Vec2};

use crate::constants::{field, gamepad, player, SCALE};
use crate::error::ConfigError;

/// Real-world field measurements, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMeasurements {
    pub width: f32,
    pub length: f32,
    pub dead_ball: f32,
    pub margin: f32,
}

impl Default for FieldMeasurements {
    fn default() -> Self {
        Self {
            width: field::WIDTH,
            length: field::LENGTH,
            dead_ball: field::DEAD_BALL,
            margin: field::MARGIN,
        }
    }
}

/// Immutable configuration shared by movement, input filtering and rendering.
///
/// The canvas size is never stored; it is always derived from the measurements
/// and the scale, so the two cannot disagree.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub measurements: FieldMeasurements,
    /// Pixels per meter.
    pub scale: f32,
    /// Walking speed, in pixels per tick.
    pub movement_speed: f32,
    /// Sprinting speed, in pixels per tick.
    pub sprint_speed: f32,
    pub dead_zone: f32,
    /// Radius of the player marker, in pixels.
    pub radius: f32,
    /// How far below the halfway line the player spawns, in pixels.
    pub spawn_offset: f32,
}

impl FieldMeasurements {
    fn named(&self) -> [(&'static str, f32); 4] {
        [
            ("width", self.width),
            ("length", self.length),
            ("dead_ball", self.dead_ball),
            ("margin", self.margin),
        ]
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            measurements: FieldMeasurements::default(),
            scale: SCALE,
            movement_speed: player::MOVEMENT_SPEED,
            sprint_speed: player::SPRINT_SPEED,
            dead_zone: gamepad::DEAD_ZONE,
            radius: player::RADIUS,
            spawn_offset: player::DISTANCE_BELOW_HALFWAY,
        }
    }
}

impl FieldConfig {
    /// Checks the configuration, returning it unchanged when usable.
    ///
    /// Every dimension and speed must be finite and positive.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !is_positive(self.scale) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        for (name, value) in self.measurements.named() {
            if !is_positive(value) {
                return Err(ConfigError::InvalidMeasurement { name, value });
            }
        }
        if !is_positive(self.movement_speed) {
            return Err(ConfigError::InvalidSpeed {
                name: "movement_speed",
                value: self.movement_speed,
            });
        }
        if !is_positive(self.sprint_speed) {
            return Err(ConfigError::InvalidSpeed {
                name: "sprint_speed",
                value: self.sprint_speed,
            });
        }
        if !(0.0..1.0).contains(&self.dead_zone) {
            return Err(ConfigError::InvalidDeadZone(self.dead_zone));
        }
        if !is_positive(self.radius) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }

        let size = self.canvas_size();
        if !size.is_finite() || self.radius * 2.0 > size.x || self.radius * 2.0 > size.y {
            return Err(ConfigError::RadiusTooLarge {
                radius: self.radius,
                width: size.x,
                height: size.y,
            });
        }

        Ok(self)
    }

    pub fn canvas_width(&self) -> f32 {
        (self.measurements.width + 2.0 * self.measurements.margin) * self.scale
    }

    pub fn canvas_height(&self) -> f32 {
        (self.measurements.length + 2.0 * self.measurements.dead_ball + 2.0 * self.measurements.margin) * self.scale
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width(), self.canvas_height())
    }

    /// The canvas size rounded to whole pixels, as the window and renderer need it.
    pub fn canvas_pixels(&self) -> UVec2 {
        self.canvas_size().round().as_uvec2()
    }

    /// Converts meters to pixels.
    pub fn meters(&self, meters: f32) -> f32 {
        meters * self.scale
    }

    /// The smallest and largest valid player centers.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let min = Vec2::splat(self.radius);
        let max = self.canvas_size() - Vec2::splat(self.radius);
        (min, max)
    }

    /// Clamps a position so the whole marker stays on the canvas.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        let (min, max) = self.bounds();
        position.clamp(min, max)
    }

    pub fn halfway_y(&self) -> f32 {
        self.canvas_height() / 2.0
    }

    /// Where the player starts: centered horizontally, just below the halfway line.
    pub fn spawn_position(&self) -> Vec2 {
        self.clamp(Vec2::new(self.canvas_width() / 2.0, self.halfway_y() + self.spawn_offset))
    }
}
