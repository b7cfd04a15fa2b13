//! Centralized error types for the movement demo.
//!
//! Nothing in steady-state play is an error: a missing gamepad or an unknown key
//! is ordinary input. What remains is startup (configuration, render target)
//! and the occasional failed draw call.

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs. It is also
/// an ECS event, so systems can report non-fatal failures without aborting a tick.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("No render target available")]
    NoRenderTarget,

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Rejected field configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Scale must be positive and finite, got {0}")]
    InvalidScale(f32),

    #[error("Field {name} must be positive and finite, got {value}")]
    InvalidMeasurement { name: &'static str, value: f32 },

    #[error("Radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("{name} must be positive, got {value}")]
    InvalidSpeed { name: &'static str, value: f32 },

    #[error("Dead zone must be within [0, 1), got {0}")]
    InvalidDeadZone(f32),

    #[error("Radius {radius} does not fit a {width}x{height} canvas")]
    RadiusTooLarge { radius: f32, width: f32, height: f32 },
}

/// Errors raised while drawing a frame.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    DrawFailed(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
