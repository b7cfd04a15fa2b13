//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the systems run each tick, along with the components
//! and resources they share.

pub mod components;
pub mod control;
pub mod debug;
pub mod gamepad;
pub mod input;
pub mod movement;
pub mod profiling;
pub mod render;

pub use self::components::*;
pub use self::debug::{DebugOverlay, DebugState};
pub use self::gamepad::{GamepadDevice, GamepadInput, GamepadReader, GamepadSample};
pub use self::input::{Bindings, InputEvent, InputQueue, MovementKey, MovementState, SimpleKeyEvent};
pub use self::movement::{Position, Velocity};
pub use self::profiling::{profile, SystemId, SystemTimings, Timing};
pub use self::render::{FieldRenderer, Frame, RendererResource};
