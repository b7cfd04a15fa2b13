//! Gamepad polling: device slots, the fixed axis/button mapping and dead-zone filtering.

use bevy_ecs::{
    resource::Resource,
    system::{NonSend, ResMut},
};
use glam::Vec2;
use sdl2::controller::{Axis, Button, GameController};
use tracing::{debug, info, warn};

use crate::constants::gamepad::{ANALOG_LEFT_X, ANALOG_LEFT_Y, BUTTON_RT, MAX_GAMEPADS, TRIGGER_THRESHOLD};

/// A connected controller, addressed with the standard gamepad layout
/// (axis 0/1 = left stick, button 7 = right trigger).
pub trait GamepadDevice {
    /// Identifier carried by this device's disconnect notification.
    fn instance_id(&self) -> u32;

    fn name(&self) -> String;

    fn is_connected(&self) -> bool {
        true
    }

    /// Analog axis value in `[-1, 1]`; unknown axes read as 0.
    fn axis(&self, index: usize) -> f32;

    /// Unknown buttons read as released.
    fn button_pressed(&self, index: usize) -> bool;
}

/// Filtered input from one gamepad for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadSample {
    pub axes: Vec2,
    pub sprint_pressed: bool,
}

/// The sample polled for the current tick, `None` when no gamepad contributes.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadInput(pub Option<GamepadSample>);

/// Zeroes analog values whose magnitude is below `threshold`, leaving the rest untouched.
pub fn apply_dead_zone(value: f32, threshold: f32) -> f32 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

/// Up to [`MAX_GAMEPADS`] device slots, polled in slot order.
pub struct GamepadReader {
    slots: [Option<Box<dyn GamepadDevice>>; MAX_GAMEPADS],
    dead_zone: f32,
}

impl GamepadReader {
    pub fn new(dead_zone: f32) -> Self {
        Self {
            slots: Default::default(),
            dead_zone,
        }
    }

    /// Places a device in the lowest free slot and returns that slot,
    /// or `None` (dropping the device) when every slot is taken.
    pub fn connect(&mut self, device: Box<dyn GamepadDevice>) -> Option<usize> {
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            warn!(name = %device.name(), "All gamepad slots are taken, ignoring device");
            return None;
        };

        info!(slot, name = %device.name(), id = device.instance_id(), "Gamepad connected");
        self.slots[slot] = Some(device);
        Some(slot)
    }

    /// Releases the slot holding the device with `instance_id`, returning that slot.
    pub fn disconnect(&mut self, instance_id: u32) -> Option<usize> {
        let slot = self
            .slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|device| device.instance_id() == instance_id))?;

        if let Some(device) = self.slots[slot].take() {
            info!(slot, name = %device.name(), id = instance_id, "Gamepad disconnected");
        }
        Some(slot)
    }

    pub fn disconnect_all(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Some(device) = slot.take() {
                debug!(name = %device.name(), "Releasing gamepad");
            }
        }
    }

    pub fn connected_count(&self) -> usize {
        self.slots.iter().flatten().filter(|device| device.is_connected()).count()
    }

    /// Reads the first connected device, lowest slot first.
    pub fn poll(&self) -> Option<GamepadSample> {
        let device = self.slots.iter().flatten().find(|device| device.is_connected())?;

        Some(GamepadSample {
            axes: Vec2::new(
                apply_dead_zone(device.axis(ANALOG_LEFT_X), self.dead_zone),
                apply_dead_zone(device.axis(ANALOG_LEFT_Y), self.dead_zone),
            ),
            sprint_pressed: device.button_pressed(BUTTON_RT),
        })
    }
}

pub fn gamepad_system(reader: NonSend<GamepadReader>, mut input: ResMut<GamepadInput>) {
    let sample = reader.poll();
    // Avoid flagging the resource as changed every tick when nothing is connected
    if input.0 != sample {
        input.0 = sample;
    }
}

/// An SDL2 game controller exposed through the standard layout.
pub struct SdlGamepad {
    controller: GameController,
}

impl SdlGamepad {
    pub fn new(controller: GameController) -> Self {
        Self { controller }
    }

    fn normalized(&self, axis: Axis) -> f32 {
        (self.controller.axis(axis) as f32 / i16::MAX as f32).clamp(-1.0, 1.0)
    }
}

impl GamepadDevice for SdlGamepad {
    fn instance_id(&self) -> u32 {
        self.controller.instance_id()
    }

    fn name(&self) -> String {
        self.controller.name()
    }

    fn is_connected(&self) -> bool {
        self.controller.attached()
    }

    fn axis(&self, index: usize) -> f32 {
        match index {
            0 => self.normalized(Axis::LeftX),
            1 => self.normalized(Axis::LeftY),
            2 => self.normalized(Axis::RightX),
            3 => self.normalized(Axis::RightY),
            _ => 0.0,
        }
    }

    fn button_pressed(&self, index: usize) -> bool {
        let button = match index {
            0 => Button::A,
            1 => Button::B,
            2 => Button::X,
            3 => Button::Y,
            4 => Button::LeftShoulder,
            5 => Button::RightShoulder,
            // The triggers are analog axes in SDL
            6 => return self.normalized(Axis::TriggerLeft) > TRIGGER_THRESHOLD,
            7 => return self.normalized(Axis::TriggerRight) > TRIGGER_THRESHOLD,
            8 => Button::Back,
            9 => Button::Start,
            10 => Button::LeftStick,
            11 => Button::RightStick,
            12 => Button::DPadUp,
            13 => Button::DPadDown,
            14 => Button::DPadLeft,
            15 => Button::DPadRight,
            16 => Button::Guide,
            _ => return false,
        };
        self.controller.button(button)
    }
}
