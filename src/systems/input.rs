use std::collections::{HashMap, VecDeque};

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Res, ResMut},
};
use bitflags::bitflags;
use glam::Vec2;
use sdl2::keyboard::Keycode;
use tracing::{debug, trace};

use crate::events::{GameCommand, GameEvent};

bitflags! {
    /// The keyboard intents that can be held at once.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MovementKeys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const SPRINT = 1 << 4;
    }
}

/// A key that contributes to movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKey {
    Up,
    Down,
    Left,
    Right,
    Sprint,
}

impl MovementKey {
    /// Resolves a key identifier such as `"w"`, `"D"` or `"Shift"`, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "w" => Some(MovementKey::Up),
            "s" => Some(MovementKey::Down),
            "a" => Some(MovementKey::Left),
            "d" => Some(MovementKey::Right),
            "shift" => Some(MovementKey::Sprint),
            _ => None,
        }
    }

    pub fn flag(self) -> MovementKeys {
        match self {
            MovementKey::Up => MovementKeys::UP,
            MovementKey::Down => MovementKeys::DOWN,
            MovementKey::Left => MovementKeys::LEFT,
            MovementKey::Right => MovementKeys::RIGHT,
            MovementKey::Sprint => MovementKeys::SPRINT,
        }
    }
}

/// Keyboard-derived movement intent.
///
/// Flags are only ever set by a key-down and cleared by the matching key-up, so
/// repeated key-down events while a key is held leave the state unchanged.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementState {
    held: MovementKeys,
}

impl MovementState {
    pub fn on_key_down(&mut self, key: MovementKey) {
        self.held.insert(key.flag());
    }

    pub fn on_key_up(&mut self, key: MovementKey) {
        self.held.remove(key.flag());
    }

    /// Applies a key-down by identifier. Returns whether the key was recognized,
    /// in which case the host should not act on it further.
    pub fn press(&mut self, name: &str) -> bool {
        match MovementKey::from_name(name) {
            Some(key) => {
                self.on_key_down(key);
                true
            }
            None => false,
        }
    }

    /// Applies a key-up by identifier. Returns whether the key was recognized.
    pub fn release(&mut self, name: &str) -> bool {
        match MovementKey::from_name(name) {
            Some(key) => {
                self.on_key_up(key);
                true
            }
            None => false,
        }
    }

    pub fn release_all(&mut self) {
        self.held = MovementKeys::empty();
    }

    pub fn is_held(&self, key: MovementKey) -> bool {
        self.held.contains(key.flag())
    }

    pub fn held(&self) -> MovementKeys {
        self.held
    }

    pub fn up(&self) -> bool {
        self.is_held(MovementKey::Up)
    }

    pub fn down(&self) -> bool {
        self.is_held(MovementKey::Down)
    }

    pub fn left(&self) -> bool {
        self.is_held(MovementKey::Left)
    }

    pub fn right(&self) -> bool {
        self.is_held(MovementKey::Right)
    }

    pub fn sprint(&self) -> bool {
        self.is_held(MovementKey::Sprint)
    }

    /// The keyboard's contribution to displacement, one unit per held direction.
    /// Screen coordinates: up is negative y.
    pub fn axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.up() {
            axes.y -= 1.0;
        }
        if self.down() {
            axes.y += 1.0;
        }
        if self.left() {
            axes.x -= 1.0;
        }
        if self.right() {
            axes.x += 1.0;
        }
        axes
    }
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Movement(MovementKey),
    Command(GameCommand),
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, Binding>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert(Keycode::W, Binding::Movement(MovementKey::Up));
        key_bindings.insert(Keycode::S, Binding::Movement(MovementKey::Down));
        key_bindings.insert(Keycode::A, Binding::Movement(MovementKey::Left));
        key_bindings.insert(Keycode::D, Binding::Movement(MovementKey::Right));
        key_bindings.insert(Keycode::LShift, Binding::Movement(MovementKey::Sprint));
        key_bindings.insert(Keycode::RShift, Binding::Movement(MovementKey::Sprint));

        // Application actions
        key_bindings.insert(Keycode::Backquote, Binding::Command(GameCommand::ToggleDebug));
        key_bindings.insert(Keycode::P, Binding::Command(GameCommand::TogglePause));
        key_bindings.insert(Keycode::Escape, Binding::Command(GameCommand::Exit));
        key_bindings.insert(Keycode::Q, Binding::Command(GameCommand::Exit));

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn get(&self, key: Keycode) -> Option<Binding> {
        self.key_bindings.get(&key).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleKeyEvent {
    KeyDown(Keycode),
    KeyUp(Keycode),
}

/// Host events delivered between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(SimpleKeyEvent),
    /// The window lost keyboard focus; key-ups may never arrive.
    FocusLost,
    Quit,
}

/// Events collected by the host since the last tick, drained at the start of the next one.
#[derive(Resource, Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.pending.drain(..)
    }
}

/// Applies key events to the movement state, returning the commands they trigger.
///
/// Movement keys only touch `state`. Command keys fire on key-down; their key-ups are ignored.
pub fn process_simple_key_events(bindings: &Bindings, state: &mut MovementState, events: &[SimpleKeyEvent]) -> Vec<GameEvent> {
    let mut emitted = Vec::new();

    for event in events {
        match *event {
            SimpleKeyEvent::KeyDown(key) => match bindings.get(key) {
                Some(Binding::Movement(movement)) => state.on_key_down(movement),
                Some(Binding::Command(command)) => emitted.push(GameEvent::Command(command)),
                None => {}
            },
            SimpleKeyEvent::KeyUp(key) => {
                if let Some(Binding::Movement(movement)) = bindings.get(key) {
                    state.on_key_up(movement);
                }
            }
        }
    }

    emitted
}

pub fn input_system(
    mut queue: ResMut<InputQueue>,
    bindings: Res<Bindings>,
    mut movement: ResMut<MovementState>,
    mut writer: EventWriter<GameEvent>,
) {
    if queue.is_empty() {
        return;
    }

    let mut keys = Vec::with_capacity(queue.len());
    for event in queue.drain() {
        match event {
            InputEvent::Key(key) => keys.push(key),
            InputEvent::FocusLost => {
                // Flush what came before so a key-down queued ahead of the focus loss is also cleared
                for event in process_simple_key_events(&bindings, &mut movement, &keys) {
                    writer.write(event);
                }
                keys.clear();
                debug!("Focus lost, releasing held movement keys");
                movement.release_all();
            }
            InputEvent::Quit => {
                writer.write(GameEvent::Command(GameCommand::Exit));
            }
        }
    }

    for event in process_simple_key_events(&bindings, &mut movement, &keys) {
        trace!(?event, "Key command");
        writer.write(event);
    }
}
