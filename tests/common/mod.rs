#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use fieldrunner::config::FieldConfig;
use fieldrunner::error::RenderError;
use fieldrunner::game::Game;
use fieldrunner::systems::{FieldRenderer, Frame, GamepadDevice};
use glam::{UVec2, Vec2};

/// Live state of a [`FakeGamepad`], shared with the test that created it.
#[derive(Debug, Clone)]
pub struct PadState {
    pub axes: [f32; 4],
    pub buttons: [bool; 17],
    pub connected: bool,
}

impl Default for PadState {
    fn default() -> Self {
        Self {
            axes: [0.0; 4],
            buttons: [false; 17],
            connected: true,
        }
    }
}

/// A gamepad whose inputs are scripted by the test through a shared [`PadState`].
pub struct FakeGamepad {
    id: u32,
    state: Rc<RefCell<PadState>>,
}

impl FakeGamepad {
    pub fn new(id: u32) -> (Box<dyn GamepadDevice>, Rc<RefCell<PadState>>) {
        let state = Rc::new(RefCell::new(PadState::default()));
        let device = FakeGamepad {
            id,
            state: Rc::clone(&state),
        };
        (Box::new(device), state)
    }
}

impl GamepadDevice for FakeGamepad {
    fn instance_id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> String {
        format!("Fake Pad {}", self.id)
    }

    fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    fn axis(&self, index: usize) -> f32 {
        self.state.borrow().axes.get(index).copied().unwrap_or(0.0)
    }

    fn button_pressed(&self, index: usize) -> bool {
        self.state.borrow().buttons.get(index).copied().unwrap_or(false)
    }
}

/// What the game asked to draw for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub player: Vec2,
    pub radius: f32,
    pub lines: usize,
    pub overlay: Vec<String>,
}

pub type Frames = Rc<RefCell<Vec<RecordedFrame>>>;

/// A renderer that records frames instead of drawing them.
pub struct RecordingRenderer {
    surface: Option<UVec2>,
    failing: bool,
    frames: Frames,
}

impl RecordingRenderer {
    pub fn new() -> (Box<dyn FieldRenderer>, Frames) {
        Self::build(Some(UVec2::new(450, 820)), false)
    }

    /// A renderer with no surface, as when the window could not be created.
    pub fn without_surface() -> Box<dyn FieldRenderer> {
        Self::build(None, false).0
    }

    /// A renderer whose every draw call fails after recording the frame.
    pub fn failing() -> (Box<dyn FieldRenderer>, Frames) {
        Self::build(Some(UVec2::new(450, 820)), true)
    }

    fn build(surface: Option<UVec2>, failing: bool) -> (Box<dyn FieldRenderer>, Frames) {
        let frames = Frames::default();
        let renderer = RecordingRenderer {
            surface,
            failing,
            frames: Rc::clone(&frames),
        };
        (Box::new(renderer), frames)
    }
}

impl FieldRenderer for RecordingRenderer {
    fn surface_size(&self) -> Option<UVec2> {
        self.surface
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.frames.borrow_mut().push(RecordedFrame {
            player: frame.player,
            radius: frame.radius,
            lines: frame.layout.lines.len(),
            overlay: frame.overlay.to_vec(),
        });

        if self.failing {
            return Err(RenderError::DrawFailed("surface lost".to_string()));
        }
        Ok(())
    }
}

/// A game with the default configuration and a recording renderer.
pub fn test_game() -> (Game, Frames) {
    let (renderer, frames) = RecordingRenderer::new();
    let game = match Game::new(FieldConfig::default(), renderer) {
        Ok(game) => game,
        Err(e) => panic!("Failed to build test game: {e}"),
    };
    (game, frames)
}

pub fn assert_vec_close(actual: Vec2, expected: Vec2) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "Expected {expected:?}, got {actual:?}"
    );
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-4, "Expected {expected}, got {actual}");
}
