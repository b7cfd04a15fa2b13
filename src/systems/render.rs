use bevy_ecs::{
    event::EventWriter,
    query::With,
    system::{NonSendMut, Query, Res},
};
use glam::{UVec2, Vec2};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::config::FieldConfig;
use crate::error::{GameError, RenderError};
use crate::field::{Bounds, FieldLayout};
use crate::systems::components::PlayerControlled;
use crate::systems::debug::DebugOverlay;
use crate::systems::movement::Position;

pub const OUTER_GRASS: Color = Color::RGB(0x00, 0x99, 0x00);
pub const GRASS: Color = Color::RGB(0x00, 0xBF, 0x00);
pub const LINES: Color = Color::RGB(0xFF, 0xFF, 0xFF);
pub const PLAYER_FILL: Color = Color::RGB(0xFF, 0xFF, 0xFF);
pub const PLAYER_STROKE: Color = Color::RGB(0x00, 0x00, 0x00);
pub const OVERLAY_TEXT: Color = Color::RGB(0xFF, 0xFF, 0x00);

pub const LINE_WIDTH: u8 = 2;
/// Glyph size of the SDL2_gfx built-in font.
const GLYPH_SIZE: i32 = 8;
const OVERLAY_LINE_HEIGHT: i32 = 10;

/// Everything drawn for one tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub layout: &'a FieldLayout,
    pub player: Vec2,
    pub radius: f32,
    pub overlay: &'a [String],
}

/// A drawing surface for the field and the player marker.
pub trait FieldRenderer {
    /// Size of the surface in pixels, `None` when there is nothing to draw on.
    fn surface_size(&self) -> Option<UVec2>;

    /// Draws one complete frame.
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;
}

/// A non-send resource holding the renderer, since SDL canvases must stay on the main thread.
pub struct RendererResource(pub Box<dyn FieldRenderer>);

pub fn render_system(
    mut renderer: NonSendMut<RendererResource>,
    config: Res<FieldConfig>,
    layout: Res<FieldLayout>,
    overlay: Res<DebugOverlay>,
    players: Query<&Position, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let position = match players.single() {
        Ok(position) => position,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for rendering: {e}"
            )));
            return;
        }
    };

    let frame = Frame {
        layout: &layout,
        player: position.0,
        radius: config.radius,
        overlay: &overlay.lines,
    };

    if let Err(e) = renderer.0.draw(&frame) {
        errors.write(e.into());
    }
}

/// Draws onto an SDL2 window canvas.
pub struct CanvasRenderer {
    canvas: Canvas<Window>,
}

impl CanvasRenderer {
    pub fn new(canvas: Canvas<Window>) -> Self {
        Self { canvas }
    }

    fn rect(bounds: &Bounds) -> Rect {
        let size = bounds.size().round().as_uvec2();
        Rect::new(bounds.min.x.round() as i32, bounds.min.y.round() as i32, size.x, size.y)
    }

    fn centered_text(&self, text: &str, center: Vec2, color: Color) -> Result<(), String> {
        let width = text.chars().count() as i32 * GLYPH_SIZE;
        let x = center.x.round() as i32 - width / 2;
        let y = center.y.round() as i32 - GLYPH_SIZE / 2;
        self.canvas.string(x as i16, y as i16, text, color)
    }

    fn draw_field(&mut self, layout: &FieldLayout) -> Result<(), String> {
        self.canvas.set_draw_color(OUTER_GRASS);
        self.canvas.clear();

        let playing_area = Self::rect(&layout.playing_area);
        self.canvas.set_draw_color(GRASS);
        self.canvas.fill_rect(playing_area)?;

        // A 2px border, drawn as two nested outlines
        self.canvas.set_draw_color(LINES);
        self.canvas.draw_rect(playing_area)?;
        let inner = Rect::new(
            playing_area.x() + 1,
            playing_area.y() + 1,
            playing_area.width().saturating_sub(2),
            playing_area.height().saturating_sub(2),
        );
        self.canvas.draw_rect(inner)?;

        for line in &layout.lines {
            self.canvas.thick_line(
                line.from.x.round() as i16,
                line.from.y.round() as i16,
                line.to.x.round() as i16,
                line.to.y.round() as i16,
                LINE_WIDTH,
                LINES,
            )?;
        }

        for label in &layout.labels {
            self.centered_text(label.text, label.center, LINES)?;
        }

        Ok(())
    }

    fn draw_player(&self, center: Vec2, radius: f32) -> Result<(), String> {
        let (x, y, r) = (center.x.round() as i16, center.y.round() as i16, radius.round() as i16);
        self.canvas.filled_circle(x, y, r, PLAYER_FILL)?;
        self.canvas.aa_circle(x, y, r, PLAYER_STROKE)
    }

    fn draw_overlay(&self, lines: &[String]) -> Result<(), String> {
        for (index, line) in lines.iter().enumerate() {
            let y = 4 + index as i32 * OVERLAY_LINE_HEIGHT;
            self.canvas.string(4, y as i16, line, OVERLAY_TEXT)?;
        }
        Ok(())
    }
}

impl FieldRenderer for CanvasRenderer {
    fn surface_size(&self) -> Option<UVec2> {
        let (width, height) = self.canvas.output_size().ok()?;
        (width > 0 && height > 0).then_some(UVec2::new(width, height))
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.draw_field(frame.layout).map_err(RenderError::DrawFailed)?;
        self.draw_player(frame.player, frame.radius)
            .map_err(RenderError::DrawFailed)?;
        self.draw_overlay(frame.overlay).map_err(RenderError::DrawFailed)?;

        self.canvas.present();
        Ok(())
    }
}
