//! Static field geometry, computed once from the configuration and drawn every frame.
//!
//! Line positions are derived from the measurements and the scale rather than fixed
//! pixel rows, so the try lines sit a full dead-ball depth inside the margin.

use bevy_ecs::resource::Resource;
use glam::Vec2;
use smallvec::SmallVec;

use crate::config::FieldConfig;
use crate::constants::field;

/// An axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// A line running across the playing area, touchline to touchline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLine {
    pub from: Vec2,
    pub to: Vec2,
}

/// A distance marking, drawn centered on `center` in the side margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLabel {
    pub text: &'static str,
    pub center: Vec2,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FieldLayout {
    /// The whole canvas, filled with the outer grass.
    pub canvas: Bounds,
    /// The field inside the margins, including both in-goal areas.
    pub playing_area: Bounds,
    pub lines: SmallVec<[FieldLine; 5]>,
    pub labels: SmallVec<[FieldLabel; 6]>,
}

impl FieldLayout {
    pub fn new(config: &FieldConfig) -> Self {
        let size = config.canvas_size();
        let margin = config.meters(config.measurements.margin);

        let canvas = Bounds {
            min: Vec2::ZERO,
            max: size,
        };
        let playing_area = Bounds {
            min: Vec2::splat(margin),
            max: size - Vec2::splat(margin),
        };

        let top_try = playing_area.min.y + config.meters(config.measurements.dead_ball);
        let bottom_try = playing_area.max.y - config.meters(config.measurements.dead_ball);
        let top_22 = top_try + config.meters(field::TWENTY_TWO);
        let bottom_22 = bottom_try - config.meters(field::TWENTY_TWO);
        let halfway = config.halfway_y();

        let line = |y: f32| FieldLine {
            from: Vec2::new(playing_area.min.x, y),
            to: Vec2::new(playing_area.max.x, y),
        };

        let lines = SmallVec::from_iter([
            line(top_try),
            line(top_22),
            line(halfway),
            line(bottom_22),
            line(bottom_try),
        ]);

        let left = margin / 2.0;
        let right = size.x - margin / 2.0;
        let label = |text, x, y| FieldLabel {
            text,
            center: Vec2::new(x, y),
        };

        let labels = SmallVec::from_iter([
            label("50", left, halfway),
            label("50", right, halfway),
            label("22", left, top_22),
            label("22", right, top_22),
            label("22", left, bottom_22),
            label("22", right, bottom_22),
        ]);

        Self {
            canvas,
            playing_area,
            lines,
            labels,
        }
    }
}
