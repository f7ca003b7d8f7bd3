use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use super::common::{self, HIT_SLOP};

/// Geometry and style shared by rectangles and ellipses.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeItem {
    /// Always normalized: `min <= max` on both axes.
    pub bounds: Rect,
    /// `Stroke::NONE` means no border.
    pub border: Stroke,
    /// `Color32::TRANSPARENT` means no fill.
    pub fill: Color32,
}

impl ShapeItem {
    /// A zero-sized shape anchored at `pos`, as created on pointer press.
    pub fn at(pos: Pos2) -> Self {
        Self {
            bounds: Rect::from_min_max(pos, pos),
            border: Stroke::NONE,
            fill: Color32::TRANSPARENT,
        }
    }

    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds: common::normalized_rect(bounds.min, bounds.max),
            ..Self::at(bounds.min)
        }
    }

    pub fn position(&self) -> Pos2 {
        self.bounds.min
    }

    pub fn set_position(&mut self, pos: Pos2) {
        let delta: Vec2 = pos - self.bounds.min;
        self.bounds = self.bounds.translate(delta);
    }

    pub fn set_bounds(&mut self, anchor: Pos2, current: Pos2) {
        self.bounds = common::normalized_rect(anchor, current);
    }

    fn slop(&self) -> f32 {
        self.border.width / 2.0 + HIT_SLOP
    }

    pub(crate) fn rect_contains(&self, point: Pos2) -> bool {
        self.bounds.expand(self.slop()).contains(point)
    }

    pub(crate) fn ellipse_contains(&self, point: Pos2) -> bool {
        common::ellipse_contains(self.bounds, self.slop(), point)
    }
}
