use egui::{Pos2, Rect};

/// Padding added around thin shapes so they stay grabbable.
pub const HIT_SLOP: f32 = 3.0;

/// Approximate glyph advance relative to the font size, used for text hit boxes.
pub(crate) const GLYPH_WIDTH_FACTOR: f32 = 0.6;
pub(crate) const LINE_HEIGHT_FACTOR: f32 = 1.25;

/// Builds the rectangle spanned by two corners, whichever way the user dragged.
///
/// The result always has `min <= max` on both axes.
pub fn normalized_rect(anchor: Pos2, current: Pos2) -> Rect {
    Rect::from_min_max(
        Pos2::new(anchor.x.min(current.x), anchor.y.min(current.y)),
        Pos2::new(anchor.x.max(current.x), anchor.y.max(current.y)),
    )
}

pub(crate) fn is_finite_pos(pos: Pos2) -> bool {
    pos.x.is_finite() && pos.y.is_finite()
}

pub(crate) fn is_finite_rect(rect: &Rect) -> bool {
    is_finite_pos(rect.min) && is_finite_pos(rect.max)
}

/// Point-in-ellipse test for the ellipse inscribed in `bounds`, grown by `slop`.
pub(crate) fn ellipse_contains(bounds: Rect, slop: f32, point: Pos2) -> bool {
    let bounds = bounds.expand(slop);
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return bounds.contains(point);
    }
    let center = bounds.center();
    let dx = (point.x - center.x) / rx;
    let dy = (point.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_direction_does_not_matter() {
        let down_right = normalized_rect(Pos2::new(10.0, 10.0), Pos2::new(50.0, 50.0));
        let up_left = normalized_rect(Pos2::new(50.0, 50.0), Pos2::new(10.0, 10.0));
        assert_eq!(down_right, up_left);
        assert_eq!(up_left.min, Pos2::new(10.0, 10.0));
        assert_eq!(up_left.width(), 40.0);
        assert_eq!(up_left.height(), 40.0);
    }

    #[test]
    fn mixed_axes_are_normalized() {
        let rect = normalized_rect(Pos2::new(30.0, 5.0), Pos2::new(10.0, 25.0));
        assert_eq!(rect.min, Pos2::new(10.0, 5.0));
        assert_eq!(rect.max, Pos2::new(30.0, 25.0));
    }

    #[test]
    fn ellipse_excludes_corners() {
        let bounds = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0));
        assert!(ellipse_contains(bounds, 0.0, Pos2::new(50.0, 25.0)));
        assert!(!ellipse_contains(bounds, 0.0, Pos2::new(2.0, 2.0)));
    }
}
