use egui::{Color32, FontId, Pos2, Rect, Vec2};

use super::common::{GLYPH_WIDTH_FACTOR, HIT_SLOP, LINE_HEIGHT_FACTOR};

/// Content placed by the text tool before the user edits it.
pub const PLACEHOLDER_TEXT: &str = "Text";

/// An editable text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub position: Pos2,
    pub content: String,
    /// Text color, taken from the fill color of the active style.
    pub color: Color32,
    pub font: FontId,
}

impl TextItem {
    pub fn new(position: Pos2, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            color: Color32::BLACK,
            font: FontId::proportional(16.0),
        }
    }

    pub fn placeholder(position: Pos2) -> Self {
        Self::new(position, PLACEHOLDER_TEXT)
    }

    /// Layout-free estimate of the area covered by the text.
    ///
    /// The canvas measures the real galley when painting; this is only used for picking.
    pub fn estimated_rect(&self) -> Rect {
        let size = self.font.size;
        let lines = self.content.split('\n');
        let (count, longest) = lines.fold((0usize, 0usize), |(count, longest), line| {
            (count + 1, longest.max(line.chars().count()))
        });
        let width = (longest.max(1) as f32) * size * GLYPH_WIDTH_FACTOR;
        let height = (count.max(1) as f32) * size * LINE_HEIGHT_FACTOR;
        Rect::from_min_size(self.position, Vec2::new(width, height))
    }

    pub(crate) fn contains(&self, point: Pos2) -> bool {
        self.estimated_rect().expand(HIT_SLOP).contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimated_rect_grows_with_content() {
        let short = TextItem::new(Pos2::ZERO, "ab");
        let long = TextItem::new(Pos2::ZERO, "abcdef");
        let two_lines = TextItem::new(Pos2::ZERO, "ab\ncd");
        assert!(long.estimated_rect().width() > short.estimated_rect().width());
        assert!(two_lines.estimated_rect().height() > short.estimated_rect().height());
    }

    #[test]
    fn empty_text_is_still_pickable() {
        let text = TextItem::new(Pos2::new(10.0, 10.0), "");
        assert!(text.contains(Pos2::new(12.0, 12.0)));
    }
}
