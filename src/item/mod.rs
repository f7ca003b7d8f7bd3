use egui::{Pos2, Rect, Stroke};

mod common;
mod image;
mod shape;
mod text;

pub use common::{HIT_SLOP, normalized_rect};
pub use image::{BACKGROUND_Z, ImageItem};
pub use shape::ShapeItem;
pub use text::{PLACEHOLDER_TEXT, TextItem};

use crate::config::Style;
use crate::error::{CommandResult, EditorError};

/// Stable handle of an item stored in the scene arena.
///
/// Handles are never reused within a scene, so a handle whose slot has been
/// released can always be told apart from a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant of [`Item`], used for logging and status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Rectangle,
    Ellipse,
    Text,
    Image,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

/// Every kind of element that can be placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Rectangle(ShapeItem),
    Ellipse(ShapeItem),
    Text(TextItem),
    Image(ImageItem),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Rectangle(_) => ItemKind::Rectangle,
            Item::Ellipse(_) => ItemKind::Ellipse,
            Item::Text(_) => ItemKind::Text,
            Item::Image(_) => ItemKind::Image,
        }
    }

    /// Images always paint behind shapes and text.
    pub fn is_background(&self) -> bool {
        matches!(self, Item::Image(image) if image.z_order() <= BACKGROUND_Z)
    }

    /// Top-left anchor used by move commands.
    pub fn position(&self) -> Pos2 {
        match self {
            Item::Rectangle(shape) | Item::Ellipse(shape) => shape.position(),
            Item::Text(text) => text.position,
            Item::Image(image) => image.position,
        }
    }

    pub fn set_position(&mut self, pos: Pos2) {
        match self {
            Item::Rectangle(shape) | Item::Ellipse(shape) => shape.set_position(pos),
            Item::Text(text) => text.position = pos,
            Item::Image(image) => image.position = pos,
        }
    }

    /// Area covered by the item. Text uses an estimate, see [`TextItem::estimated_rect`].
    pub fn bounds(&self) -> Rect {
        match self {
            Item::Rectangle(shape) | Item::Ellipse(shape) => shape.bounds,
            Item::Text(text) => text.estimated_rect(),
            Item::Image(image) => image.rect(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Item::Text(text) => Some(&text.content),
            _ => None,
        }
    }

    pub fn hit_test(&self, point: Pos2) -> bool {
        match self {
            Item::Rectangle(shape) => shape.rect_contains(point),
            Item::Ellipse(shape) => shape.ellipse_contains(point),
            Item::Text(text) => text.contains(point),
            Item::Image(image) => image.rect().contains(point),
        }
    }

    /// Copies the pen, brush and font of `style` onto the item.
    ///
    /// Text takes the fill color as its text color; images carry no style.
    pub fn apply_style(&mut self, style: &Style) {
        match self {
            Item::Rectangle(shape) | Item::Ellipse(shape) => {
                shape.border = Stroke::new(style.border_width, style.border_color);
                shape.fill = style.fill_color;
            }
            Item::Text(text) => {
                text.color = style.text_color();
                text.font = style.font.clone();
            }
            Item::Image(_) => {}
        }
    }

    /// Rejects geometry the canvas cannot paint.
    pub(crate) fn validate(&self, id: ItemId) -> CommandResult {
        let valid = match self {
            Item::Rectangle(shape) | Item::Ellipse(shape) => {
                common::is_finite_rect(&shape.bounds) && shape.border.width >= 0.0
            }
            Item::Text(text) => common::is_finite_pos(text.position),
            Item::Image(image) => common::is_finite_pos(image.position),
        };
        if valid {
            Ok(())
        } else {
            Err(EditorError::InvalidItem(id))
        }
    }
}

/// Constructors for the items the tools create
pub mod factory {
    use super::*;
    use egui::ColorImage;
    use std::sync::Arc;

    pub fn rectangle(anchor: Pos2) -> Item {
        Item::Rectangle(ShapeItem::at(anchor))
    }

    pub fn ellipse(anchor: Pos2) -> Item {
        Item::Ellipse(ShapeItem::at(anchor))
    }

    pub fn text(position: Pos2) -> Item {
        Item::Text(TextItem::placeholder(position))
    }

    pub fn image(position: Pos2, pixels: impl Into<Arc<ColorImage>>) -> Item {
        Item::Image(ImageItem::new(position, pixels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Vec2};

    #[test]
    fn style_goes_to_pen_and_brush() {
        let style = Style {
            border_color: Color32::RED,
            border_width: 3.0,
            fill_color: Color32::YELLOW,
            ..Style::default()
        };
        let mut item = factory::rectangle(Pos2::ZERO);
        item.apply_style(&style);
        match item {
            Item::Rectangle(shape) => {
                assert_eq!(shape.border, Stroke::new(3.0, Color32::RED));
                assert_eq!(shape.fill, Color32::YELLOW);
            }
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn only_images_sit_in_the_background() {
        let image = factory::image(Pos2::ZERO, egui::ColorImage::new([2, 2], Color32::WHITE));
        assert!(image.is_background());
        assert!(!factory::rectangle(Pos2::ZERO).is_background());
        assert!(!factory::text(Pos2::ZERO).is_background());
    }

    #[test]
    fn text_takes_fill_color() {
        let style = Style {
            fill_color: Color32::BLUE,
            ..Style::default()
        };
        let mut item = factory::text(Pos2::ZERO);
        item.apply_style(&style);
        match item {
            Item::Text(text) => assert_eq!(text.color, Color32::BLUE),
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn position_is_top_left_for_every_kind() {
        let mut ellipse = Item::Ellipse(ShapeItem::with_bounds(Rect::from_min_size(
            Pos2::new(5.0, 6.0),
            Vec2::new(10.0, 10.0),
        )));
        assert_eq!(ellipse.position(), Pos2::new(5.0, 6.0));
        ellipse.set_position(Pos2::new(1.0, 1.0));
        assert_eq!(ellipse.bounds().max, Pos2::new(11.0, 11.0));
    }

    #[test]
    fn non_finite_geometry_is_invalid() {
        let item = factory::text(Pos2::new(f32::NAN, 0.0));
        assert_eq!(
            item.validate(ItemId::from_raw(1)),
            Err(EditorError::InvalidItem(ItemId::from_raw(1)))
        );
    }
}
