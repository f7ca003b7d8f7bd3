use std::sync::Arc;

use egui::{ColorImage, Pos2, Rect, Vec2};

/// Stacking value of image items; everything else paints above it.
pub const BACKGROUND_Z: i32 = -1;

/// A bitmap placed on the canvas.
///
/// The pixels are shared, so cloning an image item never copies the bitmap.
#[derive(Clone)]
pub struct ImageItem {
    pub position: Pos2,
    pub pixels: Arc<ColorImage>,
    z_order: i32,
}

// ColorImage debug output would dump every pixel
impl std::fmt::Debug for ImageItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageItem")
            .field("position", &self.position)
            .field("size", &self.pixels.size)
            .field("z_order", &self.z_order)
            .finish()
    }
}

impl PartialEq for ImageItem {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.z_order == other.z_order
            && Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl ImageItem {
    pub fn new(position: Pos2, pixels: impl Into<Arc<ColorImage>>) -> Self {
        Self {
            position,
            pixels: pixels.into(),
            z_order: BACKGROUND_Z,
        }
    }

    /// Stacking value; images never rise above [`BACKGROUND_Z`].
    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.pixels.size[0] as f32, self.pixels.size[1] as f32)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size())
    }
}
