use std::path::Path;

use egui::{Color32, FontId};
use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Colors offered by the toolbar for borders and fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteColor {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 6] = [
        PaletteColor::Black,
        PaletteColor::White,
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Yellow,
    ];

    pub fn color(self) -> Color32 {
        match self {
            PaletteColor::Black => Color32::BLACK,
            PaletteColor::White => Color32::WHITE,
            PaletteColor::Red => Color32::RED,
            PaletteColor::Green => Color32::GREEN,
            PaletteColor::Blue => Color32::BLUE,
            PaletteColor::Yellow => Color32::YELLOW,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Black => "Black",
            PaletteColor::White => "White",
            PaletteColor::Red => "Red",
            PaletteColor::Green => "Green",
            PaletteColor::Blue => "Blue",
            PaletteColor::Yellow => "Yellow",
        }
    }
}

/// Pen, brush and font handed to every new item.
///
/// The session captures a copy when a gesture starts; later toolbar changes
/// never reach items that are already placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub border_color: Color32,
    pub border_width: f32,
    pub fill_color: Color32,
    pub font: FontId,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            border_color: Color32::BLACK,
            border_width: 1.0,
            fill_color: Color32::TRANSPARENT,
            font: FontId::proportional(16.0),
        }
    }
}

impl Style {
    /// Text is colored with the fill; a transparent fill falls back to the border color.
    pub fn text_color(&self) -> Color32 {
        if self.fill_color.a() == 0 {
            self.border_color
        } else {
            self.fill_color
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Merge consecutive moves of the same items into one undo step.
    pub merge_moves: bool,
    /// Merge consecutive text changes of the same item into one undo step.
    pub merge_text_edits: bool,
    /// Maximum number of undo steps kept, `None` for unlimited.
    pub limit: Option<usize>,
}

/// Everything configurable about an editor session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub style: Style,
    pub history: HistoryConfig,
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(|err| EditorError::Config(err.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, EditorError> {
        serde_json::to_string_pretty(self).map_err(|err| EditorError::Config(err.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|err| EditorError::Config(format!("{}: {}", path.display(), err)))?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded editor configuration from {}", path.display());
        Ok(config)
    }
}
