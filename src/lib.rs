#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod components;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod input;
pub mod item;
pub mod panels;
pub mod scene;
pub mod texture_manager;
pub mod tools;

pub use app::DocumentorApp;
pub use canvas::Canvas;
pub use command::{Command, CommandHistory};
pub use config::{EditorConfig, HistoryConfig, PaletteColor, Style};
pub use editor::Editor;
pub use error::{CommandResult, EditorError};
pub use input::InputEvent;
pub use item::{Item, ItemId, ItemKind};
pub use scene::Scene;
pub use tools::{Tool, ToolContext, ToolState, ToolStateMachine};
