use thiserror::Error;

use crate::item::ItemId;

/// Errors produced by the scene, the command history and the tool state machine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Geometry the canvas cannot represent (non-finite coordinates).
    #[error("item {0} has invalid geometry")]
    InvalidItem(ItemId),

    /// The item is alive but not part of the scene.
    #[error("item {0} is not in the scene")]
    NotFound(ItemId),

    /// The item is already part of the scene.
    #[error("item {0} is already in the scene")]
    DuplicateItem(ItemId),

    /// A command refers to an item that no longer exists.
    #[error("item {0} is no longer alive")]
    StaleReference(ItemId),

    /// An input event arrived that the current state cannot accept.
    #[error("unexpected {event} while {state}")]
    UnexpectedGesture {
        state: &'static str,
        event: &'static str,
    },

    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EditorError {
    /// Scene-consistency violations are the only unrecoverable errors.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NotFound(_) | Self::DuplicateItem(_))
    }
}

/// Result type for scene and command operations
pub type CommandResult<T = ()> = Result<T, EditorError>;
