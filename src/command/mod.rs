mod commands;
mod history;

pub use crate::error::CommandResult;
pub use commands::{Action, Command, CommandKind};
pub use history::CommandHistory;
