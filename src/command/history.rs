use log::{info, warn};

use super::{Action, Command, CommandResult};
use crate::config::HistoryConfig;
use crate::scene::Scene;

/// Manages the history of executed commands for undo/redo functionality
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
    config: HistoryConfig,
    /// Description of the last thing done, undone or redone
    last_text: Option<String>,
    /// Bumped by every push, undo and redo
    revision: u64,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Executes `command` and records it, discarding everything that was undone.
    ///
    /// Nothing is recorded if the command fails.
    pub fn push(&mut self, mut command: Command, scene: &mut Scene) -> CommandResult {
        command.execute(scene)?;
        let text = command.describe(Action::Do);
        info!("{}", text);
        self.last_text = Some(text);
        self.revision += 1;

        for discarded in self.redo_stack.drain(..) {
            discarded.release_undone(scene);
        }

        if self.may_merge(&command) {
            if let Some(top) = self.undo_stack.last_mut() {
                if top.merge_with(&command) {
                    return Ok(());
                }
            }
        }

        self.undo_stack.push(command);
        if let Some(limit) = self.config.limit {
            while self.undo_stack.len() > limit {
                let dropped = self.undo_stack.remove(0);
                dropped.release_evicted(scene);
            }
        }
        Ok(())
    }

    /// Undo the last executed command. Returns false if there was nothing to undo.
    ///
    /// A command that fails to undo is dropped from the history.
    pub fn undo(&mut self, scene: &mut Scene) -> CommandResult<bool> {
        let Some(mut command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.undo(scene) {
            warn!("Dropping {:?} from history: {}", command.kind(), err);
            self.last_text = None;
            return Err(err);
        }
        let text = command.describe(Action::Undo);
        info!("{}", text);
        self.last_text = Some(text);
        self.revision += 1;
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Redo the last undone command. Returns false if there was nothing to redo.
    ///
    /// A command that fails to redo is dropped from the history.
    pub fn redo(&mut self, scene: &mut Scene) -> CommandResult<bool> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.execute(scene) {
            warn!("Dropping {:?} from history: {}", command.kind(), err);
            self.last_text = None;
            return Err(err);
        }
        let text = command.describe(Action::Redo);
        info!("{}", text);
        self.last_text = Some(text);
        self.revision += 1;
        self.undo_stack.push(command);
        Ok(true)
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// What `undo` would do next, for menu labels.
    pub fn undo_text(&self) -> Option<String> {
        self.undo_stack.last().map(|cmd| cmd.describe(Action::Undo))
    }

    /// What `redo` would do next, for menu labels.
    pub fn redo_text(&self) -> Option<String> {
        self.redo_stack.last().map(|cmd| cmd.describe(Action::Redo))
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// Changes whenever the history records, undoes or redoes something.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Forgets every command. Items only reachable through the history are released.
    pub fn clear(&mut self, scene: &mut Scene) {
        for command in self.redo_stack.drain(..) {
            command.release_undone(scene);
        }
        for command in self.undo_stack.drain(..).rev() {
            command.release_evicted(scene);
        }
        self.last_text = None;
    }

    fn may_merge(&self, command: &Command) -> bool {
        match command {
            Command::Move { .. } => self.config.merge_moves,
            Command::ChangeText { .. } => self.config.merge_text_edits,
            _ => false,
        }
    }
}
