//! Undo/redo history of editor state snapshots
//!
//! Snapshots are stored by value, so a restored state is exactly the state
//! that was current before the recorded mutation.

use crate::document_model::EditorState;
use std::collections::VecDeque;

/// Undo steps retained by default
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Whether a mutation is recorded onto the undo stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recording {
    /// Structural edits the user expects to undo
    Record,
    /// Navigation, live property edits, toggles and derived content
    Skip,
}

/// Anything that can step backwards and forwards through edits
pub trait UndoManager {
    /// Whether an undo step is available
    fn can_undo(&self) -> bool;

    /// Whether a redo step is available
    fn can_redo(&self) -> bool;

    /// Restore the previous state, `false` when there is nothing to undo
    fn undo(&mut self) -> bool;

    /// Reapply the last undone edit, `false` when there is nothing to redo
    fn redo(&mut self) -> bool;

    /// Drop every undo and redo step
    fn clear_history(&mut self);
}

/// Bounded undo stack plus redo stack
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<EditorState>,
    redo_stack: Vec<EditorState>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create an empty history keeping at most `limit` undo steps
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Record the state as it was before a new mutation
    ///
    /// Clears the redo stack and evicts the oldest snapshots beyond the limit.
    pub fn record(&mut self, previous: EditorState) {
        self.redo_stack.clear();
        self.undo_stack.push_back(previous);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Step back, returning the state to restore
    ///
    /// `current` is kept for redo. Returns `None` and leaves both stacks
    /// untouched when there is nothing to undo.
    pub fn undo(&mut self, current: &EditorState) -> Option<EditorState> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current.clone());
        Some(previous)
    }

    /// Step forward again, returning the state to restore
    pub fn redo(&mut self, current: &EditorState) -> Option<EditorState> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current.clone());
        Some(next)
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
