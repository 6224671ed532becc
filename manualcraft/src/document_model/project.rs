//! Persisted save slots

use super::editor_state::EditorState;
use super::ids::now_millis;
use serde::{Deserialize, Serialize};

/// A named, persisted editor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    /// Display name, mirrored into `state.project_name`
    pub name: String,
    /// Milliseconds since the Unix epoch
    pub last_modified: i64,
    pub state: EditorState,
}

impl Project {
    pub fn new(id: impl Into<String>, state: EditorState) -> Self {
        Self {
            id: id.into(),
            name: state.project_name.clone(),
            last_modified: now_millis(),
            state,
        }
    }

    /// Rename the project and its embedded state
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.state.project_name = name.to_string();
        self.touch();
    }

    /// Replace the stored snapshot
    pub fn store(&mut self, state: EditorState) {
        self.state = state;
        self.touch();
    }

    /// Bump the last-modified timestamp, never moving it backwards
    pub fn touch(&mut self) {
        self.last_modified = now_millis().max(self.last_modified);
    }
}
