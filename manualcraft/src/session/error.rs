//! Error types for the session controller

use crate::storage::StorageError;
use thiserror::Error;

/// Errors reported by session and template library operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// The operation needs an open editor
    #[error("no document is open for editing")]
    NoActiveEditor,

    #[error("unknown project '{0}'")]
    UnknownProject(String),

    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    /// Built-in templates are read-only
    #[error("template '{0}' is built in and cannot be changed")]
    BuiltinTemplate(String),

    /// The project is open in the editor
    #[error("project '{0}' is open for editing")]
    ProjectOpen(String),

    /// The controller is not in a state allowing the action
    #[error("cannot {action} while {view}")]
    InvalidTransition {
        action: &'static str,
        view: String,
    },

    /// Persisting a collection failed; in-memory data is unchanged
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}
