//! manualcraft - page-layout editor for technical manuals
//!
//! The library holds the editing core: the document model, the mutation
//! engine with bounded undo, the page-number reconciler, template
//! propagation and the session controller that binds them to a key-value
//! store.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod document_model;
pub mod gesture;
pub mod history;
pub mod ingest;
pub mod mutation;
pub mod propagation;
pub mod reconciler;
pub mod session;
pub mod storage;
pub mod templates;

pub use config::EditorConfig;
pub use history::{Recording, UndoManager};
pub use mutation::{DropPayload, Editor};
pub use session::{CreationRequest, EditingTarget, SaveOutcome, Session, SessionError, View};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage, Theme};
