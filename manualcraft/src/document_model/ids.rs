//! Identifier and timestamp helpers

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Generate a unique id of the form `<prefix>-<uuid>`
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
