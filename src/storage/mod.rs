//! JSON snapshot persistence.
//!
//! Three flat key-value snapshots survive restarts: the spam guard records,
//! the user directory and the custom start message. Saves go through a
//! write-temp-then-rename so a crash mid-write never corrupts the previous
//! snapshot. The in-memory maps stay authoritative: a failed save is logged
//! by the caller and the process keeps serving.

mod guard_store;
mod start_message;
mod users;

pub use guard_store::{DEFAULT_FLUSH_EVERY, GuardStore};
pub use start_message::{StartMessage, StartMessageStore};
pub use users::{UserDirectory, UserProfile};

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Errors from snapshot reads and writes.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Loads a JSON snapshot, falling back to the default on any failure.
///
/// A missing file is the normal first-run case; a malformed file is logged
/// and replaced by the default rather than aborting startup.
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed snapshot {}: {}; starting fresh", path.display(), e);
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}

/// Writes a JSON snapshot atomically (temp file + rename).
pub(crate) fn save_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn temp_path(name: &str) -> std::path::PathBuf {
    let unique = format!(
        "premium_bot_test_{}_{}_{name}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    );
    std::env::temp_dir().join(unique)
}
