//! Custom start message persistence.
//!
//! Administrators can replace the default welcome with an arbitrary
//! message, optionally carrying a transport media attachment referenced by
//! its file id.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{StorageError, load_or_default, save_atomic};

/// A configured start message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StartMessage {
    #[serde(default)]
    pub text: String,

    /// `photo`, `video`, `document` or `animation` when media is attached.
    #[serde(default)]
    pub media_type: String,

    /// Transport file id of the attachment.
    #[serde(default)]
    pub file_id: String,

    #[serde(default)]
    pub has_media: bool,
}

/// Persistent holder for the optional custom start message.
#[derive(Debug)]
pub struct StartMessageStore {
    path: PathBuf,
    message: Option<StartMessage>,
}

impl StartMessageStore {
    /// Loads the store; absent or malformed files mean "no custom message".
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let message: Option<StartMessage> = load_or_default(&path);
        Self { path, message }
    }

    #[must_use]
    pub fn get(&self) -> Option<&StartMessage> {
        self.message.as_ref()
    }

    /// Replaces the custom start message and snapshots immediately.
    pub fn set(&mut self, message: StartMessage) {
        self.message = Some(message);
        self.flush();
    }

    /// Removes the custom start message and snapshots immediately.
    pub fn clear(&mut self) {
        self.message = None;
        self.flush();
    }

    fn flush(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save start message: {}", e);
        }
    }

    fn save(&self) -> Result<(), StorageError> {
        save_atomic(&self.path, &self.message)
    }
}
