//! Directory of users who have contacted the bot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{StorageError, load_or_default, save_atomic};

/// Profile captured from a user's first (and subsequent) `/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// First-contact time, `YYYY-MM-DD HH:MM:SS`.
    #[serde(default)]
    pub start_time: String,
}

/// Persistent map of everyone who has started the bot.
#[derive(Debug)]
pub struct UserDirectory {
    path: PathBuf,
    users: HashMap<i64, UserProfile>,
}

impl UserDirectory {
    /// Loads the directory from a snapshot file, starting empty if absent.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users: HashMap<i64, UserProfile> = load_or_default(&path);
        info!("Loaded {} users from {}", users.len(), path.display());
        Self { path, users }
    }

    /// Inserts or replaces a profile. Returns true for a first contact.
    pub fn upsert(&mut self, profile: UserProfile) -> bool {
        self.users.insert(profile.id, profile.clone()).is_none()
    }

    /// Merges an imported profile into an existing one, if any.
    ///
    /// Existing users are updated field-by-field; unseen users are added.
    /// Returns true when the user was previously unknown.
    pub fn merge(&mut self, id: i64, profile: UserProfile) -> bool {
        match self.users.get_mut(&id) {
            Some(existing) => {
                *existing = UserProfile { id, ..profile };
                false
            }
            None => {
                self.users.insert(id, UserProfile { id, ..profile });
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&UserProfile> {
        self.users.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.users.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users whose first contact happened on the given `YYYY-MM-DD` date.
    #[must_use]
    pub fn new_on(&self, date: &str) -> usize {
        self.users
            .values()
            .filter(|u| u.start_time.starts_with(date))
            .count()
    }

    /// All user ids, for guard record backfill.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.users.keys().copied()
    }

    /// Full map view, for backup export.
    #[must_use]
    pub fn users(&self) -> &HashMap<i64, UserProfile> {
        &self.users
    }

    /// Writes a snapshot now; failures are logged, never propagated.
    pub fn flush(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save user directory: {}", e);
        }
    }

    fn save(&self) -> Result<(), StorageError> {
        save_atomic(&self.path, &self.users)
    }

    /// Snapshot file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
