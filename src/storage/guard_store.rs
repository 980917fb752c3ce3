//! Persistent map of per-user spam guard records.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::{load_or_default, save_atomic};
use crate::guard::UserRecord;

/// Snapshot after every N mutations.
pub const DEFAULT_FLUSH_EVERY: u32 = 50;

/// In-memory map of user guard records with batched snapshot persistence.
///
/// serde_json stringifies the integer keys on disk, so snapshots keep a
/// `{"<user_id>": {...}}` shape.
#[derive(Debug)]
pub struct GuardStore {
    path: PathBuf,
    records: HashMap<i64, UserRecord>,
    /// Mutations since the last successful snapshot.
    dirty: u32,
    flush_every: u32,
}

impl GuardStore {
    /// Loads the store from a snapshot file, starting empty if absent.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records: HashMap<i64, UserRecord> = load_or_default(&path);
        info!("Loaded spam guard records for {} users", records.len());
        Self {
            path,
            records,
            dirty: 0,
            flush_every: DEFAULT_FLUSH_EVERY,
        }
    }

    /// Overrides the batched-flush threshold.
    #[must_use]
    pub fn with_flush_every(mut self, flush_every: u32) -> Self {
        self.flush_every = flush_every.max(1);
        self
    }

    /// Returns the record for a user, creating the default lazily.
    pub fn entry(&mut self, user_id: i64) -> &mut UserRecord {
        self.records.entry(user_id).or_default()
    }

    /// Read-only view of a user's record, if one exists.
    #[must_use]
    pub fn get(&self, user_id: i64) -> Option<&UserRecord> {
        self.records.get(&user_id)
    }

    /// Ensures a record exists for a user without mutating an existing one.
    pub fn ensure(&mut self, user_id: i64) {
        self.records.entry(user_id).or_default();
    }

    /// Records one mutation and snapshots when the batch threshold is hit.
    pub fn mark_dirty(&mut self) {
        self.dirty += 1;
        if self.dirty >= self.flush_every {
            self.flush();
        }
    }

    /// Writes a snapshot now; failures are logged, never propagated.
    pub fn flush(&mut self) {
        match save_atomic(&self.path, &self.records) {
            Ok(()) => {
                debug!("Spam guard snapshot saved ({} users)", self.records.len());
                self.dirty = 0;
            }
            Err(e) => warn!("Failed to save spam guard snapshot: {}", e),
        }
    }

    /// Number of tracked users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no user has ever been tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of users under an active block at `now`.
    #[must_use]
    pub fn blocked_count(&self, now: f64) -> usize {
        self.records.values().filter(|r| r.is_blocked_at(now)).count()
    }

    /// Full map view, for backup export.
    #[must_use]
    pub fn records(&self) -> &HashMap<i64, UserRecord> {
        &self.records
    }
}
