//! Full-state backup export.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::guard::UserRecord;
use crate::storage::{GuardStore, StartMessageStore, StorageError, UserDirectory, save_atomic};

/// Single-file bundle of every persistent store.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupBundle {
    pub users: HashMap<i64, crate::storage::UserProfile>,
    pub spam: HashMap<i64, UserRecord>,
    pub start_message: Option<crate::storage::StartMessage>,
    /// `YYYY-MM-DD HH:MM:SS` creation time.
    pub backup_time: String,
    pub total_users: usize,
    pub total_spam_users: usize,
}

/// Writes a timestamped backup bundle under `data_dir`.
///
/// Returns the path of the created file.
pub fn write_backup(
    data_dir: &Path,
    directory: &UserDirectory,
    guard: &GuardStore,
    start_message: &StartMessageStore,
) -> Result<PathBuf, StorageError> {
    let now = Local::now();
    let bundle = BackupBundle {
        users: directory.users().clone(),
        spam: guard.records().clone(),
        start_message: start_message.get().cloned(),
        backup_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        total_users: directory.len(),
        total_spam_users: guard.len(),
    };

    let file_name = format!("backup_{}.json", now.format("%Y%m%d_%H%M%S"));
    let path = data_dir.join(file_name);
    save_atomic(&path, &bundle)?;
    Ok(path)
}
