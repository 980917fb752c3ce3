//! Bulk user import from an uploaded JSON file.

use serde_json::Value;
use thiserror::Error;

use crate::storage::{GuardStore, UserDirectory, UserProfile};

/// Import failures that abort the whole operation.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid JSON format. Must be a dictionary/object.")]
    NotAnObject,
}

/// Per-record outcome counts of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: usize,
    pub updated: usize,
    pub errors: usize,
}

/// Merges a `users_data.json`-shaped payload into the directory.
///
/// Existing users are updated, new ones added; a missing `id` field is
/// filled from the map key. New users get a fresh guard record so the spam
/// protection map stays aligned with the directory. Records that are not
/// objects are counted as errors and skipped.
pub fn import_users(
    directory: &mut UserDirectory,
    guard: &mut GuardStore,
    payload: &[u8],
) -> Result<ImportStats, ImportError> {
    let parsed: Value = serde_json::from_slice(payload)?;
    let Value::Object(entries) = parsed else {
        return Err(ImportError::NotAnObject);
    };

    let mut stats = ImportStats::default();

    for (key, value) in entries {
        if !value.is_object() {
            stats.errors += 1;
            continue;
        }

        let Ok(mut profile) = serde_json::from_value::<UserProfile>(value) else {
            stats.errors += 1;
            continue;
        };

        if profile.id == 0 {
            match key.parse::<i64>() {
                Ok(id) => profile.id = id,
                Err(_) => {
                    stats.errors += 1;
                    continue;
                }
            }
        }

        let id = profile.id;
        if directory.merge(id, profile) {
            stats.imported += 1;
            guard.ensure(id);
        } else {
            stats.updated += 1;
        }
    }

    directory.flush();
    guard.flush();

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::temp_path;

    fn stores() -> (UserDirectory, GuardStore) {
        (
            UserDirectory::load(temp_path("import_users.json")),
            GuardStore::load(temp_path("import_guard.json")),
        )
    }

    #[test]
    fn test_import_adds_and_updates() {
        let (mut dir, mut guard) = stores();
        dir.upsert(UserProfile {
            id: 1,
            first_name: "Old".to_owned(),
            ..UserProfile::default()
        });

        let payload = br#"{
            "1": {"id": 1, "first_name": "New"},
            "2": {"first_name": "Fresh"}
        }"#;

        let stats = import_users(&mut dir, &mut guard, payload).unwrap();
        assert_eq!(stats, ImportStats { imported: 1, updated: 1, errors: 0 });
        assert_eq!(dir.get(1).unwrap().first_name, "New");
        // Missing id filled from the key; guard record created alongside.
        assert_eq!(dir.get(2).unwrap().id, 2);
        assert!(guard.get(2).is_some());
    }

    #[test]
    fn test_import_counts_bad_records() {
        let (mut dir, mut guard) = stores();
        let payload = br#"{
            "1": "not an object",
            "nope": {"first_name": "NoId"},
            "3": {"id": 3, "first_name": "Ok"}
        }"#;

        let stats = import_users(&mut dir, &mut guard, payload).unwrap();
        assert_eq!(stats.imported, 1);
        assert_eq!(stats.errors, 2);
    }

    #[test]
    fn test_import_rejects_non_object_payload() {
        let (mut dir, mut guard) = stores();
        assert!(matches!(
            import_users(&mut dir, &mut guard, b"[1, 2, 3]"),
            Err(ImportError::NotAnObject)
        ));
        assert!(matches!(
            import_users(&mut dir, &mut guard, b"not json"),
            Err(ImportError::Parse(_))
        ));
    }
}
