//! Per-user spam protection record.

use serde::{Deserialize, Serialize};

/// Highest automatic escalation tier.
pub const MAX_AUTO_LEVEL: u8 = 2;

/// Sentinel `block_level` marking an administrator-imposed ban.
///
/// Distinct from the automatic tiers 0..=2: escalation logic must never
/// increment it or overwrite the associated reason/actor metadata.
pub const ADMIN_BAN_LEVEL: u8 = 3;

/// Spam protection state for a single user.
///
/// Every field carries `#[serde(default)]` so snapshots written by older
/// versions (or with fields missing entirely) reload with safe defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserRecord {
    /// Unix timestamps (seconds) of recent requests within the sliding window.
    #[serde(default)]
    pub requests: Vec<f64>,

    /// Warning counter for the current burst (0 = no warning issued).
    #[serde(default)]
    pub warnings: u8,

    /// Unix timestamp until which the user is blocked (0 = never blocked).
    #[serde(default)]
    pub blocked_until: f64,

    /// Escalation tier 0..=2, or [`ADMIN_BAN_LEVEL`] for manual bans.
    #[serde(default)]
    pub block_level: u8,

    /// Free-text ban reason; empty for untagged auto-blocks.
    #[serde(default)]
    pub ban_reason: String,

    /// Identity of the actor who imposed the ban (0 = system).
    #[serde(default)]
    pub banned_by: i64,
}

impl UserRecord {
    /// Returns true if an administrator ban is recorded (active or expired).
    #[must_use]
    pub fn is_admin_banned(&self) -> bool {
        self.block_level == ADMIN_BAN_LEVEL
    }

    /// Returns true if the user is blocked at `now`.
    #[must_use]
    pub fn is_blocked_at(&self, now: f64) -> bool {
        self.blocked_until > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_unrestricted() {
        let record = UserRecord::default();
        assert!(record.requests.is_empty());
        assert_eq!(record.warnings, 0);
        assert!(!record.is_blocked_at(0.0));
        assert!(!record.is_admin_banned());
    }

    #[test]
    fn test_missing_fields_deserialize_as_defaults() {
        let record: UserRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, UserRecord::default());

        let record: UserRecord =
            serde_json::from_str(r#"{"blocked_until": 100.0}"#).unwrap();
        assert_eq!(record.blocked_until, 100.0);
        assert!(record.requests.is_empty());
        assert_eq!(record.banned_by, 0);
    }

    #[test]
    fn test_blocked_at_boundary() {
        let record = UserRecord {
            blocked_until: 50.0,
            ..UserRecord::default()
        };
        assert!(record.is_blocked_at(49.9));
        assert!(!record.is_blocked_at(50.0));
    }
}
