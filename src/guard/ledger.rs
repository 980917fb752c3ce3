//! Ban ledger: block state, escalation tiers and manual bans.
//!
//! The ledger owns `blocked_until`, `block_level`, `ban_reason` and
//! `banned_by` on a [`UserRecord`]; it never inspects raw request
//! timestamps beyond clearing them when a block is imposed. Blocks are
//! never lifted explicitly: only the passage of time clears them, evaluated
//! lazily on the next access.

use super::record::{ADMIN_BAN_LEVEL, MAX_AUTO_LEVEL, UserRecord};

/// Auto-block durations in seconds, indexed by escalation tier.
pub const BLOCK_DURATIONS: [u64; 3] = [300, 900, 1800];

/// Snapshot of an active block, for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatus {
    /// Whole seconds until the block expires.
    pub remaining_secs: u64,
    /// Stored ban reason; empty for untagged auto-blocks.
    pub reason: String,
}

/// Result of an automatic escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoBlock {
    /// The tier the user was escalated to (0..=2).
    pub level: u8,
    /// Block duration in seconds, from [`BLOCK_DURATIONS`].
    pub duration_secs: u64,
}

/// Applies and reads ban state on user records.
#[derive(Debug, Clone, Copy, Default)]
pub struct BanLedger;

impl BanLedger {
    /// Returns the active block for the user at `now`, if any.
    ///
    /// Pure read: never mutates the record.
    #[must_use]
    pub fn is_blocked(&self, record: &UserRecord, now: f64) -> Option<BlockStatus> {
        if !record.is_blocked_at(now) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let remaining_secs = (record.blocked_until - now) as u64;
        Some(BlockStatus {
            remaining_secs,
            reason: record.ban_reason.clone(),
        })
    }

    /// Escalates the user to the next automatic block tier.
    ///
    /// The new tier is `min(2, level + 1)`; a record carrying the admin
    /// sentinel (necessarily expired, or the gate would have short-circuited)
    /// is re-blocked at the top auto tier without touching the stored
    /// reason or actor. Request history and the warning counter are cleared
    /// so the next burst starts fresh.
    pub fn auto_block(&self, record: &mut UserRecord, now: f64) -> AutoBlock {
        let level = if record.is_admin_banned() {
            MAX_AUTO_LEVEL
        } else {
            (record.block_level + 1).min(MAX_AUTO_LEVEL)
        };
        let duration_secs = BLOCK_DURATIONS[usize::from(level)];

        record.block_level = level;
        record.blocked_until = now + duration_secs as f64;
        record.requests.clear();
        record.warnings = 0;

        AutoBlock {
            level,
            duration_secs,
        }
    }

    /// Imposes an administrator ban with reason and actor metadata.
    ///
    /// Marks the record with the admin sentinel so later auto-escalation
    /// can never silently replace an intentional ban with a shorter tier.
    pub fn manual_ban(
        &self,
        record: &mut UserRecord,
        now: f64,
        duration_secs: u64,
        reason: &str,
        actor: i64,
    ) {
        record.blocked_until = now + duration_secs as f64;
        record.block_level = ADMIN_BAN_LEVEL;
        record.ban_reason = reason.to_owned();
        record.banned_by = actor;
    }
}
