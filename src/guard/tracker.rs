//! Request activity tracking over a sliding time window.
//!
//! The tracker only sees raw request timestamps and the warning counter;
//! block state belongs to the ledger. Pruning happens on every access, so a
//! record never holds timestamps older than the window.

use super::record::UserRecord;

/// Tracks per-user request rates within a sliding window.
#[derive(Debug, Clone, Copy)]
pub struct ActivityTracker {
    /// Sliding window size in seconds.
    window_secs: u64,
}

impl ActivityTracker {
    /// Creates a tracker with the given window size in seconds.
    #[must_use]
    pub const fn new(window_secs: u64) -> Self {
        Self { window_secs }
    }

    /// Prunes stale timestamps, records the request at `now` and returns the
    /// resulting count of requests inside the window.
    pub fn record_and_classify(&self, record: &mut UserRecord, now: f64) -> usize {
        let window = self.window_secs as f64;
        record.requests.retain(|&ts| now - ts < window);
        record.requests.push(now);
        record.requests.len()
    }

    /// Clears the request history and warning counter for a legitimate user.
    ///
    /// A no-op while the user is under an active block, so a block cannot be
    /// shortened by the caller's post-event reset.
    pub fn reset(&self, record: &mut UserRecord, now: f64) {
        if record.is_blocked_at(now) {
            return;
        }
        record.requests.clear();
        record.warnings = 0;
    }

    /// Warning tier for a request count between the warning and block
    /// thresholds, or `None` outside that range.
    ///
    /// Tiers are 0..=2; a given tier fires at most once per burst, tracked
    /// via the record's `warnings` counter.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn warning_tier(count: usize, max_count: usize) -> Option<u8> {
        if count >= 3 && count < max_count {
            Some((count - 3).min(2) as u8)
        } else {
            None
        }
    }
}
