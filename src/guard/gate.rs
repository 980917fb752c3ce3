//! Inbound event gate combining the activity tracker and the ban ledger.
//!
//! Every command and button handler calls [`SpamGuard::on_user_event`]
//! before doing any business logic. The block check always runs first: a
//! blocked user's event never reaches the tracker, so spamming during a
//! block neither records activity nor triggers a new escalation.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::ledger::BanLedger;
use super::tracker::ActivityTracker;
use crate::config::SpamSettings;
use crate::messages;
use crate::notify::{Notifier, best_effort};
use crate::storage::GuardStore;

/// Outcome of the gate check for an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// The event may proceed to business logic.
    Allowed,
    /// The event is rejected; the message is sent to the user verbatim.
    Blocked(String),
}

/// Spam protection front door shared by all handlers.
///
/// The store mutex serializes read-modify-write access across concurrent
/// events; per-user records are only ever touched under it.
pub struct SpamGuard<N: Notifier> {
    settings: SpamSettings,
    tracker: ActivityTracker,
    ledger: BanLedger,
    store: Arc<Mutex<GuardStore>>,
    notifier: Arc<N>,
}

impl<N: Notifier> SpamGuard<N> {
    /// Creates the guard over a shared store.
    #[must_use]
    pub fn new(settings: SpamSettings, store: Arc<Mutex<GuardStore>>, notifier: Arc<N>) -> Self {
        Self {
            settings,
            tracker: ActivityTracker::new(settings.window_secs),
            ledger: BanLedger,
            store,
            notifier,
        }
    }

    /// Gate check for an inbound user event at `now` (unix seconds).
    pub async fn on_user_event(&self, user_id: i64, now: f64) -> Gate {
        // Notifications are collected under the lock and delivered after
        // releasing it, so slow transports cannot stall other users.
        let mut operator_alert = None;
        let mut user_warning = None;

        let gate = {
            let mut store = self.store.lock().await;
            let record = store.entry(user_id);

            if let Some(status) = self.ledger.is_blocked(record, now) {
                return Gate::Blocked(messages::blocked_notice(&status));
            }

            let count = self.tracker.record_and_classify(record, now);

            if count >= self.settings.max_count {
                let escalation = self.ledger.auto_block(record, now);
                info!(
                    "User {} auto-blocked at level {} for {}s (count {})",
                    user_id, escalation.level, escalation.duration_secs, count
                );
                operator_alert = Some(messages::operator_block_alert(
                    user_id,
                    escalation.level,
                    escalation.duration_secs,
                    count,
                ));
                store.flush();
                Gate::Blocked(messages::auto_block_notice(escalation.duration_secs))
            } else {
                if let Some(tier) = ActivityTracker::warning_tier(count, self.settings.max_count)
                    && record.warnings < tier + 1
                {
                    record.warnings = tier + 1;
                    user_warning = Some(messages::spam_warning(
                        tier,
                        self.settings.max_count - count,
                    ));
                }
                store.mark_dirty();
                Gate::Allowed
            }
        };

        if let Some(alert) = operator_alert {
            best_effort(self.notifier.notify_operator(&alert), "operator alert").await;
        }
        if let Some(warning) = user_warning {
            best_effort(self.notifier.notify_user(user_id, &warning), "spam warning").await;
        }

        gate
    }

    /// Imposes an administrator ban and notifies the user (best effort).
    pub async fn admin_ban(
        &self,
        user_id: i64,
        now: f64,
        duration_secs: u64,
        time_display: &str,
        reason: &str,
        actor: i64,
    ) -> bool {
        {
            let mut store = self.store.lock().await;
            let record = store.entry(user_id);
            self.ledger.manual_ban(record, now, duration_secs, reason, actor);
            store.flush();
        }

        info!(
            "User {} banned by {} for {}s ({})",
            user_id, actor, duration_secs, reason
        );

        let notice = messages::admin_ban_notice(time_display, reason);
        best_effort(self.notifier.notify_user(user_id, &notice), "ban notice").await;
        true
    }

    /// Clears request history and warnings for a legitimate user.
    ///
    /// No-op while the user is under an active block.
    pub async fn reset(&self, user_id: i64, now: f64) {
        let mut store = self.store.lock().await;
        let record = store.entry(user_id);
        self.tracker.reset(record, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::record::ADMIN_BAN_LEVEL;
    use crate::notify::testing::RecordingNotifier;
    use crate::storage::temp_path;

    fn guard(notifier: Arc<RecordingNotifier>) -> SpamGuard<RecordingNotifier> {
        let store = GuardStore::load(temp_path("gate.json")).with_flush_every(u32::MAX);
        SpamGuard::new(SpamSettings::default(), Arc::new(Mutex::new(store)), notifier)
    }

    #[tokio::test]
    async fn test_low_rate_is_allowed_silently() {
        let notifier = Arc::new(RecordingNotifier::default());
        let guard = guard(Arc::clone(&notifier));

        assert_eq!(guard.on_user_event(1, 0.0).await, Gate::Allowed);
        assert_eq!(guard.on_user_event(1, 1.0).await, Gate::Allowed);
        assert!(notifier.user_messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_escalation_scenario() {
        // window 10s, max 5: six requests at t=0..5, then a 7th at t=6.
        let notifier = Arc::new(RecordingNotifier::default());
        let guard = guard(Arc::clone(&notifier));

        for t in 0..3 {
            assert_eq!(guard.on_user_event(9, f64::from(t)).await, Gate::Allowed);
        }

        // count=4: tier-1 warning.
        assert_eq!(guard.on_user_event(9, 3.0).await, Gate::Allowed);
        {
            let warnings = notifier.user_messages.lock().unwrap();
            assert_eq!(warnings.len(), 2); // tier 0 at count=3, tier 1 at count=4
            assert!(warnings[1].1.contains("1 attempts left"));
        }

        // count=5: auto-block at level 1 for 900s.
        let verdict = guard.on_user_event(9, 4.0).await;
        let Gate::Blocked(msg) = verdict else {
            panic!("expected block");
        };
        assert!(msg.contains("15:00"));
        assert_eq!(notifier.operator_messages.lock().unwrap().len(), 1);

        {
            let store = guard.store.lock().await;
            let record = store.get(9).unwrap();
            assert_eq!(record.block_level, 1);
            assert_eq!(record.blocked_until, 4.0 + 900.0);
            assert!(record.requests.is_empty());
        }

        // Request while blocked: rejected, no activity recorded.
        let verdict = guard.on_user_event(9, 6.0).await;
        assert!(matches!(verdict, Gate::Blocked(_)));
        {
            let store = guard.store.lock().await;
            assert!(store.get(9).unwrap().requests.is_empty());
        }
    }

    #[tokio::test]
    async fn test_blocked_user_never_reaches_tracker() {
        let notifier = Arc::new(RecordingNotifier::default());
        let guard = guard(Arc::clone(&notifier));

        guard.admin_ban(5, 0.0, 600, "10 minutes", "test", 1).await;

        for t in 0..100 {
            let verdict = guard.on_user_event(5, f64::from(t) * 0.05).await;
            assert!(matches!(verdict, Gate::Blocked(_)));
        }

        let store = guard.store.lock().await;
        let record = store.get(5).unwrap();
        assert!(record.requests.is_empty());
        assert_eq!(record.block_level, ADMIN_BAN_LEVEL);
    }

    #[tokio::test]
    async fn test_warning_fires_once_per_tier() {
        let notifier = Arc::new(RecordingNotifier::default());
        let store = GuardStore::load(temp_path("gate_warn.json")).with_flush_every(u32::MAX);
        // Larger threshold keeps counts 3 and 4 in warning territory twice.
        let settings = SpamSettings {
            max_count: 8,
            window_secs: 10,
        };
        let guard = SpamGuard::new(settings, Arc::new(Mutex::new(store)), Arc::clone(&notifier));

        for t in 0..4 {
            guard.on_user_event(2, f64::from(t)).await;
        }
        // count=4 issued tier 1; repeating count=5 (tier 2) warns once more,
        // count=6 stays at tier 2 and must not warn again.
        guard.on_user_event(2, 4.0).await;
        guard.on_user_event(2, 4.5).await;

        let warnings = notifier.user_messages.lock().unwrap();
        assert_eq!(warnings.len(), 3); // tiers 0, 1, 2 exactly once each
    }

    #[tokio::test]
    async fn test_admin_ban_survives_auto_escalation_attempt() {
        let notifier = Arc::new(RecordingNotifier::default());
        let guard = guard(Arc::clone(&notifier));

        guard.admin_ban(3, 0.0, 100, "100 seconds", "abuse", 42).await;

        // The ban expires at t=100; the user then floods.
        for i in 0..5 {
            guard.on_user_event(3, 101.0 + f64::from(i) * 0.1).await;
        }

        let store = guard.store.lock().await;
        let record = store.get(3).unwrap();
        assert_eq!(record.ban_reason, "abuse");
        assert_eq!(record.banned_by, 42);
        // Re-blocked at the top auto tier, not below.
        assert_eq!(record.block_level, 2);
    }

    #[tokio::test]
    async fn test_failed_notifications_do_not_fail_the_gate() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let guard = guard(Arc::clone(&notifier));

        for i in 0..5 {
            guard.on_user_event(4, f64::from(i) * 0.1).await;
        }

        let store = guard.store.lock().await;
        assert!(store.get(4).unwrap().is_blocked_at(1.0));
    }

    #[tokio::test]
    async fn test_reset_clears_burst_but_not_blocks() {
        let notifier = Arc::new(RecordingNotifier::default());
        let guard = guard(Arc::clone(&notifier));

        guard.on_user_event(6, 0.0).await;
        guard.on_user_event(6, 1.0).await;
        guard.reset(6, 2.0).await;
        {
            let store = guard.store.lock().await;
            assert!(store.get(6).unwrap().requests.is_empty());
        }

        guard.admin_ban(6, 2.0, 600, "10 minutes", "", 1).await;
        guard.reset(6, 3.0).await;
        let store = guard.store.lock().await;
        assert!(store.get(6).unwrap().is_blocked_at(3.0));
    }
}
