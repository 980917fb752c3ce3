//! Bot statistics for the admin `/stats` view.

use chrono::Local;

use crate::config::{BotConfig, SpamSettings};
use crate::storage::{GuardStore, UserDirectory};

/// Counters shown to the administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotStats {
    pub total_users: usize,
    pub new_today: usize,
    pub tracked_users: usize,
    pub currently_blocked: usize,
    pub max_count: usize,
    pub window_secs: u64,
}

/// Gathers statistics across the stores at `now` (unix seconds).
#[must_use]
pub fn collect_stats(
    directory: &UserDirectory,
    guard: &GuardStore,
    settings: &SpamSettings,
    now: f64,
) -> BotStats {
    let today = Local::now().format("%Y-%m-%d").to_string();
    BotStats {
        total_users: directory.len(),
        new_today: directory.new_on(&today),
        tracked_users: guard.len(),
        currently_blocked: guard.blocked_count(now),
        max_count: settings.max_count,
        window_secs: settings.window_secs,
    }
}

impl BotStats {
    /// Renders the admin-facing statistics message.
    #[must_use]
    pub fn render(&self, config: &BotConfig) -> String {
        format!(
            "<b>📊 BOT STATISTICS</b>\n\n\
             👥 <b>Users:</b>\n\
             • Total Users: {}\n\
             • New Today: {}\n\n\
             🛡️ <b>Spam Protection:</b>\n\
             • Tracked Users: {}\n\
             • Currently Blocked: {}\n\
             • Max Spam Count: {}\n\
             • Time Window: {}s\n\n\
             💰 <b>Payment Info:</b>\n\
             • UPI ID: <code>{}</code>\n\
             • Amount: ₹{}\n\
             • Name: {}",
            self.total_users,
            self.new_today,
            self.tracked_users,
            self.currently_blocked,
            self.max_count,
            self.window_secs,
            config.upi.upi_id,
            config.upi.amount,
            config.upi.payee_name,
        )
    }
}
