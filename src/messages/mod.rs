//! User- and operator-facing message templates.
//!
//! All texts are HTML-formatted for the transport's `parse_mode="HTML"`;
//! the gate and admin handlers return them verbatim for delivery.

use crate::guard::BlockStatus;

/// Warning ladder, indexed by warning tier 0..=2.
pub const WARNING_MESSAGES: [&str; 3] = [
    "⚠️ Please don't spam!",
    "⚠️ This is your last warning!",
    "⛔ You are being blocked for spamming!",
];

/// Formats an `M:SS` minutes/seconds display.
fn minutes_seconds(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Notice shown to a user whose event was rejected by an active block.
#[must_use]
pub fn blocked_notice(status: &BlockStatus) -> String {
    let mut msg = String::from("⛔ <b>YOU ARE BLOCKED!</b>\n\n");

    if !status.reason.is_empty() {
        msg.push_str(&format!("<b>Reason:</b> {}\n", status.reason));
    }

    let minutes = status.remaining_secs / 60;
    let hours = minutes / 60;
    if hours > 0 {
        msg.push_str(&format!(
            "⏳ Please wait <b>{hours} hours {} minutes</b> before using the bot again.\n\n",
            minutes % 60
        ));
    } else {
        msg.push_str(&format!(
            "⏳ Please wait <b>{}</b> minutes before using the bot again.\n\n",
            minutes_seconds(status.remaining_secs)
        ));
    }

    msg.push_str("<b>Warning:</b> Further violations will increase block duration!");
    msg
}

/// Notice shown to a user at the moment an auto-block is imposed.
#[must_use]
pub fn auto_block_notice(duration_secs: u64) -> String {
    format!(
        "⛔ <b>YOU ARE BLOCKED FOR SPAMMING!</b>\n\n\
         ⏳ Please wait <b>{}</b> minutes before using the bot again.\n\n\
         <b>Warning:</b> Next spam will increase block duration!",
        minutes_seconds(duration_secs)
    )
}

/// Warning sent to a user approaching the block threshold.
#[must_use]
pub fn spam_warning(tier: u8, attempts_left: usize) -> String {
    let ladder = WARNING_MESSAGES[usize::from(tier).min(2)];
    format!(
        "{ladder}\n\n⚠️ <b>You have {attempts_left} attempts left before being blocked!</b>"
    )
}

/// Operator alert fired when a user is auto-blocked.
#[must_use]
pub fn operator_block_alert(user_id: i64, level: u8, duration_secs: u64, count: usize) -> String {
    format!(
        "🚨 <b>USER BLOCKED FOR SPAM</b>\n\n\
         👤 User ID: <code>{user_id}</code>\n\
         📛 Block Level: {}\n\
         ⏰ Duration: {} minutes\n\
         🔢 Spam Count: {count}",
        level + 1,
        duration_secs / 60
    )
}

/// Notice delivered to a user who has been banned by an administrator.
#[must_use]
pub fn admin_ban_notice(time_display: &str, reason: &str) -> String {
    let reason = if reason.is_empty() {
        "Violation of bot rules"
    } else {
        reason
    };
    format!(
        "⛔ <b>BOT ACCESS BLOCKED</b>\n\n\
         📛 <b>You have been banned from using this bot!</b>\n\n\
         ⏰ <b>Duration:</b> {time_display}\n\
         📝 <b>Reason:</b> {reason}\n\n\
         ⚠️ <b>Your access will be restored after the specified time.</b>"
    )
}

/// Default welcome text when no custom start message is configured.
#[must_use]
pub fn default_welcome(amount: &str) -> String {
    format!(
        "<b>🔥 PREMIUM CONTENT 🔥</b>\n\n\
         • Price: <b>₹{amount}/- only</b>\n\
         • Videos: <b>55k+ VIDEOS</b>\n\
         • Access: <b>Lifetime</b>\n\n\
         <b>Tap \"Get Premium\" to Buy</b>"
    )
}

/// Caption attached to the payment QR code.
#[must_use]
pub fn payment_caption(upi_id: &str, payee_name: &str, amount: &str) -> String {
    format!(
        "<b>💰 PAY ₹{amount} FOR PREMIUM</b>\n\n\
         <b>UPI Details:</b>\n\
         └ ID: <code>{upi_id}</code>\n\
         └ Name: {payee_name}\n\
         └ Amount: <b>₹{amount}</b>\n\n\
         <b>Instructions:</b>\n\
         1. Scan QR with any UPI app\n\
         2. Pay ₹{amount}\n\
         3. Click \"Payment Done\" below"
    )
}

/// Manual payment fallback when QR generation fails.
#[must_use]
pub fn manual_payment_text(upi_id: &str, amount: &str) -> String {
    format!(
        "<b>💰 PAY ₹{amount}</b>\n\n\
         <b>UPI ID:</b> <code>{upi_id}</code>\n\
         <b>Amount:</b> ₹{amount}\n\n\
         <b>Steps:</b>\n\
         1. Send ₹{amount} to above UPI ID\n\
         2. Click \"Payment Done\""
    )
}

/// Instructions shown by the "How To Get" button.
#[must_use]
pub fn how_to_get(amount: &str, support_username: &str) -> String {
    format!(
        "<b>❓ HOW TO GET PREMIUM:</b>\n\n\
         1. Click \"Get Premium\" button\n\
         2. Scan QR code and pay ₹{amount}\n\
         3. Click \"Payment Done\" button\n\
         4. Wait 10 seconds for verification\n\n\
         <b>Support:</b> @{support_username}"
    )
}

/// Operator log event for a first-time user.
#[must_use]
pub fn new_user_event(profile: &crate::storage::UserProfile, total_users: usize) -> String {
    format!(
        "🆕 <b>NEW USER</b>\n\
         👀 Name: {}\n\
         👤 User: @{}\n\
         🆔 ID: <code>{}</code>\n\
         ⏰ Time: {}\n\
         📊 Total Users: {total_users}",
        profile.first_name,
        profile.username.as_deref().unwrap_or("N/A"),
        profile.id,
        profile.start_time,
    )
}

/// Operator log event for a payment attempt or failure.
#[must_use]
pub fn payment_event(profile: &crate::storage::UserProfile, failed: bool) -> String {
    let header = if failed {
        "❌ <b>PAYMENT FAILED</b>"
    } else {
        "💰 <b>PAYMENT ATTEMPT</b>"
    };
    format!(
        "{header}\n\
         👀 Name: {}\n\
         👤 User: @{}\n\
         🆔 ID: <code>{}</code>",
        profile.first_name,
        profile.username.as_deref().unwrap_or("N/A"),
        profile.id,
    )
}

/// Operator log line for an administrator ban.
#[must_use]
pub fn admin_ban_log(user_id: i64, time_display: &str, reason: &str, actor: i64) -> String {
    format!(
        "🔨 <b>ADMIN BAN</b>\n\n\
         👤 User ID: <code>{user_id}</code>\n\
         ⏰ Duration: {time_display}\n\
         📝 Reason: {reason}\n\
         👮 Banned By: <code>{actor}</code>"
    )
}

/// Frame of the payment verification progress animation.
#[must_use]
pub fn verification_progress(step: usize, total: usize) -> String {
    const SPINNER: [char; 4] = ['⏳', '⌛', '🔍', '📊'];
    let filled = "█".repeat(step + 1);
    let empty = "░".repeat(total.saturating_sub(step + 1));
    format!(
        "<b>{} Processing...</b>\n\nProgress: [{filled}{empty}] {}%",
        SPINNER[step % SPINNER.len()],
        (step + 1) * 100 / total
    )
}

/// Final message when the manual payment check times out.
#[must_use]
pub fn payment_not_received(amount: &str, upi_id: &str, support_username: &str) -> String {
    format!(
        "<b>❌ PAYMENT NOT RECEIVED</b>\n\n\
         <b>What to do:</b>\n\
         1. Check payment in UPI app\n\
         2. Ensure ₹{amount} sent to <code>{upi_id}</code>\n\
         3. Try payment again\n\
         4. Contact @{support_username}"
    )
}
