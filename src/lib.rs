//! Premium Access Bot Library
//!
//! A Telegram bot that sells access to a premium content channel via UPI
//! QR-code payment, confirmed manually by the administrator.
//!
//! This crate provides the core functionality for:
//! - Spam protection: per-user rate tracking with a warning ladder and
//!   progressive auto-blocks, plus administrator bans
//! - JSON snapshot persistence for users, guard records and the start
//!   message
//! - UPI payment QR generation and the manual verification wait
//! - Administrator operations: bans, data import, backup, statistics

pub mod admin;
pub mod config;
pub mod guard;
pub mod messages;
pub mod notify;
pub mod payment;
pub mod storage;

/// Current unix time in seconds, with sub-second precision.
#[must_use]
pub fn now_unix() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
