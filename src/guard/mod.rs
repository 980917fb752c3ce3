//! Spam protection core: activity tracking, ban ledger and the event gate.

mod gate;
mod ledger;
mod record;
mod tracker;

pub use gate::{Gate, SpamGuard};
pub use ledger::{AutoBlock, BLOCK_DURATIONS, BanLedger, BlockStatus};
pub use record::{ADMIN_BAN_LEVEL, MAX_AUTO_LEVEL, UserRecord};
pub use tracker::ActivityTracker;
