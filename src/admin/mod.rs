//! Administrator operations: ban argument parsing, data import, backup
//! export and statistics.

mod backup;
mod ban_args;
mod import;
mod stats;

pub use backup::{BackupBundle, write_backup};
pub use ban_args::{BanArgs, BanArgsError};
pub use import::{ImportError, ImportStats, import_users};
pub use stats::{BotStats, collect_stats};
