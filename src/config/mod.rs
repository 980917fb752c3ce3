//! Configuration module for the premium bot.
//!
//! All deployment settings come from environment variables (loaded from a
//! `.env` file in development), matching the hosted-volume deployment the
//! bot runs under.

mod settings;

pub use settings::{BotConfig, ConfigError, SpamSettings};
