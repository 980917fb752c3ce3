//! Application settings loaded from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::payment::UpiDetails;

fn default_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Deployment configuration for the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// User id of the administrator.
    pub admin_id: i64,

    /// Chat id of the operator log channel, if configured.
    pub log_channel: Option<i64>,

    /// Support contact username (without `@`).
    pub support_username: String,

    /// Invite link to the demo channel.
    pub demo_channel_link: String,

    /// UPI payment details shown to buyers.
    pub upi: UpiDetails,

    /// Directory holding the persistent JSON snapshots.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl BotConfig {
    /// Creates configuration from environment variables.
    ///
    /// `ADMIN_ID` and `UPI_ID` are required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_id: i64 = std::env::var("ADMIN_ID")
            .map_err(|_| ConfigError::MissingEnvVar("ADMIN_ID"))?
            .parse()
            .map_err(|_| ConfigError::InvalidAdminId)?;

        let log_channel = std::env::var("LOG_CHANNEL")
            .ok()
            .and_then(|s| s.parse().ok());

        let upi_id =
            std::env::var("UPI_ID").map_err(|_| ConfigError::MissingEnvVar("UPI_ID"))?;

        Ok(Self {
            admin_id,
            log_channel,
            support_username: std::env::var("SUPPORT_USERNAME").unwrap_or_default(),
            demo_channel_link: std::env::var("DEMO_CHANNEL_LINK").unwrap_or_default(),
            upi: UpiDetails {
                upi_id,
                payee_name: std::env::var("UPI_NAME")
                    .unwrap_or_else(|_| "Membership".to_owned()),
                amount: std::env::var("AMOUNT").unwrap_or_else(|_| "99".to_owned()),
            },
            data_dir: std::env::var("DATA_DIR")
                .map_or_else(|_| default_data_dir(), PathBuf::from),
        })
    }

    /// Path of the spam guard snapshot file.
    #[must_use]
    pub fn spam_data_path(&self) -> PathBuf {
        self.data_dir.join("spam_data.json")
    }

    /// Path of the user directory snapshot file.
    #[must_use]
    pub fn users_data_path(&self) -> PathBuf {
        self.data_dir.join("users_data.json")
    }

    /// Path of the start message snapshot file.
    #[must_use]
    pub fn start_message_path(&self) -> PathBuf {
        self.data_dir.join("start_message.json")
    }
}

/// Spam protection thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpamSettings {
    /// Requests within the window that trigger an auto-block.
    #[serde(default = "default_max_count")]
    pub max_count: usize,

    /// Sliding window size in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_max_count() -> usize {
    5
}

fn default_window_secs() -> u64 {
    10
}

impl Default for SpamSettings {
    fn default() -> Self {
        Self {
            max_count: default_max_count(),
            window_secs: default_window_secs(),
        }
    }
}

impl SpamSettings {
    /// Creates spam settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self {
            max_count: std::env::var("MAX_SPAM_COUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_count),
            window_secs: std::env::var("SPAM_TIME_WINDOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_window_secs),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid ADMIN_ID format (must be an integer user id)")]
    InvalidAdminId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spam_settings() {
        let settings = SpamSettings::default();
        assert_eq!(settings.max_count, 5);
        assert_eq!(settings.window_secs, 10);
    }

    #[test]
    fn test_data_paths() {
        let config = BotConfig {
            admin_id: 1,
            log_channel: None,
            support_username: String::new(),
            demo_channel_link: String::new(),
            upi: UpiDetails {
                upi_id: "x@upi".to_owned(),
                payee_name: "M".to_owned(),
                amount: "99".to_owned(),
            },
            data_dir: PathBuf::from("/data"),
        };
        assert_eq!(config.spam_data_path(), PathBuf::from("/data/spam_data.json"));
        assert_eq!(config.users_data_path(), PathBuf::from("/data/users_data.json"));
        assert_eq!(
            config.start_message_path(),
            PathBuf::from("/data/start_message.json")
        );
    }
}
