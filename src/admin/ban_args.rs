//! Parsing of the `/ban` command arguments.
//!
//! Format: `<user_id> <time> <unit> [reason...]` with units `min`, `hour`,
//! `day` and `perm` (a year). The reason defaults to "Admin ban".

use thiserror::Error;

/// One year, used for "permanent" bans.
const PERMANENT_SECS: u64 = 31_536_000;

/// Errors from ban argument parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BanArgsError {
    #[error("Expected: <user_id> <time> <unit> [reason]")]
    MissingArguments,

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Invalid time value. Time must be a number.")]
    InvalidTime,

    #[error("Invalid unit '{0}'. Use: min, hour, day, perm")]
    InvalidUnit(String),
}

/// Parsed `/ban` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BanArgs {
    pub user_id: i64,
    pub duration_secs: u64,
    /// Human-readable duration, e.g. "15 minutes" or "permanent".
    pub time_display: String,
    pub reason: String,
}

impl BanArgs {
    /// Parses the argument tail of a `/ban` command.
    pub fn parse(args: &str) -> Result<Self, BanArgsError> {
        let parts: Vec<&str> = args.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(BanArgsError::MissingArguments);
        }

        let user_id: i64 = parts[0]
            .parse()
            .map_err(|_| BanArgsError::InvalidUserId(parts[0].to_owned()))?;

        let time_value: f64 = parts[1].parse().map_err(|_| BanArgsError::InvalidTime)?;
        if !time_value.is_finite() || time_value < 0.0 {
            return Err(BanArgsError::InvalidTime);
        }

        let unit = parts.get(2).map_or("min", |u| *u).to_lowercase();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (duration_secs, time_display) = match unit.as_str() {
            "min" => (
                (time_value * 60.0) as u64,
                format!("{} minutes", time_value as u64),
            ),
            "hour" => (
                (time_value * 3600.0) as u64,
                format!("{} hours", time_value as u64),
            ),
            "day" => (
                (time_value * 86_400.0) as u64,
                format!("{} days", time_value as u64),
            ),
            "perm" => (PERMANENT_SECS, "permanent".to_owned()),
            other => return Err(BanArgsError::InvalidUnit(other.to_owned())),
        };

        let reason = if parts.len() > 3 {
            parts[3..].join(" ")
        } else {
            "Admin ban".to_owned()
        };

        Ok(Self {
            user_id,
            duration_secs,
            time_display,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_with_reason() {
        let args = BanArgs::parse("123456789 15 min spamming the menu").unwrap();
        assert_eq!(args.user_id, 123_456_789);
        assert_eq!(args.duration_secs, 900);
        assert_eq!(args.time_display, "15 minutes");
        assert_eq!(args.reason, "spamming the menu");
    }

    #[test]
    fn test_parse_hours_and_days() {
        let hours = BanArgs::parse("1 2 hour violation").unwrap();
        assert_eq!(hours.duration_secs, 7200);
        assert_eq!(hours.time_display, "2 hours");

        let days = BanArgs::parse("1 3 day").unwrap();
        assert_eq!(days.duration_secs, 3 * 86_400);
        assert_eq!(days.reason, "Admin ban");
    }

    #[test]
    fn test_parse_permanent() {
        let args = BanArgs::parse("1 1 perm repeat offender").unwrap();
        assert_eq!(args.duration_secs, 31_536_000);
        assert_eq!(args.time_display, "permanent");
    }

    #[test]
    fn test_parse_defaults_unit_to_minutes() {
        let args = BanArgs::parse("42 5").unwrap();
        assert_eq!(args.duration_secs, 300);
    }

    #[test]
    fn test_parse_fractional_time() {
        let args = BanArgs::parse("1 0.5 hour").unwrap();
        assert_eq!(args.duration_secs, 1800);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(BanArgs::parse(""), Err(BanArgsError::MissingArguments));
        assert_eq!(BanArgs::parse("42"), Err(BanArgsError::MissingArguments));
        assert!(matches!(
            BanArgs::parse("abc 5 min"),
            Err(BanArgsError::InvalidUserId(_))
        ));
        assert_eq!(BanArgs::parse("42 abc min"), Err(BanArgsError::InvalidTime));
        assert!(matches!(
            BanArgs::parse("42 5 fortnight"),
            Err(BanArgsError::InvalidUnit(_))
        ));
    }
}
