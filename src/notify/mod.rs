//! Fire-and-forget notification capability.
//!
//! The guard and admin paths must never fail because a notice could not be
//! delivered, so every call goes through [`best_effort`], which logs and
//! swallows the error. Implementations plug the actual transport in; the
//! binary ships with [`LogNotifier`] until one is wired.

use thiserror::Error;
use tracing::{info, warn};

/// Notification delivery error.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Outbound message capability for user notices and operator alerts.
pub trait Notifier: Send + Sync {
    /// Sends a message directly to a user.
    fn notify_user(
        &self,
        user_id: i64,
        text: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;

    /// Sends a message to the operator alert channel.
    fn notify_operator(&self, text: &str)
    -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Awaits a delivery attempt, logging and swallowing any failure.
pub async fn best_effort(result: impl Future<Output = Result<(), NotifyError>>, what: &str) {
    if let Err(e) = result.await {
        warn!("Failed to deliver {}: {}", what, e);
    }
}

/// Notifier that only logs; stands in until a transport is connected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify_user(&self, user_id: i64, text: &str) -> Result<(), NotifyError> {
        info!("[user {}] {}", user_id, text);
        Ok(())
    }

    async fn notify_operator(&self, text: &str) -> Result<(), NotifyError> {
        info!("[operator] {}", text);
        Ok(())
    }
}
