//! Manual payment verification wait.
//!
//! Payment confirmation is human-driven, so "verification" is a timed
//! progress animation followed by the "not received" outcome. The task is
//! spawned detached per request and only edits a single progress message;
//! it never touches the spam guard. Edit failures (deleted message,
//! unreachable chat) are swallowed.

use std::time::Duration;

use tracing::debug;

use crate::messages;
use crate::notify::NotifyError;

/// Target for progress-message edits during the verification wait.
pub trait ProgressSink: Send + Sync {
    /// Replaces the progress message text.
    fn edit(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Texts for the final verification outcome.
#[derive(Debug, Clone)]
pub struct VerificationTexts {
    /// Message shown when the wait elapses without confirmation.
    pub not_received: String,
}

/// Runs the verification animation: one edit per cadence tick, then the
/// failure outcome. 10 steps of 1 second in production.
pub async fn run_verification<S: ProgressSink>(
    sink: &S,
    steps: usize,
    cadence: Duration,
    texts: &VerificationTexts,
) {
    for step in 0..steps {
        let frame = messages::verification_progress(step, steps);
        if let Err(e) = sink.edit(&frame).await {
            debug!("Progress edit failed (ignored): {}", e);
        }
        tokio::time::sleep(cadence).await;
    }

    if let Err(e) = sink.edit(&texts.not_received).await {
        debug!("Final verification edit failed (ignored): {}", e);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct RecordingSink {
        edits: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new(fail: bool) -> Self {
            Self {
                edits: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl ProgressSink for RecordingSink {
        async fn edit(&self, text: &str) -> Result<(), NotifyError> {
            self.edits.lock().unwrap().push(text.to_owned());
            if self.fail {
                return Err(NotifyError("message deleted".to_owned()));
            }
            Ok(())
        }
    }

    fn texts() -> VerificationTexts {
        VerificationTexts {
            not_received: "❌ PAYMENT NOT RECEIVED".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_emits_one_edit_per_step_plus_outcome() {
        let sink = RecordingSink::new(false);
        run_verification(&sink, 10, Duration::from_millis(1), &texts()).await;

        let edits = sink.edits.lock().unwrap();
        assert_eq!(edits.len(), 11);
        assert!(edits[0].contains("10%"));
        assert!(edits[9].contains("100%"));
        assert_eq!(edits[10], "❌ PAYMENT NOT RECEIVED");
    }

    #[tokio::test]
    async fn test_edit_failures_are_swallowed() {
        let sink = RecordingSink::new(true);
        run_verification(&sink, 3, Duration::from_millis(1), &texts()).await;
        assert_eq!(sink.edits.lock().unwrap().len(), 4);
    }
}
