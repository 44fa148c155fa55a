//! Fire-and-forget notification dispatch.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::notification::{Notification, NotificationSink};

/// Deliver `notification` on a background task.
///
/// Delivery failures are logged at `warn` and never reach the caller. The
/// returned handle may be dropped; tests await it to observe completion.
pub fn dispatch_detached<S>(sink: Arc<S>, notification: Notification) -> JoinHandle<()>
where
    S: NotificationSink + 'static,
{
    tokio::spawn(async move {
        let kind = notification.kind.as_str();
        let transaction_id = notification.transaction_id;
        if let Err(e) = sink.notify(notification).await {
            tracing::warn!(
                error = %e,
                event = kind,
                transaction_id,
                "Failed to deliver workflow notification"
            );
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{NotificationKind, NotifyError};
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<Notification>>,
    }

    impl NotificationSink for RecordingSink {
        async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
            self.seen.lock().unwrap().push(notification);
            Ok(())
        }
    }

    struct FailingSink;

    impl NotificationSink for FailingSink {
        async fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
            Err(NotifyError::HttpStatus(500))
        }
    }

    fn sample() -> Notification {
        Notification::new(
            NotificationKind::BuildReadyForInspection,
            Uuid::nil(),
            1042,
            "Ada",
        )
    }

    #[tokio::test]
    async fn delivers_on_background_task() {
        let sink = Arc::new(RecordingSink::default());
        dispatch_detached(Arc::clone(&sink), sample()).await.unwrap();
        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].transaction_id, 1042);
    }

    #[tokio::test]
    async fn failure_does_not_panic_the_task() {
        let handle = dispatch_detached(Arc::new(FailingSink), sample());
        assert!(handle.await.is_ok());
    }
}
