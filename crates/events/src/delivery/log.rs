use crate::notification::{Notification, NotificationSink, NotifyError};

/// Sink used when no webhook is configured: notifications are only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        tracing::info!(
            event = notification.kind.as_str(),
            transaction_id = notification.transaction_id,
            bike_id = %notification.bike_id,
            text = %notification.text(),
            "Notification (no webhook configured)"
        );
        Ok(())
    }
}
