use wheelhouse_client::ClientConfig;
use wheelhouse_events::{LogSink, Notification, NotificationSink, NotifyError, WebhookSink};

/// The notification sink chosen by configuration.
pub enum ConfiguredSink {
    Webhook(WebhookSink),
    Log(LogSink),
}

impl ConfiguredSink {
    /// A webhook sink when `WHEELHOUSE_WEBHOOK_URL` is set, otherwise log-only.
    pub fn from_config(config: &ClientConfig) -> Result<Self, NotifyError> {
        match &config.webhook_url {
            Some(url) => {
                tracing::info!(%url, "Workflow notifications go to webhook");
                Ok(Self::Webhook(WebhookSink::new(url.clone())?))
            }
            None => Ok(Self::Log(LogSink)),
        }
    }
}

impl NotificationSink for ConfiguredSink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        match self {
            Self::Webhook(sink) => sink.notify(notification).await,
            Self::Log(sink) => sink.notify(notification).await,
        }
    }
}
