//! Slack-style incoming-webhook delivery.
//!
//! [`WebhookSink`] posts a JSON body with a `text` field (rendered by chat
//! tools) plus the structured notification fields. Each notification gets
//! a single attempt; callers dispatch it detached and only log failures.

use std::time::Duration;

use crate::notification::{Notification, NotificationSink, NotifyError};

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers notifications to one webhook URL.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    /// Create a sink with its own HTTP client.
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Create a sink reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON body posted for a notification.
    pub fn payload(notification: &Notification) -> serde_json::Value {
        serde_json::json!({
            "text": notification.text(),
            "event": notification.kind.as_str(),
            "bike_id": notification.bike_id,
            "transaction_id": notification.transaction_id,
            "mechanic": notification.mechanic,
            "bike_model": notification.bike_model,
            "note": notification.note,
        })
    }
}

impl NotificationSink for WebhookSink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let payload = Self::payload(&notification);
        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(
            event = notification.kind.as_str(),
            transaction_id = notification.transaction_id,
            "Webhook notification delivered"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationKind;
    use uuid::Uuid;

    #[test]
    fn new_does_not_panic() {
        let sink = WebhookSink::new("http://localhost:9/hook").unwrap();
        assert_eq!(sink.url(), "http://localhost:9/hook");
    }

    #[test]
    fn payload_carries_text_and_fields() {
        let n = Notification::new(
            NotificationKind::InspectionComplete,
            Uuid::nil(),
            1042,
            "Grace",
        )
        .with_bike_model("Harper");
        let payload = WebhookSink::payload(&n);
        assert_eq!(payload["event"], "inspection_complete");
        assert_eq!(payload["transaction_id"], 1042);
        assert_eq!(payload["bike_model"], "Harper");
        assert!(payload["note"].is_null());
        assert!(payload["text"].as_str().unwrap().contains("Inspected by Grace"));
    }

    #[tokio::test]
    async fn unreachable_webhook_is_a_request_error() {
        // Port 9 (discard) is not listening on test hosts.
        let sink = WebhookSink::new("http://127.0.0.1:9/hook").unwrap();
        let n = Notification::new(
            NotificationKind::BuildReadyForInspection,
            Uuid::nil(),
            1,
            "Ada",
        );
        let err = sink.notify(n).await.unwrap_err();
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
