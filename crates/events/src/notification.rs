//! Notification payloads and the sink port.

use serde::Serialize;
use uuid::Uuid;
use wheelhouse_core::types::DbId;
use wheelhouse_core::workflow::NotificationTrigger;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BuildReadyForInspection,
    InspectionComplete,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuildReadyForInspection => "build_ready_for_inspection",
            Self::InspectionComplete => "inspection_complete",
        }
    }
}

impl From<NotificationTrigger> for NotificationKind {
    fn from(trigger: NotificationTrigger) -> Self {
        match trigger {
            NotificationTrigger::ReadyForInspection => Self::BuildReadyForInspection,
            NotificationTrigger::InspectionComplete => Self::InspectionComplete,
        }
    }
}

/// A workflow announcement for the shop channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub bike_id: Uuid,
    pub transaction_id: DbId,
    pub mechanic: String,
    pub bike_model: Option<String>,
    pub note: Option<String>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        bike_id: Uuid,
        transaction_id: DbId,
        mechanic: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            bike_id,
            transaction_id,
            mechanic: mechanic.into(),
            bike_model: None,
            note: None,
        }
    }

    pub fn with_bike_model(mut self, model: impl Into<String>) -> Self {
        self.bike_model = Some(model.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// One-line chat message, e.g.
    /// `"Bike Trek FX 2 (transaction #1042) is ready for inspection. Built by Ada."`
    pub fn text(&self) -> String {
        let bike = match &self.bike_model {
            Some(model) => format!("Bike {model}"),
            None => format!("Bike {}", self.bike_id),
        };
        let mut text = match self.kind {
            NotificationKind::BuildReadyForInspection => format!(
                "{bike} (transaction #{}) is ready for inspection. Built by {}.",
                self.transaction_id, self.mechanic
            ),
            NotificationKind::InspectionComplete => format!(
                "{bike} (transaction #{}) passed its safety inspection. Inspected by {}.",
                self.transaction_id, self.mechanic
            ),
        };
        if let Some(note) = &self.note {
            text.push_str(" Note: ");
            text.push_str(note);
        }
        text
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Destination for workflow notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(
        &self,
        notification: Notification,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
