//! Wheelhouse notification port.
//!
//! Workflow transitions announce themselves to the shop's chat channel:
//!
//! - [`Notification`]: the "ready for inspection" / "inspection complete"
//!   messages and their payload.
//! - [`NotificationSink`]: the port the workflow service talks to.
//! - [`delivery`]: sink implementations (webhook, log-only).
//! - [`dispatch_detached`]: fire-and-forget delivery on a spawned task.

pub mod delivery;
pub mod dispatch;
pub mod notification;

pub use delivery::log::LogSink;
pub use delivery::webhook::WebhookSink;
pub use dispatch::dispatch_detached;
pub use notification::{Notification, NotificationKind, NotificationSink, NotifyError};
