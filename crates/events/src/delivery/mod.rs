//! Delivery channels for workflow notifications.

pub mod log;
pub mod webhook;
