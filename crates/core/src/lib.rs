//! Wheelhouse core: the pure business-rule layer of the shop client.
//!
//! Nothing in this crate performs I/O. It holds:
//!
//! - [`models`]: wire entities (transactions, bikes, items, repairs, users,
//!   workflow steps) as serde types.
//! - [`validation`]: the decode-and-validate boundary for API envelopes and
//!   entity payloads.
//! - [`filter`]: transaction view classification for the whiteboard grids.
//! - [`pricing`]: subtotal and tax computation.
//! - [`workflow`]: the bike-resale step engine.
//! - [`permissions`]: user permission lookups.

pub mod error;
pub mod filter;
pub mod models;
pub mod permissions;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod workflow;
