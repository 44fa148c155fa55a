//! Wheelhouse data access.
//!
//! - [`api::ApiClient`]: one method per REST operation, validated.
//! - [`bundle`]: concurrent loading of a transaction's dependent queries.
//! - [`cache`] / [`repository`]: query cache and the cached read path.
//! - [`workflow_service`]: workflow operations with notifications.

pub mod api;
pub mod bundle;
pub mod cache;
pub mod config;
pub mod error;
pub mod repository;
pub mod workflow_service;

pub use api::ApiClient;
pub use bundle::{fetch_transaction_bundle, TransactionBundle};
pub use cache::{QueryCache, QueryKey};
pub use config::ClientConfig;
pub use error::{is_missing_workflow, ClientError};
pub use repository::Repository;
pub use workflow_service::{LoadedWorkflow, StepOutcome, WorkflowService};
