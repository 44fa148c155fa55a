//! Audit log entries recorded against a transaction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{DbId, Timestamp};
use crate::validation::Entity;

/// Name of the user who made a logged change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogUser {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLog {
    pub log_id: DbId,
    pub transaction_num: DbId,
    pub changed_by: Uuid,
    pub change_type: String,
    pub description: String,
    pub date_modified: Timestamp,
    #[serde(rename = "Users", skip_serializing_if = "Option::is_none")]
    pub user: Option<LogUser>,
}

impl TransactionLog {
    /// Who made the change, falling back to the raw user id.
    pub fn author(&self) -> String {
        match &self.user {
            Some(u) => format!("{} {}", u.firstname, u.lastname),
            None => self.changed_by.to_string(),
        }
    }
}

impl Entity for TransactionLog {
    const NAME: &'static str = "transaction log";
}

/// Body for `POST /transactionLogs/:transaction_num`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransactionLog {
    pub changed_by: Uuid,
    pub change_type: String,
    pub description: String,
}
