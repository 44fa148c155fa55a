//! Transaction line items and the change log.

use reqwest::Method;
use serde_json::Value;
use uuid::Uuid;
use wheelhouse_core::models::{
    CreateTransactionDetail, CreateTransactionLog, DetailType, ItemDetail, RepairDetail,
    TransactionDetailRecord, TransactionLog, UpdateTransactionDetail,
};
use wheelhouse_core::types::DbId;

use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    fn details_path(transaction_id: Uuid, detail_type: DetailType) -> String {
        format!(
            "/transactionDetails/{transaction_id}?detailType={}",
            detail_type.as_str()
        )
    }

    /// Parts attached to a transaction (by transaction UUID).
    pub async fn fetch_item_details(
        &self,
        transaction_id: Uuid,
    ) -> Result<Vec<ItemDetail>, ClientError> {
        self.get_list(
            "Failed to load item details",
            &Self::details_path(transaction_id, DetailType::Item),
        )
        .await
    }

    /// Repairs attached to a transaction; also the build checklist.
    pub async fn fetch_repair_details(
        &self,
        transaction_id: Uuid,
    ) -> Result<Vec<RepairDetail>, ClientError> {
        self.get_list(
            "Failed to load repair details",
            &Self::details_path(transaction_id, DetailType::Repair),
        )
        .await
    }

    pub async fn create_transaction_detail(
        &self,
        transaction_id: Uuid,
        body: &CreateTransactionDetail,
    ) -> Result<TransactionDetailRecord, ClientError> {
        self.send_one(
            "Failed to add transaction detail",
            Method::POST,
            &format!("/transactionDetails/{transaction_id}"),
            body,
        )
        .await
    }

    /// Toggle a detail's completion (checklist tick).
    pub async fn update_transaction_detail(
        &self,
        detail_id: Uuid,
        completed: bool,
    ) -> Result<TransactionDetailRecord, ClientError> {
        self.send_one(
            "Failed to update transaction detail",
            Method::PATCH,
            &format!("/transactionDetails/{detail_id}"),
            &UpdateTransactionDetail { completed },
        )
        .await
    }

    /// Remove a detail. Unlike the other deletes this returns the server's
    /// raw payload, which existing callers inspect.
    pub async fn delete_transaction_detail(&self, detail_id: Uuid) -> Result<Value, ClientError> {
        self.send_empty(
            "Failed to delete transaction detail",
            self.request(Method::DELETE, &format!("/transactionDetails/{detail_id}")),
        )
        .await
    }

    // ---- logs ----

    pub async fn fetch_transaction_logs(
        &self,
        transaction_num: DbId,
    ) -> Result<Vec<TransactionLog>, ClientError> {
        self.get_list(
            "Failed to load transaction logs",
            &format!("/transactionLogs/{transaction_num}"),
        )
        .await
    }

    pub async fn create_transaction_log(
        &self,
        transaction_num: DbId,
        body: &CreateTransactionLog,
    ) -> Result<TransactionLog, ClientError> {
        self.send_one(
            "Failed to write transaction log",
            Method::POST,
            &format!("/transactionLogs/{transaction_num}"),
            body,
        )
        .await
    }
}
