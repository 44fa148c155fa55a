use reqwest::Method;
use wheelhouse_core::models::{
    CreateTransaction, Transaction, TransactionDescriptionPatch, TransactionSummary,
    UpdateTransaction,
};
use wheelhouse_core::types::DbId;

use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn fetch_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        self.get_list("Failed to load transactions", "/transactions")
            .await
    }

    /// Fetch one transaction by its shop number.
    pub async fn fetch_transaction(&self, transaction_num: DbId) -> Result<Transaction, ClientError> {
        self.get_one(
            "Failed to load transaction",
            &format!("/transactions/{transaction_num}"),
        )
        .await
    }

    pub async fn create_transaction(
        &self,
        body: &CreateTransaction,
    ) -> Result<Transaction, ClientError> {
        self.send_one(
            "Failed to create transaction",
            Method::POST,
            "/transactions",
            body,
        )
        .await
    }

    /// Replace the whole transaction record.
    pub async fn update_transaction(
        &self,
        transaction_num: DbId,
        body: &UpdateTransaction,
    ) -> Result<Transaction, ClientError> {
        self.send_one(
            "Failed to update transaction",
            Method::PUT,
            &format!("/transactions/{transaction_num}"),
            body,
        )
        .await
    }

    pub async fn update_transaction_description(
        &self,
        transaction_num: DbId,
        description: impl Into<String>,
    ) -> Result<Transaction, ClientError> {
        let body = TransactionDescriptionPatch {
            description: description.into(),
        };
        self.send_one(
            "Failed to update transaction description",
            Method::PATCH,
            &format!("/transactions/{transaction_num}"),
            &body,
        )
        .await
    }

    /// Whiteboard header counts.
    pub async fn fetch_transaction_summary(&self) -> Result<TransactionSummary, ClientError> {
        self.get_one("Failed to load transaction summary", "/summary/transactions")
            .await
    }
}
