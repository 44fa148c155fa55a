//! Cached read path over [`ApiClient`].
//!
//! Reads consult the [`QueryCache`] first. Mutations go straight to the API
//! and, once they succeed, invalidate the keys whose data they changed so
//! the next read refetches. Concurrent writers are last-write-wins.

use std::sync::Arc;

use uuid::Uuid;
use wheelhouse_core::models::{
    Bike, CreateBike, CreateCustomer, CreateItem, CreateOrderRequest, CreateRepair,
    CreateTransaction, Customer, Item, OrderRequest, Repair, Transaction, TransactionSummary,
    UpdateOrderRequest, UpdateTransaction, WorkflowStep,
};
use wheelhouse_core::types::DbId;

use crate::api::ApiClient;
use crate::cache::{QueryCache, QueryKey};
use crate::error::ClientError;

pub struct Repository {
    api: ApiClient,
    cache: Arc<QueryCache>,
}

impl Repository {
    pub fn new(api: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// The uncached client, for operations without a cached form.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ---- cached reads ----

    pub async fn transactions(&self) -> Result<Arc<Vec<Transaction>>, ClientError> {
        if let Some(hit) = self.cache.get(QueryKey::Transactions).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_transactions().await?;
        Ok(self.cache.insert(QueryKey::Transactions, fetched).await)
    }

    pub async fn transaction(&self, transaction_num: DbId) -> Result<Arc<Transaction>, ClientError> {
        let key = QueryKey::Transaction(transaction_num);
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_transaction(transaction_num).await?;
        Ok(self.cache.insert(key, fetched).await)
    }

    pub async fn items(&self) -> Result<Arc<Vec<Item>>, ClientError> {
        if let Some(hit) = self.cache.get(QueryKey::Items).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_items().await?;
        Ok(self.cache.insert(QueryKey::Items, fetched).await)
    }

    pub async fn repairs(&self) -> Result<Arc<Vec<Repair>>, ClientError> {
        if let Some(hit) = self.cache.get(QueryKey::Repairs).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_repairs().await?;
        Ok(self.cache.insert(QueryKey::Repairs, fetched).await)
    }

    pub async fn bikes(&self) -> Result<Arc<Vec<Bike>>, ClientError> {
        if let Some(hit) = self.cache.get(QueryKey::Bikes).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_bikes().await?;
        Ok(self.cache.insert(QueryKey::Bikes, fetched).await)
    }

    pub async fn customers(&self) -> Result<Arc<Vec<Customer>>, ClientError> {
        if let Some(hit) = self.cache.get(QueryKey::Customers).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_customers().await?;
        Ok(self.cache.insert(QueryKey::Customers, fetched).await)
    }

    pub async fn order_requests(&self) -> Result<Arc<Vec<OrderRequest>>, ClientError> {
        if let Some(hit) = self.cache.get(QueryKey::OrderRequests).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_order_requests().await?;
        Ok(self.cache.insert(QueryKey::OrderRequests, fetched).await)
    }

    /// Steps of a transaction's workflow, keyed by transaction UUID.
    pub async fn workflow_steps(
        &self,
        transaction_id: Uuid,
    ) -> Result<Arc<Vec<WorkflowStep>>, ClientError> {
        let key = QueryKey::WorkflowSteps(transaction_id);
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_workflow_steps(transaction_id).await?;
        Ok(self.cache.insert(key, fetched).await)
    }

    pub async fn summary(&self) -> Result<Arc<TransactionSummary>, ClientError> {
        if let Some(hit) = self.cache.get(QueryKey::Summary).await {
            return Ok(hit);
        }
        let fetched = self.api.fetch_transaction_summary().await?;
        Ok(self.cache.insert(QueryKey::Summary, fetched).await)
    }

    // ---- mutations ----

    async fn invalidate_transaction(&self, transaction_num: DbId) {
        self.cache.invalidate(QueryKey::Transaction(transaction_num)).await;
        self.cache.invalidate(QueryKey::Transactions).await;
        self.cache.invalidate(QueryKey::Summary).await;
    }

    pub async fn create_transaction(
        &self,
        body: &CreateTransaction,
    ) -> Result<Transaction, ClientError> {
        let created = self.api.create_transaction(body).await?;
        self.cache.invalidate(QueryKey::Transactions).await;
        self.cache.invalidate(QueryKey::Summary).await;
        Ok(created)
    }

    pub async fn update_transaction(
        &self,
        transaction_num: DbId,
        body: &UpdateTransaction,
    ) -> Result<Transaction, ClientError> {
        let updated = self.api.update_transaction(transaction_num, body).await?;
        self.invalidate_transaction(transaction_num).await;
        Ok(updated)
    }

    pub async fn update_transaction_description(
        &self,
        transaction_num: DbId,
        description: impl Into<String>,
    ) -> Result<Transaction, ClientError> {
        let updated = self
            .api
            .update_transaction_description(transaction_num, description)
            .await?;
        self.invalidate_transaction(transaction_num).await;
        Ok(updated)
    }

    pub async fn create_item(&self, body: &CreateItem) -> Result<Item, ClientError> {
        let created = self.api.create_item(body).await?;
        self.cache.invalidate(QueryKey::Items).await;
        Ok(created)
    }

    pub async fn update_item(&self, item_id: Uuid, body: &CreateItem) -> Result<Item, ClientError> {
        let updated = self.api.update_item(item_id, body).await?;
        self.cache.invalidate(QueryKey::Items).await;
        Ok(updated)
    }

    pub async fn delete_item(&self, item_id: Uuid) -> Result<(), ClientError> {
        self.api.delete_item(item_id).await?;
        self.cache.invalidate(QueryKey::Items).await;
        Ok(())
    }

    pub async fn create_repair(&self, body: &CreateRepair) -> Result<Repair, ClientError> {
        let created = self.api.create_repair(body).await?;
        self.cache.invalidate(QueryKey::Repairs).await;
        Ok(created)
    }

    pub async fn update_repair(
        &self,
        repair_id: Uuid,
        body: &CreateRepair,
    ) -> Result<Repair, ClientError> {
        let updated = self.api.update_repair(repair_id, body).await?;
        self.cache.invalidate(QueryKey::Repairs).await;
        Ok(updated)
    }

    pub async fn delete_repair(&self, repair_id: Uuid) -> Result<(), ClientError> {
        self.api.delete_repair(repair_id).await?;
        self.cache.invalidate(QueryKey::Repairs).await;
        Ok(())
    }

    pub async fn create_bike(&self, body: &CreateBike) -> Result<Bike, ClientError> {
        let created = self.api.create_bike(body).await?;
        self.cache.invalidate(QueryKey::Bikes).await;
        Ok(created)
    }

    pub async fn update_bike(&self, bike_id: Uuid, body: &CreateBike) -> Result<Bike, ClientError> {
        let updated = self.api.update_bike(bike_id, body).await?;
        self.cache.invalidate(QueryKey::Bikes).await;
        // Transactions embed their bike.
        self.invalidate_all_transactions().await;
        Ok(updated)
    }

    pub async fn create_customer(&self, body: &CreateCustomer) -> Result<Customer, ClientError> {
        let created = self.api.create_customer(body).await?;
        self.cache.invalidate(QueryKey::Customers).await;
        Ok(created)
    }

    /// Drop every transaction read, list and single.
    async fn invalidate_all_transactions(&self) {
        self.cache
            .invalidate_where(|key| {
                matches!(key, QueryKey::Transactions | QueryKey::Transaction(_))
            })
            .await;
    }

    pub async fn create_order_request(
        &self,
        body: &CreateOrderRequest,
    ) -> Result<OrderRequest, ClientError> {
        let created = self.api.create_order_request(body).await?;
        self.cache.invalidate(QueryKey::OrderRequests).await;
        self.invalidate_all_transactions().await;
        Ok(created)
    }

    pub async fn update_order_request(
        &self,
        order_request_id: DbId,
        body: &UpdateOrderRequest,
    ) -> Result<OrderRequest, ClientError> {
        let updated = self.api.update_order_request(order_request_id, body).await?;
        self.cache.invalidate(QueryKey::OrderRequests).await;
        self.invalidate_all_transactions().await;
        Ok(updated)
    }

    pub async fn delete_order_request(&self, order_request_id: DbId) -> Result<(), ClientError> {
        self.api.delete_order_request(order_request_id).await?;
        self.cache.invalidate(QueryKey::OrderRequests).await;
        self.invalidate_all_transactions().await;
        Ok(())
    }
}
