//! Bikes, inventory items and the repair catalog.

use reqwest::Method;
use uuid::Uuid;
use wheelhouse_core::models::{Bike, CreateBike, CreateItem, CreateRepair, Item, Repair};
use wheelhouse_core::validation::validate_request;

use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    // ---- bikes ----

    pub async fn fetch_bikes(&self) -> Result<Vec<Bike>, ClientError> {
        self.get_list("Failed to load bikes", "/bikes").await
    }

    pub async fn fetch_bike(&self, bike_id: Uuid) -> Result<Bike, ClientError> {
        self.get_one("Failed to load bike", &format!("/bikes/{bike_id}"))
            .await
    }

    pub async fn create_bike(&self, body: &CreateBike) -> Result<Bike, ClientError> {
        validate_request(body)?;
        self.send_one("Failed to create bike", Method::POST, "/bikes", body)
            .await
    }

    pub async fn update_bike(&self, bike_id: Uuid, body: &CreateBike) -> Result<Bike, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to update bike",
            Method::PUT,
            &format!("/bikes/{bike_id}"),
            body,
        )
        .await
    }

    // ---- items ----

    pub async fn fetch_items(&self) -> Result<Vec<Item>, ClientError> {
        self.get_list("Failed to load items", "/items").await
    }

    pub async fn fetch_item(&self, item_id: Uuid) -> Result<Item, ClientError> {
        self.get_one("Failed to load item", &format!("/items/{item_id}"))
            .await
    }

    pub async fn create_item(&self, body: &CreateItem) -> Result<Item, ClientError> {
        validate_request(body)?;
        self.send_one("Failed to create item", Method::POST, "/items", body)
            .await
    }

    pub async fn update_item(&self, item_id: Uuid, body: &CreateItem) -> Result<Item, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to update item",
            Method::PUT,
            &format!("/items/{item_id}"),
            body,
        )
        .await
    }

    pub async fn delete_item(&self, item_id: Uuid) -> Result<(), ClientError> {
        self.delete("Failed to delete item", &format!("/items/{item_id}"))
            .await
    }

    // ---- repairs ----

    pub async fn fetch_repairs(&self) -> Result<Vec<Repair>, ClientError> {
        self.get_list("Failed to load repairs", "/repairs").await
    }

    pub async fn fetch_repair(&self, repair_id: Uuid) -> Result<Repair, ClientError> {
        self.get_one("Failed to load repair", &format!("/repairs/{repair_id}"))
            .await
    }

    pub async fn create_repair(&self, body: &CreateRepair) -> Result<Repair, ClientError> {
        validate_request(body)?;
        self.send_one("Failed to create repair", Method::POST, "/repairs", body)
            .await
    }

    pub async fn update_repair(
        &self,
        repair_id: Uuid,
        body: &CreateRepair,
    ) -> Result<Repair, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to update repair",
            Method::PUT,
            &format!("/repairs/{repair_id}"),
            body,
        )
        .await
    }

    pub async fn delete_repair(&self, repair_id: Uuid) -> Result<(), ClientError> {
        self.delete("Failed to delete repair", &format!("/repairs/{repair_id}"))
            .await
    }
}
