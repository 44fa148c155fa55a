//! Part order requests shown on the ordering whiteboard.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::item::Item;
use crate::types::DbId;
use crate::validation::{Entity, ValidationError};

/// A pending restock or part request tied to a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_request_id: DbId,
    pub created_by: Uuid,
    pub item_id: Uuid,
    /// Transaction number the part was requested for.
    pub transaction_id: DbId,
    pub quantity: i64,
    pub notes: Option<String>,
    pub ordered: bool,
    #[serde(rename = "Item", skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

impl Entity for OrderRequest {
    const NAME: &'static str = "order request";

    fn check(&self) -> Result<(), ValidationError> {
        match &self.item {
            Some(item) => item.check(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateOrderRequest {
    pub created_by: Uuid,
    pub item_id: Uuid,
    pub transaction_id: DbId,
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct UpdateOrderRequest {
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i64,
    pub notes: Option<String>,
    pub ordered: bool,
}

/// One line extracted from an uploaded supplier PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedOrderRow {
    pub name: String,
    pub upc: Option<String>,
    pub quantity: i64,
    pub unit_price: Option<f64>,
    /// Inventory match, when the server found one.
    pub item_id: Option<Uuid>,
}

impl Entity for ExtractedOrderRow {
    const NAME: &'static str = "extracted order row";
}
