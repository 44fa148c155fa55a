//! Inventory items (parts and merchandise).

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{Entity, ValidationError};

/// An inventory SKU.
///
/// `standard_price` is what walk-in customers pay; `wholesale_cost` is the
/// shop's cost, used (with a markup) for staff purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: Uuid,
    pub upc: String,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub stock: i64,
    pub minimum_stock: Option<i64>,
    pub standard_price: f64,
    pub wholesale_cost: f64,
    pub condition: Option<String>,
    pub disabled: bool,
    pub managed: Option<bool>,
    pub category_1: Option<String>,
    pub category_2: Option<String>,
    pub category_3: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub features: Option<serde_json::Value>,
}

impl Item {
    /// Whether stock has fallen to or below the configured minimum.
    pub fn needs_restock(&self) -> bool {
        self.minimum_stock.is_some_and(|min| self.stock <= min)
    }
}

impl Entity for Item {
    const NAME: &'static str = "item";

    fn check(&self) -> Result<(), ValidationError> {
        if !(self.standard_price.is_finite() && self.standard_price >= 0.0) {
            return Err(ValidationError::field(
                Self::NAME,
                "standard_price",
                "must be a non-negative number",
            ));
        }
        if !(self.wholesale_cost.is_finite() && self.wholesale_cost >= 0.0) {
            return Err(ValidationError::field(
                Self::NAME,
                "wholesale_cost",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Body for `POST /items` and `PUT /items/:id`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "UPC is required"))]
    pub upc: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    #[validate(range(min = 0))]
    pub stock: i64,
    #[validate(range(min = 0))]
    pub minimum_stock: Option<i64>,
    #[validate(range(min = 0.0))]
    pub standard_price: f64,
    #[validate(range(min = 0.0))]
    pub wholesale_cost: f64,
    pub condition: Option<String>,
    pub disabled: bool,
    pub managed: Option<bool>,
    pub category_1: Option<String>,
    pub category_2: Option<String>,
    pub category_3: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub features: Option<serde_json::Value>,
}
