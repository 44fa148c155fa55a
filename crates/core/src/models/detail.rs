//! Transaction line items.
//!
//! A detail links one transaction to either a repair or an item. Repair
//! details double as the build checklist; item details are the parts used.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::item::Item;
use crate::models::repair::Repair;
use crate::types::Timestamp;
use crate::validation::{Entity, ValidationError};

/// Which kind of detail `GET /transactionDetails/:id` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailType {
    Item,
    Repair,
}

impl DetailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Repair => "repair",
        }
    }
}

/// A part attached to a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub transaction_detail_id: Uuid,
    pub transaction_id: Uuid,
    pub item_id: Uuid,
    pub changed_by: Option<Uuid>,
    pub completed: bool,
    pub quantity: i64,
    pub date_modified: Timestamp,
    #[serde(rename = "Item")]
    pub item: Item,
}

impl Entity for ItemDetail {
    const NAME: &'static str = "item detail";

    fn check(&self) -> Result<(), ValidationError> {
        if self.quantity < 0 {
            return Err(ValidationError::field(Self::NAME, "quantity", "must not be negative"));
        }
        self.item.check()
    }
}

/// A repair attached to a transaction, with its checklist completion flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairDetail {
    pub transaction_detail_id: Uuid,
    pub transaction_id: Uuid,
    pub repair_id: Uuid,
    pub changed_by: Option<Uuid>,
    pub completed: bool,
    pub quantity: i64,
    pub date_modified: Timestamp,
    #[serde(rename = "Repair")]
    pub repair: Repair,
}

impl Entity for RepairDetail {
    const NAME: &'static str = "repair detail";

    fn check(&self) -> Result<(), ValidationError> {
        if self.quantity < 0 {
            return Err(ValidationError::field(Self::NAME, "quantity", "must not be negative"));
        }
        self.repair.check()
    }
}

/// Body for `POST /transactionDetails/:transaction_id`. Exactly one of
/// `item_id` and `repair_id` is set.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransactionDetail {
    pub item_id: Option<Uuid>,
    pub repair_id: Option<Uuid>,
    pub changed_by: Uuid,
    pub quantity: i64,
}

impl CreateTransactionDetail {
    pub fn item(item_id: Uuid, changed_by: Uuid, quantity: i64) -> Self {
        Self {
            item_id: Some(item_id),
            repair_id: None,
            changed_by,
            quantity,
        }
    }

    pub fn repair(repair_id: Uuid, changed_by: Uuid) -> Self {
        Self {
            item_id: None,
            repair_id: Some(repair_id),
            changed_by,
            quantity: 1,
        }
    }
}

/// Body for `PATCH /transactionDetails/:detail_id`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTransactionDetail {
    pub completed: bool,
}

/// The raw detail record returned when a detail is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetailRecord {
    pub transaction_detail_id: Uuid,
    pub transaction_id: Uuid,
    pub item_id: Option<Uuid>,
    pub repair_id: Option<Uuid>,
    pub changed_by: Option<Uuid>,
    pub completed: bool,
    pub quantity: i64,
    pub date_modified: Timestamp,
}

impl Entity for TransactionDetailRecord {
    const NAME: &'static str = "transaction detail";

    fn check(&self) -> Result<(), ValidationError> {
        if self.item_id.is_none() && self.repair_id.is_none() {
            return Err(ValidationError::field(
                Self::NAME,
                "item_id",
                "either item_id or repair_id must be set",
            ));
        }
        Ok(())
    }
}
