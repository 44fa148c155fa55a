//! Shop transactions: repair tickets, retail sales and retrospec bike sales.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::bike::Bike;
use crate::models::customer::Customer;
use crate::models::order_request::OrderRequest;
use crate::types::{DbId, Timestamp};
use crate::validation::{Entity, ValidationError};

// ---------------------------------------------------------------------------
// Transaction type
// ---------------------------------------------------------------------------

pub const TYPE_INPATIENT: &str = "Inpatient";
pub const TYPE_OUTPATIENT: &str = "Outpatient";
pub const TYPE_MERCH: &str = "Merch";
pub const TYPE_RETROSPEC: &str = "Retrospec";

/// All valid transaction type strings.
pub const VALID_TRANSACTION_TYPES: &[&str] =
    &[TYPE_INPATIENT, TYPE_OUTPATIENT, TYPE_MERCH, TYPE_RETROSPEC];

/// The kind of work a transaction represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Inpatient,
    Outpatient,
    Merch,
    Retrospec,
}

impl TransactionType {
    /// Parse a wire value. Matching is case-insensitive.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            "inpatient" => Ok(Self::Inpatient),
            "outpatient" => Ok(Self::Outpatient),
            "merch" => Ok(Self::Merch),
            "retrospec" => Ok(Self::Retrospec),
            _ => Err(CoreError::Validation(format!(
                "Invalid transaction type '{s}'. Must be one of: {}",
                VALID_TRANSACTION_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inpatient => TYPE_INPATIENT,
            Self::Outpatient => TYPE_OUTPATIENT,
            Self::Merch => TYPE_MERCH,
            Self::Retrospec => TYPE_RETROSPEC,
        }
    }
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// The independent status booleans carried by every transaction.
///
/// View membership depends on specific combinations of these, so they are
/// kept as raw booleans rather than folded into one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFlags {
    pub is_completed: bool,
    pub is_paid: bool,
    pub is_refurb: bool,
    pub is_urgent: bool,
    pub is_nuclear: bool,
    pub is_beer_bike: bool,
    pub is_employee: bool,
    pub is_reserved: bool,
    pub is_waiting_on_email: bool,
}

/// Coarse lifecycle derived from the completed/paid pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Open,
    PaidOpen,
    CompletedUnpaid,
    CompletedPaid,
}

impl TransactionFlags {
    pub fn lifecycle(&self) -> Lifecycle {
        match (self.is_completed, self.is_paid) {
            (false, false) => Lifecycle::Open,
            (false, true) => Lifecycle::PaidOpen,
            (true, false) => Lifecycle::CompletedUnpaid,
            (true, true) => Lifecycle::CompletedPaid,
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_num: DbId,
    pub transaction_id: Uuid,
    pub date_created: Timestamp,
    pub transaction_type: String,
    pub customer_id: Option<Uuid>,
    pub bike_id: Option<Uuid>,
    pub total_cost: f64,
    pub description: Option<String>,
    #[serde(flatten)]
    pub flags: TransactionFlags,
    pub date_completed: Option<Timestamp>,
    #[serde(rename = "Customer", skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(rename = "Bike", skip_serializing_if = "Option::is_none")]
    pub bike: Option<Bike>,
    #[serde(rename = "OrderRequests", skip_serializing_if = "Option::is_none")]
    pub order_requests: Option<Vec<OrderRequest>>,
}

impl Transaction {
    pub fn is_retrospec(&self) -> bool {
        self.transaction_type.eq_ignore_ascii_case(TYPE_RETROSPEC)
    }

    /// Parsed transaction type, if the server sent a known one.
    pub fn kind(&self) -> Option<TransactionType> {
        TransactionType::from_str_value(&self.transaction_type).ok()
    }

    pub fn order_requests(&self) -> &[OrderRequest] {
        self.order_requests.as_deref().unwrap_or_default()
    }
}

impl Entity for Transaction {
    const NAME: &'static str = "transaction";

    fn check(&self) -> Result<(), ValidationError> {
        if !self.total_cost.is_finite() {
            return Err(ValidationError::field(
                Self::NAME,
                "total_cost",
                "must be a finite number",
            ));
        }
        if let Some(bike) = &self.bike {
            bike.check()?;
        }
        if let Some(customer) = &self.customer {
            customer.check()?;
        }
        for request in self.order_requests() {
            request.check()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Minimal body for `POST /transactions`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransaction {
    pub transaction_type: String,
    pub customer_id: Uuid,
    pub is_employee: bool,
}

/// Full-record replace body for `PUT /transactions/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTransaction {
    pub transaction_type: String,
    pub customer_id: Option<Uuid>,
    pub bike_id: Option<Uuid>,
    pub total_cost: f64,
    pub description: Option<String>,
    #[serde(flatten)]
    pub flags: TransactionFlags,
    pub date_completed: Option<Timestamp>,
}

impl From<&Transaction> for UpdateTransaction {
    fn from(t: &Transaction) -> Self {
        Self {
            transaction_type: t.transaction_type.clone(),
            customer_id: t.customer_id,
            bike_id: t.bike_id,
            total_cost: t.total_cost,
            description: t.description.clone(),
            flags: t.flags,
            date_completed: t.date_completed,
        }
    }
}

/// Body for `PATCH /transactions/:id`; the only partial update.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDescriptionPatch {
    pub description: String,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Whiteboard header counts from `/summary/transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub quantity_incomplete: i64,
    pub quantity_waiting_on_pickup: i64,
    pub quantity_waiting_on_safety_check: i64,
}

impl Entity for TransactionSummary {
    const NAME: &'static str = "transaction summary";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{decode, NumericValue};
    use serde_json::json;

    fn transaction_json() -> serde_json::Value {
        json!({
            "transaction_num": 1042,
            "transaction_id": "9b2f7c3e-1a4d-4e5f-8a6b-7c8d9e0f1a2b",
            "date_created": "2025-03-01T15:30:00Z",
            "transaction_type": "retrospec",
            "customer_id": "3e1b2c4d-5f6a-4b7c-8d9e-0a1b2c3d4e5f",
            "bike_id": null,
            "total_cost": 0,
            "description": null,
            "is_completed": false,
            "is_paid": false,
            "is_refurb": true,
            "is_urgent": false,
            "is_nuclear": false,
            "is_beer_bike": false,
            "is_employee": false,
            "is_reserved": false,
            "is_waiting_on_email": false,
            "date_completed": null,
            "Customer": {
                "customer_id": "3e1b2c4d-5f6a-4b7c-8d9e-0a1b2c3d4e5f",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@rice.edu",
                "phone": "7135550100"
            },
            "Bike": {
                "bike_id": "0f8fad5b-d9cb-469f-a165-70867728950e",
                "make": "Retrospec",
                "model": "Harper",
                "description": "Single speed",
                "size_cm": "54"
            }
        })
    }

    #[test]
    fn decodes_flattened_flags_and_embedded_relations() {
        let t: Transaction = decode(transaction_json()).unwrap();
        assert!(t.flags.is_refurb);
        assert!(t.is_retrospec());
        assert_eq!(t.kind(), Some(TransactionType::Retrospec));
        assert_eq!(t.customer.as_ref().unwrap().first_name, "Ada");
        assert_eq!(
            t.bike.as_ref().unwrap().size_cm,
            Some(NumericValue::Text("54".into()))
        );
        assert!(t.order_requests().is_empty());
    }

    #[test]
    fn missing_flag_is_rejected() {
        let mut value = transaction_json();
        value.as_object_mut().unwrap().remove("is_paid");
        assert!(decode::<Transaction>(value).is_err());
    }

    #[test]
    fn embedded_bike_is_checked() {
        let mut value = transaction_json();
        value["Bike"]["size_cm"] = json!("120");
        assert!(decode::<Transaction>(value).is_err());
    }

    #[test]
    fn transaction_type_parses_case_insensitively() {
        assert_eq!(
            TransactionType::from_str_value("MERCH").unwrap(),
            TransactionType::Merch
        );
        assert!(TransactionType::from_str_value("bicycle").is_err());
        for t in VALID_TRANSACTION_TYPES {
            assert_eq!(TransactionType::from_str_value(t).unwrap().as_str(), *t);
        }
    }

    #[test]
    fn lifecycle_distinguishes_completed_paid_from_unpaid() {
        let mut flags = TransactionFlags {
            is_completed: true,
            ..Default::default()
        };
        assert_eq!(flags.lifecycle(), Lifecycle::CompletedUnpaid);
        flags.is_paid = true;
        assert_eq!(flags.lifecycle(), Lifecycle::CompletedPaid);
        assert_eq!(TransactionFlags::default().lifecycle(), Lifecycle::Open);
    }

    #[test]
    fn update_body_carries_full_record() {
        let t: Transaction = decode(transaction_json()).unwrap();
        let body = serde_json::to_value(UpdateTransaction::from(&t)).unwrap();
        assert_eq!(body["is_refurb"], json!(true));
        assert_eq!(body["transaction_type"], json!("retrospec"));
        assert!(body.get("Customer").is_none());
    }
}
