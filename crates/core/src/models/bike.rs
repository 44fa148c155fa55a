//! Bikes for sale, in refurbishment, or attached to a repair ticket.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::Timestamp;
use crate::validation::{Entity, NumericValue, ValidationError};

/// Largest frame size, in centimetres, the shop records.
pub const MAX_SIZE_CM: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BikeCondition {
    New,
    Refurbished,
    Used,
}

/// A bike record.
///
/// Numeric columns are [`NumericValue`]s: the server may send `"54"` for a
/// size, and that string is kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bike {
    pub bike_id: Uuid,
    pub make: String,
    pub model: String,
    pub description: String,
    pub bike_type: Option<String>,
    pub size_cm: Option<NumericValue>,
    pub condition: Option<BikeCondition>,
    pub price: Option<NumericValue>,
    pub is_available: Option<bool>,
    pub deposit_amount: Option<NumericValue>,
    pub weight_kg: Option<NumericValue>,
    pub reservation_customer_id: Option<Uuid>,
    pub date_created: Option<Timestamp>,
}

impl Bike {
    /// Display name such as `"Trek FX 2"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model).trim().to_string()
    }
}

impl Entity for Bike {
    const NAME: &'static str = "bike";

    fn check(&self) -> Result<(), ValidationError> {
        if let Some(size) = &self.size_cm {
            size.check_range(Self::NAME, "size_cm", 0.0, Some(MAX_SIZE_CM))?;
        }
        if let Some(price) = &self.price {
            price.check_range(Self::NAME, "price", 0.0, None)?;
        }
        if let Some(deposit) = &self.deposit_amount {
            deposit.check_range(Self::NAME, "deposit_amount", 0.0, None)?;
        }
        if let Some(weight) = &self.weight_kg {
            weight.check_range(Self::NAME, "weight_kg", 0.0, None)?;
        }
        Ok(())
    }
}

/// Body for `POST /bikes` and `PUT /bikes/:id`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateBike {
    #[validate(length(min = 1, message = "make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub bike_type: Option<String>,
    #[validate(range(min = 0.0, max = 80.0))]
    pub size_cm: Option<f64>,
    pub condition: Option<BikeCondition>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub is_available: bool,
    #[validate(range(min = 0.0))]
    pub deposit_amount: Option<f64>,
    #[validate(range(min = 0.0))]
    pub weight_kg: Option<f64>,
}
