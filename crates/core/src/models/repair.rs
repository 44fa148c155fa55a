use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{Entity, ValidationError};

/// A named shop service billed at a flat price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repair {
    pub repair_id: Uuid,
    pub name: String,
    pub price: f64,
    pub disabled: bool,
    pub description: Option<String>,
}

impl Entity for Repair {
    const NAME: &'static str = "repair";

    fn check(&self) -> Result<(), ValidationError> {
        if !(self.price.is_finite() && self.price >= 0.0) {
            return Err(ValidationError::field(
                Self::NAME,
                "price",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Body for `POST /repairs` and `PUT /repairs/:id`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateRepair {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub disabled: bool,
    pub description: Option<String>,
}
