//! Decode-and-validate boundary for everything the REST API returns.
//!
//! Structural checks (required fields, nullable unions, nested embedded
//! relations) come from serde. Rules serde cannot express live in
//! [`Entity::check`]. Envelope handling lives in [`envelope`].

pub mod envelope;
pub mod numeric;

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::CoreError;

pub use envelope::{
    check_envelope, validate_array_response, validate_empty_response, validate_object_response,
    EnvelopeShape, RawEnvelope, ResponseError,
};
pub use numeric::NumericValue;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A single entity failed its shape or value checks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The JSON did not have the entity's structure.
    #[error("malformed {entity}: {reason}")]
    Shape { entity: &'static str, reason: String },

    /// The structure was fine but a field value broke a rule.
    #[error("{entity}.{field}: {reason}")]
    Field {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },

    /// An element of a list payload failed.
    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    pub fn field(entity: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Field {
            entity,
            field,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Entity trait
// ---------------------------------------------------------------------------

/// A wire entity that can be decoded from an API payload.
pub trait Entity: DeserializeOwned {
    /// Entity name used in error messages, e.g. `"bike"`.
    const NAME: &'static str;

    /// Semantic checks run after a successful structural decode.
    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Decode a JSON value into `T` and run its semantic checks.
///
/// The returned value is exactly what the server sent: coercions performed
/// by [`Entity::check`] are for checking only.
pub fn decode<T: Entity>(value: Value) -> Result<T, ValidationError> {
    let entity: T = serde_json::from_value(value).map_err(|e| ValidationError::Shape {
        entity: T::NAME,
        reason: e.to_string(),
    })?;
    entity.check()?;
    Ok(entity)
}

/// Decode every element of a list payload, reporting the first failing index.
pub fn decode_list<T: Entity>(values: Vec<Value>) -> Result<Vec<T>, ValidationError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            decode::<T>(value).map_err(|source| ValidationError::Element {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// Type-guard form of [`decode`]: does `value` describe a valid `T`?
pub fn is_valid<T: Entity>(value: &Value) -> bool {
    decode::<T>(value.clone()).is_ok()
}

/// Run `validator` rules on an outgoing request body.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), CoreError> {
    request
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
