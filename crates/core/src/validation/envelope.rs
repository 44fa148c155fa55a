//! Response envelope validation.
//!
//! Every API response is wrapped as
//! `{ "message": string, "responseObject": object|array, "statusCode": number, "success": bool }`.
//! Validation runs in a fixed order: envelope shape, then the `success`
//! flag, then the payload against the entity's rules. Each stage fails with
//! its own [`ResponseError`] variant.

use serde_json::{Map, Value};

use super::{decode, decode_list, Entity, ValidationError};

/// Which kind of `responseObject` an endpoint promises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    Array,
    Object,
}

impl EnvelopeShape {
    fn label(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// A structurally valid envelope whose payload has not been checked yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnvelope {
    pub message: String,
    pub response_object: Value,
    pub status_code: i64,
    pub success: bool,
}

/// The three ways a well-delivered response can still be unusable.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// The envelope itself is malformed: a client/server contract break.
    #[error("invalid response envelope: {0}")]
    InvalidEnvelope(String),

    /// A well-formed envelope reporting `success: false`.
    #[error("response failure ({status_code}): {message}")]
    Failure { status_code: i64, message: String },

    /// A successful envelope whose payload is not a valid entity.
    #[error("invalid {entity} response: {source}")]
    InvalidPayload {
        entity: &'static str,
        #[source]
        source: ValidationError,
    },
}

impl ResponseError {
    /// Status code carried by a failure envelope, if any.
    pub fn status_code(&self) -> Option<i64> {
        match self {
            Self::Failure { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope checks
// ---------------------------------------------------------------------------

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, ResponseError> {
    obj.get(key)
        .ok_or_else(|| ResponseError::InvalidEnvelope(format!("missing '{key}'")))
}

/// Split an envelope into its parts without looking at the payload kind.
fn split_envelope(value: Value) -> Result<RawEnvelope, ResponseError> {
    let Value::Object(mut obj) = value else {
        return Err(ResponseError::InvalidEnvelope(
            "response body is not a JSON object".into(),
        ));
    };

    let message = required(&obj, "message")?
        .as_str()
        .ok_or_else(|| ResponseError::InvalidEnvelope("'message' is not a string".into()))?
        .to_string();

    let status = required(&obj, "statusCode")?;
    let status_code = status
        .as_i64()
        .or_else(|| status.as_f64().map(|f| f as i64))
        .ok_or_else(|| ResponseError::InvalidEnvelope("'statusCode' is not a number".into()))?;

    let success = required(&obj, "success")?
        .as_bool()
        .ok_or_else(|| ResponseError::InvalidEnvelope("'success' is not a boolean".into()))?;

    let response_object = obj
        .remove("responseObject")
        .ok_or_else(|| ResponseError::InvalidEnvelope("missing 'responseObject'".into()))?;

    Ok(RawEnvelope {
        message,
        response_object,
        status_code,
        success,
    })
}

/// Check the envelope's structure and split it into its parts.
///
/// `responseObject` must be present. Its kind must match `shape` only when
/// `success` is true: failure envelopes routinely carry `null` there and are
/// still well-formed.
pub fn check_envelope(value: Value, shape: EnvelopeShape) -> Result<RawEnvelope, ResponseError> {
    let envelope = split_envelope(value)?;
    if envelope.success && !shape.matches(&envelope.response_object) {
        return Err(ResponseError::InvalidEnvelope(format!(
            "'responseObject' is not an {}",
            shape.label()
        )));
    }
    Ok(envelope)
}

fn ensure_success(envelope: &RawEnvelope) -> Result<(), ResponseError> {
    if envelope.success {
        return Ok(());
    }
    Err(ResponseError::Failure {
        status_code: envelope.status_code,
        message: envelope.message.clone(),
    })
}

// ---------------------------------------------------------------------------
// Full pipelines
// ---------------------------------------------------------------------------

/// Validate an object response and decode its payload as `T`.
pub fn validate_object_response<T: Entity>(value: Value) -> Result<T, ResponseError> {
    let envelope = check_envelope(value, EnvelopeShape::Object)?;
    ensure_success(&envelope)?;
    decode::<T>(envelope.response_object).map_err(|source| ResponseError::InvalidPayload {
        entity: T::NAME,
        source,
    })
}

/// Validate an array response and decode every element as `T`.
pub fn validate_array_response<T: Entity>(value: Value) -> Result<Vec<T>, ResponseError> {
    let envelope = check_envelope(value, EnvelopeShape::Array)?;
    ensure_success(&envelope)?;
    let Value::Array(items) = envelope.response_object else {
        return Err(ResponseError::InvalidEnvelope(
            "'responseObject' is not an array".into(),
        ));
    };
    decode_list::<T>(items).map_err(|source| ResponseError::InvalidPayload {
        entity: T::NAME,
        source,
    })
}

/// Validate the envelope and success flag only, returning the raw payload.
///
/// Used for deletes, whose payload is an empty object or `null`.
pub fn validate_empty_response(value: Value) -> Result<Value, ResponseError> {
    let envelope = split_envelope(value)?;
    ensure_success(&envelope)?;
    Ok(envelope.response_object)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
