//! Numbers that may arrive as numeric-looking strings.
//!
//! Some bike columns (size, price, deposit, weight) come back from the API
//! either as JSON numbers or as strings like `"54"`. [`NumericValue`] keeps
//! whichever form was received; [`NumericValue::as_f64`] coerces for checks.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A number as received on the wire: either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericValue {
    /// Coerce to `f64`. Blank strings coerce to `None`, as do strings that
    /// are not finite numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Whether this is a string with nothing but whitespace in it.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Check that the coerced value lies within `[min, max]`.
    ///
    /// Blank strings are treated as an absent value and accepted.
    pub fn check_range(
        &self,
        entity: &'static str,
        field: &'static str,
        min: f64,
        max: Option<f64>,
    ) -> Result<(), ValidationError> {
        if self.is_blank() {
            return Ok(());
        }
        let n = self
            .as_f64()
            .ok_or_else(|| ValidationError::field(entity, field, format!("expected a number, got {self}")))?;
        if n < min {
            return Err(ValidationError::field(
                entity,
                field,
                format!("{n} is below the minimum of {min}"),
            ));
        }
        if let Some(max) = max {
            if n > max {
                return Err(ValidationError::field(
                    entity,
                    field,
                    format!("{n} is above the maximum of {max}"),
                ));
            }
        }
        Ok(())
    }
}

impl From<f64> for NumericValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl std::fmt::Display for NumericValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_number_and_string_forms() {
        let n: NumericValue = serde_json::from_value(json!(54)).unwrap();
        let s: NumericValue = serde_json::from_value(json!("54")).unwrap();
        assert_eq!(n, NumericValue::Number(54.0));
        assert_eq!(s, NumericValue::Text("54".into()));
    }

    #[test]
    fn string_form_serializes_back_as_string() {
        let s = NumericValue::Text("54".into());
        assert_eq!(serde_json::to_value(&s).unwrap(), json!("54"));
    }

    #[test]
    fn as_f64_coerces_numeric_strings() {
        assert_eq!(NumericValue::Text(" 12.5 ".into()).as_f64(), Some(12.5));
        assert_eq!(NumericValue::Text("abc".into()).as_f64(), None);
        assert_eq!(NumericValue::Text("NaN".into()).as_f64(), None);
    }

    #[test]
    fn check_range_bounds() {
        let v = NumericValue::Text("81".into());
        assert!(v.check_range("bike", "size_cm", 0.0, Some(80.0)).is_err());
        let v = NumericValue::Number(-1.0);
        assert!(v.check_range("bike", "price", 0.0, None).is_err());
        let v = NumericValue::Text("80".into());
        assert!(v.check_range("bike", "size_cm", 0.0, Some(80.0)).is_ok());
    }

    #[test]
    fn check_range_accepts_blank_and_rejects_garbage() {
        assert!(NumericValue::Text("  ".into())
            .check_range("bike", "price", 0.0, None)
            .is_ok());
        let err = NumericValue::Text("fifty".into())
            .check_range("bike", "price", 0.0, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "bike.price: expected a number, got \"fifty\"");
    }
}
