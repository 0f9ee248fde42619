//! Convert serde values into typed attribute values.
//!
//! Lets callers hand the updater a plain `Serialize` struct instead of
//! building attribute maps by hand.

use serde::Serialize;
use serde_json::Value;
use tablekit_model::AttributeValue;

use crate::error::{BuilderError, BuilderResult};

/// Convert a JSON value into its attribute value.
///
/// `null` becomes `NULL`, booleans `BOOL`, numbers `N`, strings `S`, arrays
/// `L` and objects `M`.
#[must_use]
pub fn to_attribute_value(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::null(),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(items) => AttributeValue::L(items.into_iter().map(to_attribute_value).collect()),
        Value::Object(map) => AttributeValue::M(
            map.into_iter()
                .map(|(k, v)| (k, to_attribute_value(v)))
                .collect(),
        ),
    }
}

/// Serialize `value` into `(attribute, value)` pairs, ordered by attribute
/// name.
///
/// Top-level `null` fields, such as an `Option::None`, are left out: an
/// absent field means "leave the stored attribute alone". Nested nulls are
/// kept as `NULL`.
///
/// # Errors
///
/// Returns [`BuilderError::Validation`] if `value` fails to serialize or does
/// not serialize to a map.
pub fn to_item<T: Serialize + ?Sized>(value: &T) -> BuilderResult<Vec<(String, AttributeValue)>> {
    let json = serde_json::to_value(value)
        .map_err(|e| BuilderError::Validation(format!("Cannot marshal item: {e}")))?;
    let Value::Object(map) = json else {
        return Err(BuilderError::Validation(
            "An item must serialize to a map of attributes.".to_owned(),
        ));
    };
    Ok(map
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k, to_attribute_value(v)))
        .collect())
}
