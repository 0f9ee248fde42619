//! Keys and the checks every builder applies to table names and keys.

use tablekit_model::{AttributeValue, Item};

use crate::error::{BuilderError, BuilderResult};

/// Collect `(name, value)` pairs into a key or item map.
///
/// # Examples
///
/// ```
/// use tablekit_core::key::into_item;
/// use tablekit_model::AttributeValue;
///
/// let key = into_item([("pk", "user#1"), ("sk", "profile")]);
/// assert_eq!(key["pk"], AttributeValue::S("user#1".to_owned()));
/// ```
pub fn into_item<I, K, V>(pairs: I) -> Item
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttributeValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

pub(crate) fn validate_table_name(name: &str) -> BuilderResult<()> {
    if name.trim().is_empty() {
        return Err(BuilderError::Validation(
            "The table name must be a non-empty string.".to_owned(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_key(key: &Item) -> BuilderResult<()> {
    if key.is_empty() {
        return Err(BuilderError::Validation(
            "The key must be a non-empty map of attribute values.".to_owned(),
        ));
    }
    Ok(())
}
