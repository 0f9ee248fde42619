//! Response-shaping enums and shared structs.
//!
//! Enum variants use Rust `PascalCase` with `#[serde(rename)]` to the
//! `SCREAMING_SNAKE_CASE` wire names.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attribute_value::{AttributeValue, Item};

/// A wire enum name that did not match any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: {value}")]
pub struct ParseEnumError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which item attributes an update returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnValue {
    /// Nothing is returned.
    #[serde(rename = "NONE")]
    None,
    /// All attributes as they were before the update.
    #[serde(rename = "ALL_OLD")]
    AllOld,
    /// Only the updated attributes, as they were before the update.
    #[serde(rename = "UPDATED_OLD")]
    UpdatedOld,
    /// All attributes as they are after the update.
    #[default]
    #[serde(rename = "ALL_NEW")]
    AllNew,
    /// Only the updated attributes, as they are after the update.
    #[serde(rename = "UPDATED_NEW")]
    UpdatedNew,
}

impl ReturnValue {
    /// Returns the wire-format string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::AllOld => "ALL_OLD",
            Self::UpdatedOld => "UPDATED_OLD",
            Self::AllNew => "ALL_NEW",
            Self::UpdatedNew => "UPDATED_NEW",
        }
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnValue {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "ALL_OLD" => Ok(Self::AllOld),
            "UPDATED_OLD" => Ok(Self::UpdatedOld),
            "ALL_NEW" => Ok(Self::AllNew),
            "UPDATED_NEW" => Ok(Self::UpdatedNew),
            _ => Err(ParseEnumError {
                kind: "ReturnValues",
                value: s.to_owned(),
            }),
        }
    }
}

/// Level of consumed-capacity detail in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnConsumedCapacity {
    /// Table and per-index consumption.
    #[serde(rename = "INDEXES")]
    Indexes,
    /// Total consumption only.
    #[serde(rename = "TOTAL")]
    Total,
    /// No capacity information.
    #[default]
    #[serde(rename = "NONE")]
    None,
}

impl ReturnConsumedCapacity {
    /// Returns the wire-format string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indexes => "INDEXES",
            Self::Total => "TOTAL",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for ReturnConsumedCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnConsumedCapacity {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INDEXES" => Ok(Self::Indexes),
            "TOTAL" => Ok(Self::Total),
            "NONE" => Ok(Self::None),
            _ => Err(ParseEnumError {
                kind: "ReturnConsumedCapacity",
                value: s.to_owned(),
            }),
        }
    }
}

/// Whether item collection metrics are returned for a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnItemCollectionMetrics {
    /// Return item collection size estimates.
    #[serde(rename = "SIZE")]
    Size,
    /// No metrics.
    #[default]
    #[serde(rename = "NONE")]
    None,
}

impl ReturnItemCollectionMetrics {
    /// Returns the wire-format string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Size => "SIZE",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for ReturnItemCollectionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnItemCollectionMetrics {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SIZE" => Ok(Self::Size),
            "NONE" => Ok(Self::None),
            _ => Err(ParseEnumError {
                kind: "ReturnItemCollectionMetrics",
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Consumed capacity and metrics
// ---------------------------------------------------------------------------

/// Capacity units consumed by a table or index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Capacity {
    /// Read capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity_units: Option<f64>,
    /// Write capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_capacity_units: Option<f64>,
    /// Total capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
}

/// Capacity consumed by one operation on one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    /// The affected table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Total capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
    /// Read capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity_units: Option<f64>,
    /// Write capacity units consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_capacity_units: Option<f64>,
    /// Capacity consumed by the table itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Capacity>,
    /// Capacity consumed by each local secondary index.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub local_secondary_indexes: HashMap<String, Capacity>,
    /// Capacity consumed by each global secondary index.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub global_secondary_indexes: HashMap<String, Capacity>,
}

/// Size estimate of the item collection touched by a write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemCollectionMetrics {
    /// Partition key value of the item collection.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub item_collection_key: HashMap<String, AttributeValue>,
    /// Lower and upper size estimate in gigabytes.
    #[serde(
        rename = "SizeEstimateRangeGB",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub size_estimate_range_gb: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Batch reads
// ---------------------------------------------------------------------------

/// The keys and read options for one table of a batch read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeysAndAttributes {
    /// Primary keys of the items to read.
    pub keys: Vec<Item>,
    /// Attributes to return; all when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    /// Name placeholders used by `projection_expression`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: HashMap<String, String>,
    /// Strongly consistent read for this table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_return_value_to_all_new() {
        assert_eq!(ReturnValue::default(), ReturnValue::AllNew);
    }

    #[test]
    fn test_should_serialize_enums_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReturnValue::UpdatedOld).unwrap(),
            r#""UPDATED_OLD""#
        );
        assert_eq!(
            serde_json::to_string(&ReturnConsumedCapacity::Indexes).unwrap(),
            r#""INDEXES""#
        );
        assert_eq!(
            serde_json::to_string(&ReturnItemCollectionMetrics::Size).unwrap(),
            r#""SIZE""#
        );
    }

    #[test]
    fn test_should_parse_enums_case_insensitively() {
        assert_eq!("all_old".parse::<ReturnValue>().unwrap(), ReturnValue::AllOld);
        assert_eq!(
            "Total".parse::<ReturnConsumedCapacity>().unwrap(),
            ReturnConsumedCapacity::Total
        );
        assert_eq!(
            "size".parse::<ReturnItemCollectionMetrics>().unwrap(),
            ReturnItemCollectionMetrics::Size
        );
    }

    #[test]
    fn test_should_reject_unknown_enum_names() {
        let err = "EVERYTHING".parse::<ReturnValue>().unwrap_err();
        assert_eq!(err.to_string(), "invalid ReturnValues value: EVERYTHING");
    }

    #[test]
    fn test_should_omit_empty_batch_options() {
        let mut key = Item::new();
        key.insert("pk".to_owned(), AttributeValue::from("a"));
        let keys = KeysAndAttributes {
            keys: vec![key],
            ..KeysAndAttributes::default()
        };
        let json = serde_json::to_value(&keys).unwrap();
        assert_eq!(json, serde_json::json!({"Keys": [{"pk": {"S": "a"}}]}));
    }
}
