//! Request types produced by the builders.
//!
//! Field names are `PascalCase` on the wire. Optional fields are omitted when
//! `None` and empty maps are omitted, so a built request serializes to the
//! minimal JSON payload.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::{AttributeValue, Item};
use crate::types::{
    KeysAndAttributes, ReturnConsumedCapacity, ReturnItemCollectionMetrics, ReturnValue,
};

/// Input for the `GetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemInput {
    /// Table holding the item.
    pub table_name: String,

    /// Primary key of the item.
    pub key: Item,

    /// Attributes to return; all when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Name placeholders used by `projection_expression`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: HashMap<String, String>,

    /// `true` for a strongly consistent read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

/// Input for the `BatchGetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemInput {
    /// Table name to the keys and options read from it.
    pub request_items: HashMap<String, KeysAndAttributes>,
}

/// Input for the `UpdateItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemInput {
    /// Table holding the item.
    pub table_name: String,

    /// Primary key of the item to create or update.
    pub key: Item,

    /// Attributes to return after the update.
    #[serde(default)]
    pub return_values: ReturnValue,

    /// The `SET ... ADD ... REMOVE ... DELETE ...` expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_expression: Option<String>,

    /// Condition that must hold for the update to be applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,

    /// Name placeholders used by the expressions.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: HashMap<String, String>,

    /// Value placeholders used by the expressions.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: HashMap<String, AttributeValue>,

    /// Level of consumed-capacity detail to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,

    /// Whether item collection metrics are returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}
