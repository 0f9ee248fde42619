//! Response types returned by the store for the built requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::Item;
use crate::types::{ConsumedCapacity, ItemCollectionMetrics, KeysAndAttributes};

/// Output of the `GetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    /// The item, or `None` when no item has the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,

    /// Capacity consumed by the read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Output of the `BatchGetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemOutput {
    /// Items read, per table.
    #[serde(default)]
    pub responses: HashMap<String, Vec<Item>>,

    /// Keys the store did not get to; resend them in a later request.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub unprocessed_keys: HashMap<String, KeysAndAttributes>,

    /// Capacity consumed per table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumed_capacity: Vec<ConsumedCapacity>,
}

/// Output of the `UpdateItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemOutput {
    /// Attributes selected by `ReturnValues`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: Item,

    /// Capacity consumed by the write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,

    /// Metrics for the item collection touched by the write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_collection_metrics: Option<ItemCollectionMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute_value::AttributeValue;

    #[test]
    fn test_should_deserialize_missing_item_as_none() {
        let out: GetItemOutput = serde_json::from_str("{}").unwrap();
        assert!(out.item.is_none());
    }

    #[test]
    fn test_should_deserialize_batch_responses() {
        let json = r#"{
            "Responses": {"t": [{"pk": {"S": "a"}}, {"pk": {"S": "b"}}]},
            "UnprocessedKeys": {}
        }"#;
        let out: BatchGetItemOutput = serde_json::from_str(json).unwrap();
        assert_eq!(out.responses["t"].len(), 2);
        assert!(out.unprocessed_keys.is_empty());
    }

    #[test]
    fn test_should_deserialize_update_attributes() {
        let json = r#"{"Attributes": {"rev": {"N": "3"}}}"#;
        let out: UpdateItemOutput = serde_json::from_str(json).unwrap();
        assert_eq!(out.attributes.get("rev"), Some(&AttributeValue::number(3)));
    }
}
