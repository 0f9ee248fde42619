//! Store operations produced by the builders.

use std::fmt;

/// Prefix of the `X-Amz-Target` header value.
pub const TARGET_PREFIX: &str = "DynamoDB_20120810.";

/// The item operations a built request can be sent as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// Get an item by primary key.
    GetItem,
    /// Get several items by primary key.
    BatchGetItem,
    /// Create or update an item.
    UpdateItem,
}

impl StoreOperation {
    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetItem => "GetItem",
            Self::BatchGetItem => "BatchGetItem",
            Self::UpdateItem => "UpdateItem",
        }
    }

    /// Returns the full `X-Amz-Target` header value for this operation.
    #[must_use]
    pub fn target(&self) -> String {
        format!("{TARGET_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
