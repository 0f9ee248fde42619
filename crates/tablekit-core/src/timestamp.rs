//! Audit timestamps injected by the updater.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{BuilderError, BuilderResult};

/// Attribute holding the creation time of an item.
pub const CREATED_AT: &str = "createdAt";

/// Attribute holding the last modification time of an item.
pub const UPDATED_AT: &str = "updatedAt";

/// Format an instant the way audit attributes are stored:
/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-02T03:04:05.000Z`.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A caller-supplied audit timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditValue {
    /// An already formatted timestamp, stored verbatim.
    Text(String),
    /// An instant, formatted with [`format_timestamp`].
    Instant(DateTime<Utc>),
}

impl AuditValue {
    /// Normalize to the stored string form, rejecting blank text.
    pub(crate) fn normalize(self, attr: &str) -> BuilderResult<String> {
        match self {
            Self::Text(text) if text.trim().is_empty() => Err(BuilderError::Validation(format!(
                "The {attr} value must not be empty."
            ))),
            Self::Text(text) => Ok(text),
            Self::Instant(at) => Ok(format_timestamp(at)),
        }
    }
}

impl From<&str> for AuditValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AuditValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for AuditValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value)
    }
}

/// Injection state of one audit attribute.
///
/// `processed` flips to `true` the first time an item payload is merged and
/// never flips back, so the attribute is injected at most once per builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuditTimestamp {
    pub(crate) enabled: bool,
    pub(crate) processed: bool,
    pub(crate) value: Option<String>,
}

impl AuditTimestamp {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            processed: false,
            value: None,
        }
    }

    /// Whether the next payload merge should inject this attribute.
    pub(crate) fn is_pending(&self, supplied_by_payload: bool) -> bool {
        self.enabled && !self.processed && !supplied_by_payload
    }

    /// The configured value, or the current instant.
    pub(crate) fn resolve(&self) -> String {
        self.value
            .clone()
            .unwrap_or_else(|| format_timestamp(Utc::now()))
    }
}
