//! Builder defaults shared by every request made through a [`Store`].
//!
//! [`Store`]: crate::store::Store

use serde::{Deserialize, Serialize};
use tablekit_model::types::ReturnValue;
use typed_builder::TypedBuilder;

/// Defaults applied to freshly constructed builders.
///
/// # Examples
///
/// ```
/// use tablekit_core::config::StoreConfig;
/// use tablekit_model::types::ReturnValue;
///
/// let config = StoreConfig::builder().consistent_read(true).build();
/// assert!(config.consistent_read);
/// assert_eq!(config.return_values, ReturnValue::AllNew);
/// assert!(config.audit_timestamps);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Whether reads start out strongly consistent.
    #[builder(default = false)]
    pub consistent_read: bool,

    /// Initial `ReturnValues` of every update.
    #[builder(default = ReturnValue::AllNew)]
    pub return_values: ReturnValue,

    /// Whether updates inject `createdAt` / `updatedAt` unless disabled per
    /// builder.
    #[builder(default = true)]
    pub audit_timestamps: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            consistent_read: false,
            return_values: ReturnValue::AllNew,
            audit_timestamps: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TABLEKIT_CONSISTENT_READ` | `false` |
    /// | `TABLEKIT_RETURN_VALUES` | `ALL_NEW` |
    /// | `TABLEKIT_AUDIT_TIMESTAMPS` | `true` |
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("TABLEKIT_CONSISTENT_READ") {
            config.consistent_read = parse_bool(&v);
        }
        if let Some(v) = lookup("TABLEKIT_RETURN_VALUES") {
            match v.parse() {
                Ok(rv) => config.return_values = rv,
                Err(e) => tracing::warn!(error = %e, "ignoring TABLEKIT_RETURN_VALUES"),
            }
        }
        if let Some(v) = lookup("TABLEKIT_AUDIT_TIMESTAMPS") {
            config.audit_timestamps = parse_bool(&v);
        }

        config
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(v, "1" | "true" | "yes" | "TRUE" | "YES")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_should_create_default_config() {
        let config = StoreConfig::default();
        assert!(!config.consistent_read);
        assert_eq!(config.return_values, ReturnValue::AllNew);
        assert!(config.audit_timestamps);
        assert_eq!(config, StoreConfig::builder().build());
    }

    #[test]
    fn test_should_read_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("TABLEKIT_CONSISTENT_READ", "true"),
            ("TABLEKIT_RETURN_VALUES", "updated_new"),
            ("TABLEKIT_AUDIT_TIMESTAMPS", "0"),
        ]));
        assert!(config.consistent_read);
        assert_eq!(config.return_values, ReturnValue::UpdatedNew);
        assert!(!config.audit_timestamps);
    }

    #[test]
    fn test_should_ignore_invalid_return_values() {
        let config = StoreConfig::from_lookup(lookup(&[("TABLEKIT_RETURN_VALUES", "bogus")]));
        assert_eq!(config.return_values, ReturnValue::AllNew);
    }
}
