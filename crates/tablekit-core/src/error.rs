//! Builder error types.
//!
//! Every builder error is raised at the call that breaks a rule, never deferred
//! to `execute()`. Store-side failures are not part of this type: they come
//! back from the client as [`tablekit_model::StoreError`], untouched.

/// Errors raised while configuring a request builder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// A mutator was called after the request was finalized, or a setting
    /// cannot change once the builder exists.
    #[error("{0}")]
    Configuration(String),

    /// A blank table name, empty key, blank condition or blank timestamp.
    #[error("{0}")]
    Validation(String),

    /// A batch-only method was used on a single-item builder or vice versa.
    #[error("{0}")]
    ModeMismatch(String),
}

impl BuilderError {
    /// Mutator called on an updater whose request was already built.
    pub(crate) fn finalized(method: &str) -> Self {
        Self::Configuration(format!(
            "Cannot call Updater.{method}() after you called Updater.execute(). \
             Call {method}() before calling execute()."
        ))
    }
}

/// Convenience result type for builder operations.
pub type BuilderResult<T> = Result<T, BuilderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_name_method_in_finalized_error() {
        let err = BuilderError::finalized("mark");
        assert_eq!(
            err.to_string(),
            "Cannot call Updater.mark() after you called Updater.execute(). \
             Call mark() before calling execute()."
        );
    }
}
