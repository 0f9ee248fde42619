//! Store-side error types.
//!
//! Error responses carry a JSON body with a `__type` field holding the
//! fully-qualified error name, e.g.
//! `com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException`.

use std::fmt;

/// Namespace prefix of fully-qualified store error types.
const ERROR_NAMESPACE: &str = "com.amazonaws.dynamodb.v20120810#";

/// Well-known store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Table not found.
    ResourceNotFoundException,
    /// Condition expression evaluated to false.
    ConditionalCheckFailedException,
    /// Transaction conflict on the item.
    TransactionConflictException,
    /// Item collection size limit exceeded.
    ItemCollectionSizeLimitExceededException,
    /// Provisioned throughput exceeded.
    ProvisionedThroughputExceededException,
    /// Request limit exceeded.
    RequestLimitExceeded,
    /// Request failed validation.
    #[default]
    ValidationException,
    /// Request body could not be parsed.
    SerializationException,
    /// Internal server error.
    InternalServerError,
    /// Access denied.
    AccessDeniedException,
    /// Unknown operation or client.
    UnrecognizedClientException,
}

impl ErrorCode {
    const ALL: [Self; 11] = [
        Self::ResourceNotFoundException,
        Self::ConditionalCheckFailedException,
        Self::TransactionConflictException,
        Self::ItemCollectionSizeLimitExceededException,
        Self::ProvisionedThroughputExceededException,
        Self::RequestLimitExceeded,
        Self::ValidationException,
        Self::SerializationException,
        Self::InternalServerError,
        Self::AccessDeniedException,
        Self::UnrecognizedClientException,
    ];

    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ConditionalCheckFailedException => "ConditionalCheckFailedException",
            Self::TransactionConflictException => "TransactionConflictException",
            Self::ItemCollectionSizeLimitExceededException => {
                "ItemCollectionSizeLimitExceededException"
            }
            Self::ProvisionedThroughputExceededException => {
                "ProvisionedThroughputExceededException"
            }
            Self::RequestLimitExceeded => "RequestLimitExceeded",
            Self::ValidationException => "ValidationException",
            Self::SerializationException => "SerializationException",
            Self::InternalServerError => "InternalServerError",
            Self::AccessDeniedException => "AccessDeniedException",
            Self::UnrecognizedClientException => "UnrecognizedClientException",
        }
    }

    /// Returns the fully-qualified error type used in the `__type` field.
    #[must_use]
    pub fn error_type(&self) -> String {
        match self {
            Self::ValidationException => "com.amazon.coral.validate#ValidationException".to_owned(),
            other => format!("{ERROR_NAMESPACE}{}", other.as_str()),
        }
    }

    /// Parse an error code from either its short name or a fully-qualified
    /// `namespace#Name` type string.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.rsplit_once('#').map_or(name, |(_, short)| short);
        Self::ALL.into_iter().find(|code| code.as_str() == short)
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error reported by the store, or by the transport on its way there.
///
/// Builders never translate these: whatever the client returns is handed to
/// the caller as is.
#[derive(Debug)]
pub struct StoreError {
    /// The error code.
    pub code: ErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl StoreError {
    /// Create an error from a code, using the code name as message.
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.as_str())
    }

    /// Create an error with a custom message.
    #[must_use]
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Override the HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status_code: http::StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns `true` when a condition expression (e.g. a revision check)
    /// rejected the write.
    #[must_use]
    pub fn is_conditional_check_failed(&self) -> bool {
        self.code == ErrorCode::ConditionalCheckFailedException
    }

    /// Condition expression evaluated to false.
    #[must_use]
    pub fn conditional_check_failed(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConditionalCheckFailedException, message)
    }

    /// Validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationException, message)
    }

    /// Serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::SerializationException, message)
    }

    /// Internal error, also used for transport failures.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalServerError, message)
    }
}

/// Create a [`StoreError`] from an error code name.
///
/// # Examples
///
/// ```
/// use tablekit_model::store_error;
/// use tablekit_model::error::ErrorCode;
///
/// let err = store_error!(ValidationException);
/// assert_eq!(err.code, ErrorCode::ValidationException);
///
/// let err = store_error!(ResourceNotFoundException, "Table not found");
/// assert_eq!(err.message, "Table not found");
/// ```
#[macro_export]
macro_rules! store_error {
    ($code:ident) => {
        $crate::error::StoreError::new($crate::error::ErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::StoreError::with_message($crate::error::ErrorCode::$code, $msg)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_short_and_qualified_names() {
        assert_eq!(
            ErrorCode::from_name("ConditionalCheckFailedException"),
            Some(ErrorCode::ConditionalCheckFailedException)
        );
        assert_eq!(
            ErrorCode::from_name(
                "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException"
            ),
            Some(ErrorCode::ResourceNotFoundException)
        );
        assert_eq!(ErrorCode::from_name("NoSuchThing"), None);
    }

    #[test]
    fn test_should_qualify_error_types() {
        assert_eq!(
            ErrorCode::ConditionalCheckFailedException.error_type(),
            "com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException"
        );
        assert_eq!(
            ErrorCode::ValidationException.error_type(),
            "com.amazon.coral.validate#ValidationException"
        );
    }

    #[test]
    fn test_should_roundtrip_every_code_through_its_type() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_name(&code.error_type()), Some(code));
        }
    }

    #[test]
    fn test_should_default_status_codes() {
        assert_eq!(
            StoreError::internal("boom").status_code,
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            StoreError::validation("bad").status_code,
            http::StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_should_flag_conditional_check_failures() {
        assert!(StoreError::conditional_check_failed("rev changed").is_conditional_check_failed());
        assert!(!StoreError::validation("bad").is_conditional_check_failed());
    }
}
