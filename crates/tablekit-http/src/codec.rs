//! Request encoding and response decoding for the `awsJson1_0` protocol.
//!
//! Error responses look like:
//!
//! ```json
//! {
//!   "__type": "com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException",
//!   "message": "The conditional request failed"
//! }
//! ```
//!
//! Some servers spell the message field `Message`; both are accepted.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tablekit_model::StoreError;
use tablekit_model::error::ErrorCode;

/// Content type of request and response bodies.
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// Header carrying the CRC32 of the response body.
pub const CRC32_HEADER: &str = "x-amz-crc32";

/// Serialize a request body.
///
/// # Errors
///
/// Returns a `SerializationException` if `input` cannot be encoded.
pub fn encode_request<T: Serialize + ?Sized>(input: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(input).map_err(|e| {
        StoreError::serialization(format!("Cannot encode request: {e}")).with_source(e)
    })
}

/// Decode a response into `T`, or into the [`StoreError`] it reports.
///
/// The body checksum is verified first when the server sent one.
///
/// # Errors
///
/// Returns the store's error for non-2xx responses, an
/// `InternalServerError` on checksum mismatch, and a
/// `SerializationException` when a success body does not parse.
pub fn decode_response<T: DeserializeOwned>(
    status: http::StatusCode,
    headers: &http::HeaderMap,
    body: &[u8],
) -> Result<T, StoreError> {
    verify_crc32(headers, body)?;
    if !status.is_success() {
        return Err(decode_error(status, body));
    }
    serde_json::from_slice(body).map_err(|e| {
        StoreError::serialization(format!("Cannot decode response: {e}")).with_source(e)
    })
}

fn verify_crc32(headers: &http::HeaderMap, body: &[u8]) -> Result<(), StoreError> {
    let Some(value) = headers.get(CRC32_HEADER) else {
        return Ok(());
    };
    let expected: u32 = value
        .to_str()
        .ok()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| StoreError::internal("Malformed x-amz-crc32 header"))?;
    let actual = crc32fast::hash(body);
    if expected != actual {
        return Err(StoreError::internal(format!(
            "Response checksum mismatch: header {expected}, body {actual}"
        )));
    }
    Ok(())
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

fn decode_error(status: http::StatusCode, body: &[u8]) -> StoreError {
    let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
        return StoreError::internal(format!("Unexpected {status} response")).with_status(status);
    };
    let code = parsed
        .error_type
        .as_deref()
        .and_then(ErrorCode::from_name)
        .unwrap_or(ErrorCode::InternalServerError);
    let message = parsed.message.unwrap_or_else(|| code.as_str().to_owned());
    StoreError::with_message(code, message).with_status(status)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tablekit_model::output::GetItemOutput;

    use super::*;

    fn headers_for(body: &[u8]) -> http::HeaderMap {
        let mut headers = http::HeaderMap::new();
        headers.insert(CRC32_HEADER, crc32fast::hash(body).to_string().parse().unwrap());
        headers
    }

    #[test]
    fn test_should_decode_success_body() {
        let body = br#"{"Item":{"pk":{"S":"a"}}}"#;
        let out: GetItemOutput =
            decode_response(http::StatusCode::OK, &headers_for(body), body).unwrap();
        assert_eq!(out.item.unwrap()["pk"].as_s(), Some("a"));
    }

    #[test]
    fn test_should_accept_missing_checksum() {
        let out: Value = decode_response(http::StatusCode::OK, &http::HeaderMap::new(), b"{}")
            .unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn test_should_reject_checksum_mismatch() {
        let err = decode_response::<Value>(http::StatusCode::OK, &headers_for(b"{}"), b"{ }")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalServerError);
    }

    #[test]
    fn test_should_decode_qualified_error_type() {
        let body = br#"{"__type":"com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException","message":"The conditional request failed"}"#;
        let err = decode_response::<Value>(http::StatusCode::BAD_REQUEST, &headers_for(body), body)
            .unwrap_err();
        assert!(err.is_conditional_check_failed());
        assert_eq!(err.message, "The conditional request failed");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_should_accept_capitalized_message() {
        let body = br#"{"__type":"com.amazon.coral.validate#ValidationException","Message":"bad key"}"#;
        let err = decode_response::<Value>(http::StatusCode::BAD_REQUEST, &http::HeaderMap::new(), body)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationException);
        assert_eq!(err.message, "bad key");
    }

    #[test]
    fn test_should_map_unparseable_errors_to_internal() {
        let err = decode_response::<Value>(
            http::StatusCode::BAD_GATEWAY,
            &http::HeaderMap::new(),
            b"<html>",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalServerError);
        assert_eq!(err.status_code, http::StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_should_encode_request() {
        let body = encode_request(&json!({"TableName": "t"})).unwrap();
        assert_eq!(body, br#"{"TableName":"t"}"#);
    }
}
