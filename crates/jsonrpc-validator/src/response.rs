//! Response messages: exactly one of `result` or `error`, correlated to a
//! request by id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codes::ApplicationError;
use crate::error::JsonRpcErrorObject;
use crate::field;
use crate::object::{JsonRpcObject, NotAnObject, VersionError};
use crate::validate;

/// A JSON-RPC response carrying either a result or an error payload.
///
/// Wrapping performs no validation; call [`is_valid`](Self::is_valid) before
/// trusting a value that came off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRpcResponse {
    map: Map<String, Value>,
}

impl JsonRpcResponse {
    /// Builds a success response.
    ///
    /// An id that is neither a string nor a number is stored as supplied and
    /// reported through a non-fatal `tracing` diagnostic.
    pub fn success(id: Value, result: Value) -> Self {
        if !id.is_string() && !id.is_number() {
            tracing::debug!(%id, "bad id type");
        }
        let mut map = Map::new();
        map.insert(
            field::JSONRPC.to_owned(),
            Value::String(crate::JSONRPC_VERSION.to_owned()),
        );
        map.insert(field::ID.to_owned(), id);
        map.insert(field::RESULT.to_owned(), result);
        Self { map }
    }

    /// Builds an error response.
    ///
    /// A null id is permitted here, for errors detected before the request id
    /// could be read.
    pub fn failure(error: JsonRpcErrorObject, id: Value) -> Self {
        if !id.is_string() && !id.is_number() && !id.is_null() {
            tracing::debug!(%id, "bad id type");
        }
        let mut map = Map::new();
        map.insert(
            field::JSONRPC.to_owned(),
            Value::String(crate::JSONRPC_VERSION.to_owned()),
        );
        map.insert(field::ID.to_owned(), id);
        map.insert(field::ERROR.to_owned(), Value::Object(error.into_map()));
        Self { map }
    }

    /// The protocol-version field, when present as a string.
    pub fn jsonrpc(&self) -> Option<&str> {
        self.map.get(field::JSONRPC)?.as_str()
    }

    /// The correlation id, if any.
    pub fn id(&self) -> Option<&Value> {
        self.map.get(field::ID)
    }

    /// The result value, if any.
    pub fn result(&self) -> Option<&Value> {
        self.map.get(field::RESULT)
    }

    /// A view of the embedded error payload, when present as an object.
    pub fn error(&self) -> Option<JsonRpcErrorObject> {
        Some(JsonRpcErrorObject::from(
            self.map.get(field::ERROR)?.as_object()?.clone(),
        ))
    }

    /// Fails with `ResponseInvalid` when the version field is malformed,
    /// `RpcVersionUnsupported` when it is a string other than `"2.0"`.
    pub fn check_jsonrpc_field(&self) -> Result<(), ApplicationError> {
        validate::check_jsonrpc_field(&self.map).map_err(|err| match err {
            VersionError::Malformed => ApplicationError::ResponseInvalid,
            VersionError::Unsupported => ApplicationError::RpcVersionUnsupported,
        })
    }

    /// Fails with `ResponseInvalid` unless `id` is a string or an
    /// integer-valued number.
    pub fn check_id_field(&self) -> Result<(), ApplicationError> {
        if validate::id_field_ok(&self.map) {
            Ok(())
        } else {
            Err(ApplicationError::ResponseInvalid)
        }
    }

    /// Fails with `ResultInvalid` when `result` is present and JSON null.
    ///
    /// An explicit null result is rejected even though the wire convention
    /// permits one; void results are expected to omit the field in favor of
    /// an error payload.
    pub fn check_result_field(&self) -> Result<(), ApplicationError> {
        if validate::result_field_ok(&self.map) {
            Ok(())
        } else {
            Err(ApplicationError::ResultInvalid)
        }
    }

    /// Runs the error-payload code and message checks against the embedded
    /// `error` value; the embedded object's key count is not examined.
    pub fn check_error_field(&self) -> Result<(), ApplicationError> {
        validate::check_response_error_field(&self.map)
    }

    pub fn is_jsonrpc_field_valid(&self) -> bool {
        self.check_jsonrpc_field().is_ok()
    }

    pub fn is_id_field_valid(&self) -> bool {
        self.check_id_field().is_ok()
    }

    pub fn is_result_field_valid(&self) -> bool {
        self.check_result_field().is_ok()
    }

    pub fn is_error_field_valid(&self) -> bool {
        self.check_error_field().is_ok()
    }

    /// Whole-message verdict; see [`validate::is_response_object`].
    pub fn is_valid(&self) -> bool {
        validate::is_response_object(&self.map)
    }

    /// Borrow of the underlying key/value mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    /// Consumes the view, yielding the underlying mapping.
    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }
}

impl From<Map<String, Value>> for JsonRpcResponse {
    fn from(map: Map<String, Value>) -> Self {
        Self { map }
    }
}

impl From<JsonRpcObject> for JsonRpcResponse {
    fn from(object: JsonRpcObject) -> Self {
        Self {
            map: object.into_map(),
        }
    }
}

impl TryFrom<Value> for JsonRpcResponse {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            _ => Err(NotAnObject),
        }
    }
}

impl From<JsonRpcResponse> for Value {
    fn from(response: JsonRpcResponse) -> Self {
        Value::Object(response.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ServerError;
    use serde_json::json;

    #[test]
    fn test_constructed_success_response_is_valid() {
        let response = JsonRpcResponse::success(json!(1), json!(19));
        assert_eq!(response.id(), Some(&json!(1)));
        assert_eq!(response.result(), Some(&json!(19)));
        assert!(response.error().is_none());
        assert!(response.is_valid());
    }

    #[test]
    fn test_constructed_error_response_is_valid() {
        let error = JsonRpcErrorObject::new(ServerError::MethodNotFound.code());
        let response = JsonRpcResponse::failure(error, json!("req-7"));
        assert!(response.result().is_none());
        assert_eq!(
            response.error().and_then(|e| e.code()),
            Some(ServerError::MethodNotFound.code())
        );
        assert!(response.is_valid());
    }

    #[test]
    fn test_error_response_with_null_id() {
        let error = JsonRpcErrorObject::new(ServerError::RequestInvalid.code());
        let response = JsonRpcResponse::failure(error, json!(null));
        // A null id fails the id-field rule, so the whole message does too.
        assert_eq!(
            response.check_id_field(),
            Err(ApplicationError::ResponseInvalid)
        );
        assert!(!response.is_valid());
    }

    #[test]
    fn test_null_result_is_rejected() {
        let response = JsonRpcResponse::success(json!(1), json!(null));
        assert_eq!(
            response.check_result_field(),
            Err(ApplicationError::ResultInvalid)
        );
        assert!(!response.is_valid());
    }

    #[test]
    fn test_both_result_and_error_is_invalid() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": 19,
            "error": {"code": -32604, "message": "method was not found"}
        }))
        .unwrap();
        assert!(response.check_result_field().is_ok());
        assert!(response.check_error_field().is_ok());
        assert!(!response.is_valid());
    }

    #[test]
    fn test_neither_result_nor_error_is_invalid() {
        let response: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "extra": 0})).unwrap();
        assert!(!response.is_valid());
    }

    #[test]
    fn test_embedded_error_checks() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 1.5, "message": "m"}
        }))
        .unwrap();
        assert_eq!(
            response.check_error_field(),
            Err(ApplicationError::ErrorCodeUndefined)
        );
        assert!(!response.is_valid());

        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -1, "message": ""}
        }))
        .unwrap();
        assert_eq!(
            response.check_error_field(),
            Err(ApplicationError::ErrorInvalid)
        );
    }

    #[test]
    fn test_version_failures_remap() {
        let response: JsonRpcResponse =
            serde_json::from_value(json!({"id": 1, "result": 19})).unwrap();
        assert_eq!(
            response.check_jsonrpc_field(),
            Err(ApplicationError::ResponseInvalid)
        );

        let response: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "1.0", "id": 1, "result": 19})).unwrap();
        assert_eq!(
            response.check_jsonrpc_field(),
            Err(ApplicationError::RpcVersionUnsupported)
        );
    }
}
