//! Request messages: a notification plus a correlation id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codes::ServerError;
use crate::field;
use crate::notification::{self, JsonRpcNotification};
use crate::object::{JsonRpcObject, NotAnObject};
use crate::validate;

/// Non-fatal diagnostic for ids that are neither strings nor numbers.
///
/// Construction from typed arguments is best effort; callers needing
/// rejection must run the validator afterwards.
fn debug_bad_id(id: &Value) {
    if !id.is_string() && !id.is_number() {
        tracing::debug!(%id, "bad id type");
    }
}

/// A JSON-RPC request, expecting exactly one correlated response.
///
/// Wrapping performs no validation; call [`is_valid`](Self::is_valid) before
/// trusting a value that came off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRpcRequest {
    map: Map<String, Value>,
}

impl JsonRpcRequest {
    /// Builds a request with no parameters.
    pub fn new(method: impl Into<String>, id: Value) -> Self {
        Self::from_notification(JsonRpcNotification::new(method), id)
    }

    /// Builds a request carrying `params`; bare scalars are wrapped into a
    /// single-element array as for notifications.
    pub fn with_params(method: impl Into<String>, id: Value, params: Value) -> Self {
        Self::from_notification(JsonRpcNotification::with_params(method, params), id)
    }

    /// Promotes a notification by attaching a correlation id.
    ///
    /// An id that is neither a string nor a number is stored as supplied and
    /// reported through a non-fatal `tracing` diagnostic.
    pub fn from_notification(notification: JsonRpcNotification, id: Value) -> Self {
        debug_bad_id(&id);
        let mut map = notification.into_map();
        map.insert(field::ID.to_owned(), id);
        Self { map }
    }

    /// The protocol-version field, when present as a string.
    pub fn jsonrpc(&self) -> Option<&str> {
        self.map.get(field::JSONRPC)?.as_str()
    }

    /// The method name, when present as a string.
    pub fn method(&self) -> Option<&str> {
        self.map.get(field::METHOD)?.as_str()
    }

    /// The params value, if any.
    pub fn params(&self) -> Option<&Value> {
        self.map.get(field::PARAMS)
    }

    /// The correlation id, if any.
    pub fn id(&self) -> Option<&Value> {
        self.map.get(field::ID)
    }

    /// Remaps `NotificationInvalid` from the notification rule set to
    /// `RequestInvalid`; other codes pass through unchanged.
    fn remap(err: ServerError) -> ServerError {
        match err {
            ServerError::NotificationInvalid => ServerError::RequestInvalid,
            other => other,
        }
    }

    /// Fails with `RequestInvalid` unless `id` is a string or an
    /// integer-valued number (zero fractional part, no epsilon tolerance).
    pub fn check_id_field(&self) -> Result<(), ServerError> {
        if validate::id_field_ok(&self.map) {
            Ok(())
        } else {
            Err(ServerError::RequestInvalid)
        }
    }

    /// Notification rule with `NotificationInvalid` remapped to
    /// `RequestInvalid`.
    pub fn check_jsonrpc_field(&self) -> Result<(), ServerError> {
        notification::check_jsonrpc_field(&self.map).map_err(Self::remap)
    }

    /// Notification rule with `NotificationInvalid` remapped to
    /// `RequestInvalid`; `MethodReserved` passes through.
    pub fn check_method_field(&self) -> Result<(), ServerError> {
        notification::check_method_field(&self.map).map_err(Self::remap)
    }

    /// Notification rule; `ParametersInvalid` passes through.
    pub fn check_params_field(&self) -> Result<(), ServerError> {
        notification::check_params_field(&self.map).map_err(Self::remap)
    }

    pub fn is_id_field_valid(&self) -> bool {
        self.check_id_field().is_ok()
    }

    pub fn is_jsonrpc_field_valid(&self) -> bool {
        self.check_jsonrpc_field().is_ok()
    }

    pub fn is_method_field_valid(&self) -> bool {
        self.check_method_field().is_ok()
    }

    pub fn is_params_field_valid(&self) -> bool {
        self.check_params_field().is_ok()
    }

    /// Whole-message verdict; see [`validate::is_request_object`].
    pub fn is_valid(&self) -> bool {
        validate::is_request_object(&self.map)
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

impl From<Map<String, Value>> for JsonRpcRequest {
    fn from(map: Map<String, Value>) -> Self {
        Self { map }
    }
}

impl From<JsonRpcObject> for JsonRpcRequest {
    fn from(object: JsonRpcObject) -> Self {
        Self {
            map: object.into_map(),
        }
    }
}

impl TryFrom<Value> for JsonRpcRequest {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            _ => Err(NotAnObject),
        }
    }
}

impl From<JsonRpcRequest> for Value {
    fn from(request: JsonRpcRequest) -> Self {
        Value::Object(request.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructed_request_is_valid() {
        let request = JsonRpcRequest::with_params("subtract", json!(1), json!([42, 23]));
        assert_eq!(request.method(), Some("subtract"));
        assert_eq!(request.id(), Some(&json!(1)));
        assert_eq!(request.params(), Some(&json!([42, 23])));
        assert!(request.is_valid());
    }

    #[test]
    fn test_promoting_a_notification() {
        let notification = JsonRpcNotification::new("ping");
        let request = JsonRpcRequest::from_notification(notification, json!("req-1"));
        assert_eq!(request.id(), Some(&json!("req-1")));
        assert!(request.is_valid());
    }

    #[test]
    fn test_id_boundaries() {
        assert!(JsonRpcRequest::new("m", json!(5.0)).check_id_field().is_ok());
        assert!(JsonRpcRequest::new("m", json!("abc")).check_id_field().is_ok());
        assert_eq!(
            JsonRpcRequest::new("m", json!(5.5)).check_id_field(),
            Err(ServerError::RequestInvalid)
        );
        assert_eq!(
            JsonRpcRequest::new("m", json!(true)).check_id_field(),
            Err(ServerError::RequestInvalid)
        );
    }

    #[test]
    fn test_bad_id_type_constructs_anyway() {
        // The diagnostic is a log event, never a rejection.
        let request = JsonRpcRequest::new("m", json!(true));
        assert_eq!(request.id(), Some(&json!(true)));
    }

    #[test]
    fn test_version_and_method_failures_remap_to_request_invalid() {
        let request: JsonRpcRequest =
            serde_json::from_value(json!({"method": "sum", "id": 1})).unwrap();
        assert_eq!(
            request.check_jsonrpc_field(),
            Err(ServerError::RequestInvalid)
        );

        let request: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1})).unwrap();
        assert_eq!(
            request.check_method_field(),
            Err(ServerError::RequestInvalid)
        );
    }

    #[test]
    fn test_reserved_method_passes_through_unchanged() {
        let request = JsonRpcRequest::new("rpc.internal", json!(1));
        assert_eq!(
            request.check_method_field(),
            Err(ServerError::MethodReserved)
        );
    }

    #[test]
    fn test_version_mismatch_passes_through_unchanged() {
        let request: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "1.0", "method": "sum", "id": 1})).unwrap();
        assert_eq!(
            request.check_jsonrpc_field(),
            Err(ServerError::RpcVersionUnsupported)
        );
    }

    #[test]
    fn test_scalar_params_invalid_when_wrapped_from_wire() {
        let request: JsonRpcRequest = serde_json::from_value(
            json!({"jsonrpc": "2.0", "method": "sum", "id": 1, "params": 5}),
        )
        .unwrap();
        assert_eq!(
            request.check_params_field(),
            Err(ServerError::ParametersInvalid)
        );
        assert!(!request.is_valid());
    }
}
