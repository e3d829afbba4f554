//! Notification messages: a one-way method invocation expecting no response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codes::ServerError;
use crate::field;
use crate::object::{JsonRpcObject, NotAnObject, VersionError};
use crate::validate;

/// Wraps a bare scalar params value into a single-element array.
///
/// Bare scalars are not a legal `params` shape, so the convenience
/// constructors store them as positional parameter lists.
pub(crate) fn wrap_scalar_params(params: Value) -> Value {
    match params {
        scalar @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
            Value::Array(vec![scalar])
        }
        shaped => shaped,
    }
}

/// Maps the shared version check onto notification codes.
pub(crate) fn check_jsonrpc_field(map: &Map<String, Value>) -> Result<(), ServerError> {
    validate::check_jsonrpc_field(map).map_err(|err| match err {
        VersionError::Malformed => ServerError::NotificationInvalid,
        VersionError::Unsupported => ServerError::RpcVersionUnsupported,
    })
}

/// Maps the shared method check onto notification codes.
pub(crate) fn check_method_field(map: &Map<String, Value>) -> Result<(), ServerError> {
    validate::check_method_field(map).map_err(|err| match err {
        validate::MethodError::Invalid => ServerError::NotificationInvalid,
        validate::MethodError::Reserved => ServerError::MethodReserved,
    })
}

pub(crate) fn check_params_field(map: &Map<String, Value>) -> Result<(), ServerError> {
    if validate::params_field_ok(map) {
        Ok(())
    } else {
        Err(ServerError::ParametersInvalid)
    }
}

/// A JSON-RPC notification (a request without an id).
///
/// Wrapping performs no validation; call [`is_valid`](Self::is_valid) before
/// trusting a value that came off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRpcNotification {
    map: Map<String, Value>,
}

impl JsonRpcNotification {
    /// Builds a notification with no parameters.
    pub fn new(method: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(
            field::JSONRPC.to_owned(),
            Value::String(crate::JSONRPC_VERSION.to_owned()),
        );
        map.insert(field::METHOD.to_owned(), Value::String(method.into()));
        Self { map }
    }

    /// Builds a notification carrying `params`.
    ///
    /// A bare scalar (null, boolean, number or string) is wrapped into a
    /// single-element array before storage.
    pub fn with_params(method: impl Into<String>, params: Value) -> Self {
        let mut notification = Self::new(method);
        notification
            .map
            .insert(field::PARAMS.to_owned(), wrap_scalar_params(params));
        notification
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

    /// Fails with `NotificationInvalid` when the version field is malformed,
    /// `RpcVersionUnsupported` when it is a string other than `"2.0"`.
    pub fn check_jsonrpc_field(&self) -> Result<(), ServerError> {
        check_jsonrpc_field(&self.map)
    }

    /// Fails with `NotificationInvalid` on a missing or non-string method,
    /// `MethodReserved` on a method starting with `"rpc."`.
    pub fn check_method_field(&self) -> Result<(), ServerError> {
        check_method_field(&self.map)
    }

    /// Fails with `ParametersInvalid` unless `params` is absent, an object,
    /// or an array.
    pub fn check_params_field(&self) -> Result<(), ServerError> {
        check_params_field(&self.map)
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

    /// Whole-message verdict; see [`validate::is_notification_object`].
    pub fn is_valid(&self) -> bool {
        validate::is_notification_object(&self.map)
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

impl From<Map<String, Value>> for JsonRpcNotification {
    fn from(map: Map<String, Value>) -> Self {
        Self { map }
    }
}

impl From<JsonRpcObject> for JsonRpcNotification {
    fn from(object: JsonRpcObject) -> Self {
        Self {
            map: object.into_map(),
        }
    }
}

impl TryFrom<Value> for JsonRpcNotification {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            _ => Err(NotAnObject),
        }
    }
}

impl From<JsonRpcNotification> for Value {
    fn from(notification: JsonRpcNotification) -> Self {
        Value::Object(notification.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructed_notification_is_valid() {
        let notification = JsonRpcNotification::new("ping");
        assert_eq!(notification.method(), Some("ping"));
        assert!(notification.params().is_none());
        assert!(notification.is_valid());
    }

    #[test]
    fn test_scalar_params_are_wrapped() {
        let notification = JsonRpcNotification::with_params("log", json!("hello"));
        assert_eq!(notification.params(), Some(&json!(["hello"])));
        assert!(notification.is_valid());

        let notification = JsonRpcNotification::with_params("log", json!(null));
        assert_eq!(notification.params(), Some(&json!([null])));
        assert!(notification.is_valid());
    }

    #[test]
    fn test_shaped_params_are_stored_as_is() {
        let notification = JsonRpcNotification::with_params("sum", json!([1, 2]));
        assert_eq!(notification.params(), Some(&json!([1, 2])));
        let notification = JsonRpcNotification::with_params("sum", json!({"a": 1}));
        assert_eq!(notification.params(), Some(&json!({"a": 1})));
    }

    #[test]
    fn test_reserved_method_is_rejected() {
        let notification = JsonRpcNotification::new("rpc.internal");
        assert_eq!(
            notification.check_method_field(),
            Err(ServerError::MethodReserved)
        );
        assert!(!notification.is_valid());
    }

    #[test]
    fn test_missing_method_reports_notification_invalid() {
        let notification: JsonRpcNotification =
            serde_json::from_value(json!({"jsonrpc": "2.0"})).unwrap();
        assert_eq!(
            notification.check_method_field(),
            Err(ServerError::NotificationInvalid)
        );
        assert!(!notification.is_valid());
    }

    #[test]
    fn test_version_failures_remap() {
        let notification: JsonRpcNotification =
            serde_json::from_value(json!({"method": "sum"})).unwrap();
        assert_eq!(
            notification.check_jsonrpc_field(),
            Err(ServerError::NotificationInvalid)
        );

        let notification: JsonRpcNotification =
            serde_json::from_value(json!({"jsonrpc": "1.0", "method": "sum"})).unwrap();
        assert_eq!(
            notification.check_jsonrpc_field(),
            Err(ServerError::RpcVersionUnsupported)
        );
    }

    #[test]
    fn test_serde_round_trip_preserves_validity() {
        let notification = JsonRpcNotification::with_params("sum", json!([1, 2]));
        let text = serde_json::to_string(&notification).unwrap();
        let parsed: JsonRpcNotification = serde_json::from_str(&text).unwrap();
        assert!(parsed.is_valid());
        assert_eq!(parsed, notification);
    }
}
