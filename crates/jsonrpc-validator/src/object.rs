//! Base message view: the `jsonrpc` protocol-version field common to all
//! message kinds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::field;
use crate::validate;

/// Failure classes of the protocol-version check.
///
/// Message kinds remap [`Malformed`](VersionError::Malformed) onto their own
/// "invalid object" code; [`Unsupported`](VersionError::Unsupported) stays
/// `RpcVersionUnsupported` everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionError {
    /// The field is missing or not a string.
    Malformed,
    /// The field is a string other than `"2.0"`.
    Unsupported,
}

/// Returned when wrapping a JSON value that is not an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("JSON value is not an object")]
pub struct NotAnObject;

/// A generic JSON-RPC object: any JSON object expected to carry a `jsonrpc`
/// version marker.
///
/// Wrapping performs no validation. A value that came off the wire must pass
/// [`is_valid`](Self::is_valid) before its fields are trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRpcObject {
    map: Map<String, Value>,
}

impl JsonRpcObject {
    /// Builds an object carrying only the supplied protocol version.
    pub fn new(rpc_version: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(field::JSONRPC.to_owned(), Value::String(rpc_version.into()));
        Self { map }
    }

    /// Whether `map` has a `jsonrpc` key. Shared with the raw-value
    /// predicates.
    pub fn jsonrpc_field_exists(map: &Map<String, Value>) -> bool {
        validate::jsonrpc_field_exists(map)
    }

    /// Whether `map`'s `jsonrpc` value is a string. Shared with the raw-value
    /// predicates.
    pub fn jsonrpc_field_is_string(map: &Map<String, Value>) -> bool {
        validate::jsonrpc_field_is_string(map)
    }

    /// The protocol-version field, when present as a string.
    pub fn jsonrpc(&self) -> Option<&str> {
        self.map.get(field::JSONRPC)?.as_str()
    }

    pub fn is_jsonrpc_field_exists(&self) -> bool {
        validate::jsonrpc_field_exists(&self.map)
    }

    pub fn is_jsonrpc_field_is_string(&self) -> bool {
        validate::jsonrpc_field_is_string(&self.map)
    }

    /// Checks the version field, distinguishing malformed from unsupported.
    pub fn check_jsonrpc_field(&self) -> Result<(), VersionError> {
        validate::check_jsonrpc_field(&self.map)
    }

    pub fn is_jsonrpc_field_valid(&self) -> bool {
        self.check_jsonrpc_field().is_ok()
    }

    /// True iff the version field exists, is a string, and equals `"2.0"`.
    pub fn is_valid(&self) -> bool {
        validate::is_jsonrpc_object(&self.map)
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

impl From<Map<String, Value>> for JsonRpcObject {
    fn from(map: Map<String, Value>) -> Self {
        Self { map }
    }
}

impl TryFrom<Value> for JsonRpcObject {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            _ => Err(NotAnObject),
        }
    }
}

impl From<JsonRpcObject> for Value {
    fn from(object: JsonRpcObject) -> Self {
        Value::Object(object.map)
    }
}
