//! Standalone error payloads, used directly and embedded in responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codes::{self, ApplicationError};
use crate::field;
use crate::object::NotAnObject;
use crate::validate;

/// A JSON-RPC error payload: `code`, `message` and an optional `data` value.
///
/// Wrapping performs no validation; call [`is_valid`](Self::is_valid) before
/// trusting a value that came off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRpcErrorObject {
    map: Map<String, Value>,
}

impl JsonRpcErrorObject {
    /// Builds an error payload whose message is synthesized from `code` via
    /// the code-space string table.
    pub fn new(code: i32) -> Self {
        Self::with_message(code, String::new())
    }

    /// Builds an error payload; an empty `message` is synthesized from
    /// `code`.
    pub fn with_message(code: i32, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            codes::error_string(code).to_owned()
        } else {
            message
        };
        let mut map = Map::new();
        map.insert(field::CODE.to_owned(), Value::from(code));
        map.insert(field::MESSAGE.to_owned(), Value::String(message));
        Self { map }
    }

    /// Builds an error payload carrying an attached `data` value.
    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        let mut error = Self::with_message(code, message);
        error.map.insert(field::DATA.to_owned(), data);
        error
    }

    /// The error code, when present as an integer.
    pub fn code(&self) -> Option<i32> {
        i32::try_from(self.map.get(field::CODE)?.as_i64()?).ok()
    }

    /// The error message, when present as a string.
    pub fn message(&self) -> Option<&str> {
        self.map.get(field::MESSAGE)?.as_str()
    }

    /// The attached data value, if any.
    pub fn data(&self) -> Option<&Value> {
        self.map.get(field::DATA)
    }

    /// Fails with `ErrorInvalid` on a missing or non-numeric code,
    /// `ErrorCodeUndefined` on a number with a fractional part.
    pub fn check_code_field(&self) -> Result<(), ApplicationError> {
        validate::check_error_code_field(&self.map)
    }

    /// Fails with `ErrorInvalid` on a missing, non-string, or empty message.
    pub fn check_message_field(&self) -> Result<(), ApplicationError> {
        validate::check_error_message_field(&self.map)
    }

    pub fn is_code_field_valid(&self) -> bool {
        self.check_code_field().is_ok()
    }

    pub fn is_message_field_valid(&self) -> bool {
        self.check_message_field().is_ok()
    }

    /// Both field checks plus a key count of 2, or 3 with the optional
    /// `data` key, which is accepted with any value.
    pub fn is_valid(&self) -> bool {
        validate::is_error_object(&self.map)
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

impl From<Map<String, Value>> for JsonRpcErrorObject {
    fn from(map: Map<String, Value>) -> Self {
        Self { map }
    }
}

impl TryFrom<Value> for JsonRpcErrorObject {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            _ => Err(NotAnObject),
        }
    }
}

impl From<JsonRpcErrorObject> for Value {
    fn from(error: JsonRpcErrorObject) -> Self {
        Value::Object(error.map)
    }
}
