//! Shared validation rules and the allocation-free predicate mirror.
//!
//! Every grammar rule lives here exactly once, expressed over a raw
//! `serde_json::Map`. The typed message views and the free functions below
//! are thin façades over this module, so the two APIs cannot drift apart.
//! Free functions produce boolean verdicts; the typed views translate the
//! same outcomes into wire error codes.

use serde_json::{Map, Number, Value};

use crate::codes::ApplicationError;
use crate::field;
use crate::object::VersionError;
use crate::{JSONRPC_VERSION, RESERVED_METHOD_PREFIX};

pub(crate) fn jsonrpc_field_exists(map: &Map<String, Value>) -> bool {
    map.contains_key(field::JSONRPC)
}

pub(crate) fn jsonrpc_field_is_string(map: &Map<String, Value>) -> bool {
    map.get(field::JSONRPC).is_some_and(Value::is_string)
}

pub(crate) fn check_jsonrpc_field(map: &Map<String, Value>) -> Result<(), VersionError> {
    let Some(version) = map.get(field::JSONRPC) else {
        return Err(VersionError::Malformed);
    };
    let Some(version) = version.as_str() else {
        return Err(VersionError::Malformed);
    };
    if version != JSONRPC_VERSION {
        return Err(VersionError::Unsupported);
    }
    Ok(())
}

/// Kind-neutral method-field failure; message kinds map `Invalid` onto their
/// own "invalid object" code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodError {
    Invalid,
    Reserved,
}

pub(crate) fn check_method_field(map: &Map<String, Value>) -> Result<(), MethodError> {
    match map.get(field::METHOD).and_then(Value::as_str) {
        None => Err(MethodError::Invalid),
        Some(method) if method.starts_with(RESERVED_METHOD_PREFIX) => Err(MethodError::Reserved),
        Some(_) => Ok(()),
    }
}

/// `params` is optional; when present it must be an object or an array.
pub(crate) fn params_field_ok(map: &Map<String, Value>) -> bool {
    map.get(field::PARAMS)
        .is_none_or(|params| params.is_object() || params.is_array())
}

pub(crate) fn params_present_and_valid(map: &Map<String, Value>) -> bool {
    map.get(field::PARAMS)
        .is_some_and(|params| params.is_object() || params.is_array())
}

/// The fractional part must be exactly zero; `5.0` qualifies, `5.5` does not.
pub(crate) fn is_integer(value: f64) -> bool {
    value - value.trunc() == 0.0
}

pub(crate) fn integer_valued(number: &Number) -> bool {
    number.is_i64() || number.is_u64() || number.as_f64().is_some_and(is_integer)
}

/// An id must be a string or an integer-valued number.
pub(crate) fn id_field_ok(map: &Map<String, Value>) -> bool {
    match map.get(field::ID) {
        Some(Value::String(_)) => true,
        Some(Value::Number(number)) => integer_valued(number),
        _ => false,
    }
}

pub(crate) fn check_error_code_field(map: &Map<String, Value>) -> Result<(), ApplicationError> {
    match map.get(field::CODE) {
        Some(Value::Number(number)) => {
            if integer_valued(number) {
                Ok(())
            } else {
                Err(ApplicationError::ErrorCodeUndefined)
            }
        }
        _ => Err(ApplicationError::ErrorInvalid),
    }
}

pub(crate) fn check_error_message_field(map: &Map<String, Value>) -> Result<(), ApplicationError> {
    match map.get(field::MESSAGE).and_then(Value::as_str) {
        Some(message) if !message.is_empty() => Ok(()),
        _ => Err(ApplicationError::ErrorInvalid),
    }
}

/// Code and message checks of the embedded `error` value. A missing or
/// non-object `error` fails like an empty error object. The embedded
/// object's key count is not examined here.
pub(crate) fn check_response_error_field(
    map: &Map<String, Value>,
) -> Result<(), ApplicationError> {
    match map.get(field::ERROR) {
        Some(Value::Object(error)) => {
            check_error_code_field(error)?;
            check_error_message_field(error)?;
            Ok(())
        }
        _ => Err(ApplicationError::ErrorInvalid),
    }
}

/// `result` is rejected only when present and JSON null.
pub(crate) fn result_field_ok(map: &Map<String, Value>) -> bool {
    map.get(field::RESULT).is_none_or(|result| !result.is_null())
}

pub(crate) fn result_present_and_valid(map: &Map<String, Value>) -> bool {
    map.get(field::RESULT).is_some_and(|result| !result.is_null())
}

pub(crate) fn error_present_and_valid(map: &Map<String, Value>) -> bool {
    map.contains_key(field::ERROR) && check_response_error_field(map).is_ok()
}

/// Standalone error payload rule: code and message checks plus a key count of
/// 2, or 3 with the optional `data` key.
pub(crate) fn is_error_object(map: &Map<String, Value>) -> bool {
    check_error_code_field(map).is_ok()
        && check_error_message_field(map).is_ok()
        && (map.len() == 2 || map.len() == 3)
}

/// True when the `jsonrpc` field exists, is a string, and equals `"2.0"`.
pub fn is_jsonrpc_field_valid(map: &Map<String, Value>) -> bool {
    check_jsonrpc_field(map).is_ok()
}

/// True when `id` is a string or an integer-valued number.
pub fn is_id_field_valid(map: &Map<String, Value>) -> bool {
    id_field_ok(map)
}

/// True when `method` is a string outside the reserved `rpc.` namespace.
pub fn is_notification_method_field_valid(map: &Map<String, Value>) -> bool {
    check_method_field(map).is_ok()
}

/// True when `params` is absent, an object, or an array.
pub fn is_notification_params_field_valid(map: &Map<String, Value>) -> bool {
    params_field_ok(map)
}

/// Request ids follow the same rule as [`is_id_field_valid`].
pub fn is_request_id_field_valid(map: &Map<String, Value>) -> bool {
    id_field_ok(map)
}

/// Request methods follow the same rule as notifications.
pub fn is_request_method_field_valid(map: &Map<String, Value>) -> bool {
    check_method_field(map).is_ok()
}

/// Request params follow the same rule as notifications.
pub fn is_request_params_field_valid(map: &Map<String, Value>) -> bool {
    params_field_ok(map)
}

/// Response ids follow the same rule as [`is_id_field_valid`].
pub fn is_response_id_field_valid(map: &Map<String, Value>) -> bool {
    id_field_ok(map)
}

/// True unless `result` is present and JSON null.
pub fn is_response_result_field_valid(map: &Map<String, Value>) -> bool {
    result_field_ok(map)
}

/// True when the embedded `error` value passes the code and message checks.
pub fn is_response_error_field_valid(map: &Map<String, Value>) -> bool {
    check_response_error_field(map).is_ok()
}

/// Whole-message rule shared by every kind: a well-formed `"2.0"` version
/// marker.
pub fn is_jsonrpc_object(map: &Map<String, Value>) -> bool {
    check_jsonrpc_field(map).is_ok()
}

/// Notification rule: version, method, and exactly 2 keys, or exactly 3 with
/// `params` present and valid.
pub fn is_notification_object(map: &Map<String, Value>) -> bool {
    is_jsonrpc_object(map)
        && check_method_field(map).is_ok()
        && (map.len() == 2 || (map.len() == 3 && params_present_and_valid(map)))
}

/// Request rule: version, method, and exactly 3 keys, or exactly 4 with
/// `params` present and valid.
pub fn is_request_object(map: &Map<String, Value>) -> bool {
    is_jsonrpc_object(map)
        && check_method_field(map).is_ok()
        && (map.len() == 3 || (map.len() == 4 && params_present_and_valid(map)))
}

/// Response rule: version, id, exactly 3 keys, and exactly one of `result`
/// or `error` present and valid.
pub fn is_response_object(map: &Map<String, Value>) -> bool {
    is_jsonrpc_object(map)
        && id_field_ok(map)
        && map.len() == 3
        && (result_present_and_valid(map) != error_present_and_valid(map))
}
