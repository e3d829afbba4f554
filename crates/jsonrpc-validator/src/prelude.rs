//! # JSON-RPC Validation Prelude
//!
//! Convenient re-exports of the most commonly used items.
//!
//! ```rust
//! use jsonrpc_validator::prelude::*;
//! ```

// Message views
pub use crate::error::JsonRpcErrorObject;
pub use crate::notification::JsonRpcNotification;
pub use crate::object::{JsonRpcObject, NotAnObject, VersionError};
pub use crate::request::JsonRpcRequest;
pub use crate::response::JsonRpcResponse;

// Error-code space
pub use crate::codes::{
    ApplicationError, ERROR_UNSPECIFIED, ErrorType, ParseError, ServerError, error_code,
    error_string, error_type,
};

// Raw-value predicates
pub use crate::validate::{
    is_jsonrpc_object, is_notification_object, is_request_object, is_response_object,
};

pub use crate::{JSONRPC_VERSION, RESERVED_METHOD_PREFIX};
