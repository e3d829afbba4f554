//! # JSON-RPC 2.0 Message Validation
//!
//! Validators and structured accessors for JSON-RPC 2.0 messages:
//! notifications, requests, responses and error objects, plus an error-code
//! space that packs a taxonomy of error categories into the strictly negative
//! integers without colliding with the protocol's reserved band.
//!
//! ## Features
//! - Exact field-count and field-type rules for all four message kinds
//! - Typed message views over `serde_json::Map` with structured accessors
//! - Allocation-free predicate mirror for validating raw parsed values
//! - Partitioned error-code space with category and string lookup
//! - Adapter from `serde_json` parse failures to the parse category
//!
//! Validation is side-effect-free and never fails on malformed input: every
//! check reports either success or a negative wire code, and every `is_*`
//! predicate reduces that to a boolean. The typed views and the raw-value
//! predicates evaluate one shared rule set and always agree.

pub mod codes;
pub mod error;
pub mod notification;
pub mod object;
pub mod prelude;
pub mod request;
pub mod response;
pub mod validate;

// Re-export main types
pub use codes::{
    ApplicationError, ErrorType, ParseError, ServerError, error_code, error_string, error_type,
};
pub use error::JsonRpcErrorObject;
pub use notification::JsonRpcNotification;
pub use object::{JsonRpcObject, NotAnObject, VersionError};
pub use request::JsonRpcRequest;
pub use response::JsonRpcResponse;
pub use validate::{
    is_id_field_valid, is_jsonrpc_field_valid, is_jsonrpc_object,
    is_notification_method_field_valid, is_notification_object,
    is_notification_params_field_valid, is_request_id_field_valid,
    is_request_method_field_valid, is_request_object, is_request_params_field_valid,
    is_response_error_field_valid, is_response_id_field_valid, is_response_object,
    is_response_result_field_valid,
};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Method names beginning with this prefix are reserved for protocol-internal
/// use and rejected by the method-field checks.
pub const RESERVED_METHOD_PREFIX: &str = "rpc.";

/// Field names of the JSON-RPC 2.0 object grammar.
pub mod field {
    pub const JSONRPC: &str = "jsonrpc";
    pub const ID: &str = "id";
    pub const METHOD: &str = "method";
    pub const PARAMS: &str = "params";
    pub const RESULT: &str = "result";
    pub const ERROR: &str = "error";
    pub const CODE: &str = "code";
    pub const MESSAGE: &str = "message";
    pub const DATA: &str = "data";
}
