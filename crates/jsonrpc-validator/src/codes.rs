//! Error-code space: error categories packed into the strictly negative
//! integers, compatible with the JSON-RPC 2.0 reserved band.
//!
//! Each category owns a contiguous sub-range of negative codes, identified by
//! the magnitude of its closest-to-zero code. The band `-32768..=-32000`
//! matches the range the JSON-RPC 2.0 convention reserves for predefined
//! errors; the small-magnitude codes below zero are open for
//! application-defined extensions.

use std::fmt;

use serde_json::error::Category;

/// Category of a wire error code, ordered by increasing offset magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    ApplicationExtended,
    ServerExtended,
    Transport,
    System,
    Application,
    Server,
    Parse,
}

/// Number of categories in the code space.
pub const ERROR_TYPE_AMOUNT: usize = 7;

const ERROR_TYPE_STRING: [&str; ERROR_TYPE_AMOUNT] = [
    "application-extended",
    "server-extended",
    "transport",
    "system",
    "application",
    "server",
    "parse",
];

/// Magnitude of the closest-to-zero code in each category.
const ERROR_TYPE_OFFSET: [i32; ERROR_TYPE_AMOUNT] = [
    1,      // ..=-31999 ApplicationExtended
    32_000, // ..=-32299 ServerExtended
    32_300, // ..=-32399 Transport
    32_400, // ..=-32499 System
    32_500, // ..=-32599 Application
    32_600, // ..=-32699 Server
    32_700, // ..=-32768 Parse
];

/// Numeric capacity of each category's sub-range. `Parse` runs down to the
/// 16-bit signed floor, which caps the whole space at -32768.
const ERROR_TYPE_SIZE: [i32; ERROR_TYPE_AMOUNT] = [
    ERROR_TYPE_OFFSET[1] - ERROR_TYPE_OFFSET[0],
    ERROR_TYPE_OFFSET[2] - ERROR_TYPE_OFFSET[1],
    ERROR_TYPE_OFFSET[3] - ERROR_TYPE_OFFSET[2],
    ERROR_TYPE_OFFSET[4] - ERROR_TYPE_OFFSET[3],
    ERROR_TYPE_OFFSET[5] - ERROR_TYPE_OFFSET[4],
    ERROR_TYPE_OFFSET[6] - ERROR_TYPE_OFFSET[5],
    -(i16::MIN as i32) - ERROR_TYPE_OFFSET[6],
];

/// Returned by [`error_string`] when a code has no populated table entry.
pub const ERROR_UNSPECIFIED: &str = "unspecified error";

impl ErrorType {
    /// Human-readable category name.
    pub const fn as_str(self) -> &'static str {
        ERROR_TYPE_STRING[self as usize]
    }

    /// Magnitude of the closest-to-zero code in this category.
    pub const fn offset(self) -> i32 {
        ERROR_TYPE_OFFSET[self as usize]
    }

    /// Numeric capacity of this category's sub-range.
    pub const fn size(self) -> i32 {
        ERROR_TYPE_SIZE[self as usize]
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packs a category and a zero-based variant index into a negative wire code.
pub const fn error_code(error_type: ErrorType, variant: i32) -> i32 {
    -(ERROR_TYPE_OFFSET[error_type as usize] + variant)
}

/// Category owning `code`.
///
/// `code` must be strictly negative. A non-negative code is a contract
/// violation on the caller's side, not malformed input, and panics.
pub fn error_type(code: i32) -> ErrorType {
    assert!(code < 0, "error codes are strictly negative, got {code}");
    const SCAN: [ErrorType; ERROR_TYPE_AMOUNT] = [
        ErrorType::Parse,
        ErrorType::Server,
        ErrorType::Application,
        ErrorType::System,
        ErrorType::Transport,
        ErrorType::ServerExtended,
        ErrorType::ApplicationExtended,
    ];
    let magnitude = -(code as i64);
    for error_type in SCAN {
        if error_type.offset() as i64 <= magnitude {
            return error_type;
        }
    }
    // ApplicationExtended starts at magnitude 1, so every negative code
    // matched above.
    unreachable!()
}

fn error_type_table(error_type: ErrorType) -> &'static [&'static str] {
    match error_type {
        ErrorType::Application => &APPLICATION_ERROR_STRING,
        ErrorType::Server => &SERVER_ERROR_STRING,
        ErrorType::Parse => &PARSE_ERROR_STRING,
        // No populated entries yet; every lookup yields the sentinel.
        _ => &[],
    }
}

/// Human-readable string for `code`, or [`ERROR_UNSPECIFIED`] when the
/// in-category index falls outside the populated table.
///
/// Tables are deliberately smaller than their numeric capacity, leaving room
/// for new variants without renumbering. Panics on non-negative codes, as
/// [`error_type`] does.
pub fn error_string(code: i32) -> &'static str {
    let error_type = error_type(code);
    let index = (-(code as i64) - error_type.offset() as i64) as usize;
    error_type_table(error_type)
        .get(index)
        .copied()
        .unwrap_or(ERROR_UNSPECIFIED)
}

/// Server-category failures, reported when validating notifications and
/// requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerError {
    RequestInvalid,
    NotificationInvalid,
    RpcVersionUnsupported,
    MethodReserved,
    MethodNotFound,
    ParametersInvalid,
    Internal,
}

const SERVER_ERROR_STRING: [&str; 7] = [
    "request object is invalid",
    "notification object is invalid",
    "unsupported rpc protocol version",
    "method field is invalid (starts with rpc.)",
    "method was not found",
    "method parameters are invalid",
    "internal server error",
];

impl ServerError {
    /// Wire code for this variant.
    pub const fn code(self) -> i32 {
        error_code(ErrorType::Server, self as i32)
    }

    /// String-table entry for this variant.
    pub const fn message(self) -> &'static str {
        SERVER_ERROR_STRING[self as usize]
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ServerError {}

/// Application-category failures, reported when validating responses and
/// error objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationError {
    ResponseInvalid,
    RpcVersionUnsupported,
    ResultInvalid,
    ErrorInvalid,
    ErrorCodeUndefined,
    ErrorMessageIsEmpty,
    ErrorDataInvalid,
    Internal,
}

const APPLICATION_ERROR_STRING: [&str; 8] = [
    "response object is invalid",
    "unsupported rpc protocol version",
    "result field is invalid",
    "error object is invalid",
    "undefined error code",
    "empty error message",
    "error data field is invalid",
    "internal application error",
];

impl ApplicationError {
    /// Wire code for this variant.
    pub const fn code(self) -> i32 {
        error_code(ErrorType::Application, self as i32)
    }

    /// String-table entry for this variant.
    pub const fn message(self) -> &'static str {
        APPLICATION_ERROR_STRING[self as usize]
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ApplicationError {}

/// Parse-category failures, one variant per named failure reason of the
/// external JSON parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseError {
    UnterminatedObject,
    MissingNameSeparator,
    UnterminatedArray,
    MissingValueSeparator,
    IllegalValue,
    TerminationByNumber,
    IllegalNumber,
    IllegalEscapeSequence,
    IllegalUTF8String,
    UnterminatedString,
    MissingObject,
    DeepNesting,
    DocumentTooLarge,
    GarbageAtEnd,
}

const PARSE_ERROR_STRING: [&str; 14] = [
    "unterminated object",
    "missing name separator",
    "unterminated array",
    "missing value separator",
    "illegal value",
    "termination by number",
    "illegal number",
    "illegal escape sequence",
    "illegal utf8 string",
    "unterminated string",
    "missing object",
    "deep nesting",
    "document too large",
    "garbage at end",
];

impl ParseError {
    /// Wire code for this variant.
    pub const fn code(self) -> i32 {
        error_code(ErrorType::Parse, self as i32)
    }

    /// String-table entry for this variant.
    pub const fn message(self) -> &'static str {
        PARSE_ERROR_STRING[self as usize]
    }

    /// Maps a `serde_json` failure onto the parse category.
    ///
    /// `serde_json` keeps its reason enum private, so the mapping keys on the
    /// stable reason prefix of the rendered message. Every syntax and eof
    /// reason the parser can report is covered; an io or data-mapping failure
    /// reaching this adapter, or a reason missing from the table, is a
    /// contract violation in the calling code and panics.
    /// `TerminationByNumber` and `DocumentTooLarge` have no `serde_json`
    /// equivalent and are only ever constructed directly.
    pub fn from_json_error(err: &serde_json::Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Eof => {}
            Category::Io | Category::Data => {
                panic!("not a JSON syntax failure: {err}");
            }
        }
        let rendered = err.to_string();
        // rendered as "<reason> at line N column M"
        let reason = rendered.split(" at line ").next().unwrap_or(&rendered);
        match reason {
            "EOF while parsing an object" => ParseError::UnterminatedObject,
            "expected `:`" => ParseError::MissingNameSeparator,
            "EOF while parsing a list" => ParseError::UnterminatedArray,
            "expected `,` or `]`" | "expected `,` or `}`" | "trailing comma" => {
                ParseError::MissingValueSeparator
            }
            "expected value" | "expected ident" | "expected `\"`" | "key must be a string" => {
                ParseError::IllegalValue
            }
            "invalid number" | "number out of range" => ParseError::IllegalNumber,
            "invalid escape"
            | "unexpected end of hex escape"
            | "lone leading surrogate in hex escape" => ParseError::IllegalEscapeSequence,
            "invalid unicode code point"
            | "control character (\\u0000-\\u001F) found while parsing a string" => {
                ParseError::IllegalUTF8String
            }
            "EOF while parsing a string" => ParseError::UnterminatedString,
            "EOF while parsing a value" => ParseError::MissingObject,
            "recursion limit exceeded" => ParseError::DeepNesting,
            "trailing characters" => ParseError::GarbageAtEnd,
            other => panic!("unrecognized JSON parse failure: {other}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ParseError {}
