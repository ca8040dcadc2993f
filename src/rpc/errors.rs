//! # RPC Errors
//!
//! The closed error taxonomy shared by every stage of the call pipeline.
//! Every failure, from event normalization through procedure execution,
//! is expressed as an [`RpcError`] so the caller always receives a
//! well-formed error envelope and a status code consistent with the
//! failure kind.

use thiserror::Error;

use crate::router::shape::ShapeIssue;

/// Result type for adapter operations
pub type RpcResult<T> = Result<T, RpcError>;

/// Semantic error kinds understood by the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The platform delivered an event matching neither supported schema
    MalformedEvent,
    /// Bad, missing, or invalid-shaped input
    BadRequest,
    /// Caller identity missing
    Unauthorized,
    /// Caller identity known but not permitted
    Forbidden,
    /// Unknown procedure path
    NotFound,
    /// HTTP verb does not match the procedure flavor
    MethodNotSupported,
    /// Procedure exceeded its own deadline
    Timeout,
    /// State conflict reported by procedure logic
    Conflict,
    /// Precondition declared by the procedure does not hold
    PreconditionFailed,
    /// Input exceeds the accepted size
    PayloadTooLarge,
    /// Caller abandoned the request
    ClientClosedRequest,
    /// Catch-all for unclassified failures
    InternalServerError,
}

impl ErrorCode {
    /// HTTP status code for this kind
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::MalformedEvent => 500,
            ErrorCode::BadRequest => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::MethodNotSupported => 405,
            ErrorCode::Timeout => 408,
            ErrorCode::Conflict => 409,
            ErrorCode::PreconditionFailed => 412,
            ErrorCode::PayloadTooLarge => 413,
            ErrorCode::ClientClosedRequest => 499,
            ErrorCode::InternalServerError => 500,
        }
    }

    /// Symbolic code carried in the error envelope's `data.code` field
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MalformedEvent => "MALFORMED_EVENT",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MethodNotSupported => "METHOD_NOT_SUPPORTED",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::PreconditionFailed => "PRECONDITION_FAILED",
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorCode::ClientClosedRequest => "CLIENT_CLOSED_REQUEST",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Fixed protocol-level numeric code (JSON-RPC error code space)
    pub fn protocol_code(&self) -> i32 {
        match self {
            ErrorCode::MalformedEvent => -32603,
            ErrorCode::BadRequest => -32600,
            ErrorCode::Unauthorized => -32001,
            ErrorCode::Forbidden => -32003,
            ErrorCode::NotFound => -32004,
            ErrorCode::MethodNotSupported => -32005,
            ErrorCode::Timeout => -32008,
            ErrorCode::Conflict => -32009,
            ErrorCode::PreconditionFailed => -32012,
            ErrorCode::PayloadTooLarge => -32013,
            ErrorCode::ClientClosedRequest => -32099,
            ErrorCode::InternalServerError => -32603,
        }
    }
}

/// Structured failure: a semantic kind plus a human message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RpcError {
    /// Semantic kind, mapped to a status code at serialization time
    pub code: ErrorCode,
    /// Human-readable description, echoed in the error envelope
    pub message: String,
}

impl RpcError {
    /// Create an error with an explicit kind
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Bad or invalid-shaped input
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Unknown procedure path
    pub fn not_found(path: &str) -> Self {
        Self::new(
            ErrorCode::NotFound,
            format!("No procedure found on path \"{}\"", path),
        )
    }

    /// Unclassified failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError, message)
    }

    /// Platform-contract violation: the event matches neither schema
    pub fn malformed_event(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedEvent, message)
    }

    /// Input failed the procedure's declared shape.
    ///
    /// The message is the JSON array of every violation so clients can
    /// recover each issue's path, expected and received types.
    pub fn validation(issues: &[ShapeIssue]) -> Self {
        let message = serde_json::to_string_pretty(issues)
            .expect("ShapeIssue serialization cannot fail");
        Self::new(ErrorCode::BadRequest, message)
    }
}
