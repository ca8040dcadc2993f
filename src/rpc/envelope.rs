//! # Call Envelopes
//!
//! JSON wrappers returned for every call, independent of transport schema.
//! Exactly one of [`ResultEnvelope`] / [`ErrorEnvelope`] is produced per
//! invocation. The `id` field is always null: this transport is not batched,
//! so there is no correlation id.

use serde::Serialize;
use serde_json::Value;

use super::errors::RpcError;

/// Success envelope: `{"id":null,"result":{"type":"data","data":...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ResultEnvelope {
    pub id: Option<u64>,
    pub result: ResultBody,
}

/// Payload of a success envelope
#[derive(Debug, Clone, Serialize)]
pub struct ResultBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Value,
}

impl ResultEnvelope {
    /// Wrap a procedure's return value
    pub fn new(data: Value) -> Self {
        Self {
            id: None,
            result: ResultBody { kind: "data", data },
        }
    }

    /// Serialize to the wire body
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ResultEnvelope serialization cannot fail")
    }
}

/// Error envelope: `{"id":null,"error":{code,message,data}}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub id: Option<u64>,
    pub error: ErrorBody,
}

/// Payload of an error envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Protocol-level numeric code, fixed per error kind
    pub code: i32,
    pub message: String,
    pub data: ErrorData,
}

/// Diagnostic detail attached to every error
#[derive(Debug, Clone, Serialize)]
pub struct ErrorData {
    /// Symbolic error kind, e.g. `BAD_REQUEST`
    pub code: &'static str,
    #[serde(rename = "httpStatus")]
    pub http_status: u16,
    /// Procedure path that failed (empty when the failure precedes
    /// path extraction)
    pub path: String,
    /// Diagnostic detail, present only in development mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorEnvelope {
    /// Wrap a structured failure for the given procedure path
    pub fn new(err: &RpcError, path: &str, stack: Option<String>) -> Self {
        Self {
            id: None,
            error: ErrorBody {
                code: err.code.protocol_code(),
                message: err.message.clone(),
                data: ErrorData {
                    code: err.code.as_str(),
                    http_status: err.code.http_status(),
                    path: path.to_string(),
                    stack,
                },
            },
        }
    }

    /// Serialize to the wire body
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ErrorEnvelope serialization cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::errors::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_result_envelope_shape() {
        let envelope = ResultEnvelope::new(json!({"text": "hello world"}));
        let value: Value = serde_json::from_str(&envelope.to_json()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": null,
                "result": {"type": "data", "data": {"text": "hello world"}}
            })
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = RpcError::not_found("greet");
        let envelope = ErrorEnvelope::new(&err, "greet", None);
        let value: Value = serde_json::from_str(&envelope.to_json()).unwrap();
        assert_eq!(value["id"], json!(null));
        assert_eq!(value["error"]["code"], json!(-32004));
        assert_eq!(value["error"]["data"]["code"], json!("NOT_FOUND"));
        assert_eq!(value["error"]["data"]["httpStatus"], json!(404));
        assert_eq!(value["error"]["data"]["path"], json!("greet"));
        assert!(value["error"]["data"].get("stack").is_none());
    }

    #[test]
    fn test_stack_included_when_present() {
        let err = RpcError::new(ErrorCode::InternalServerError, "boom");
        let envelope = ErrorEnvelope::new(&err, "greet", Some("trace".to_string()));
        let value: Value = serde_json::from_str(&envelope.to_json()).unwrap();
        assert_eq!(value["error"]["data"]["stack"], json!("trace"));
    }
}
