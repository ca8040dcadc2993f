//! # Response Serializer
//!
//! Wraps outcomes in the appropriate envelope and re-renders them in the
//! caller's payload version. The status code is always consistent with
//! the envelope kind: 200 for results, the mapped kind status for errors.

use std::collections::HashMap;

use serde_json::Value;

use crate::event::{PayloadVersion, ProxyResponse};
use crate::rpc::envelope::{ErrorEnvelope, ResultEnvelope};
use crate::rpc::errors::RpcError;

/// Render a successful outcome as a 200 result envelope.
pub fn render_result(data: Value, version: PayloadVersion) -> ProxyResponse {
    respond(200, ResultEnvelope::new(data).to_json(), version)
}

/// Render a structured failure as an error envelope.
///
/// `dev_mode` attaches diagnostic detail in the envelope's `stack` field;
/// production configurations omit it.
pub fn render_error(
    err: &RpcError,
    path: &str,
    version: PayloadVersion,
    dev_mode: bool,
) -> ProxyResponse {
    let stack = dev_mode.then(|| format!("{:?}", err));
    respond(
        err.code.http_status(),
        ErrorEnvelope::new(err, path, stack).to_json(),
        version,
    )
}

fn respond(status_code: u16, body: String, version: PayloadVersion) -> ProxyResponse {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    ProxyResponse {
        status_code,
        headers,
        body,
        // Only v2 callers need the flag; always false, the body is a raw
        // string the platform must not re-encode.
        is_base64_encoded: match version {
            PayloadVersion::V1 => None,
            PayloadVersion::V2 => Some(false),
        },
    }
}
