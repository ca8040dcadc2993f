//! # Event Normalizer
//!
//! Converts either supported gateway payload version into one canonical
//! request record. Everything downstream of this module is
//! schema-version-agnostic; the [`PayloadVersion`] tag is carried only so
//! the response can be shaped for the caller's schema.

use std::collections::HashMap;

use serde_json::Value;

use crate::rpc::errors::{RpcError, RpcResult};

use super::proxy::{ProxyEvent, ProxyEventV2};

/// Which inbound schema produced the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadVersion {
    V1,
    V2,
}

/// HTTP verbs the adapter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Parse a verb, case-insensitively. Unrecognized verbs are rejected.
    pub fn parse(raw: &str) -> RpcResult<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(RpcError::bad_request(format!(
                "Unsupported HTTP method: {}",
                other
            ))),
        }
    }

    /// Uppercase wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Schema-version-independent representation of one inbound call.
///
/// Built once per invocation, immutable afterward.
#[derive(Debug, Clone)]
pub struct CanonicalRequest {
    pub method: Method,
    /// Slash-delimited procedure path, leading slash stripped
    pub path: String,
    /// Single-valued query parameters (first value wins when the source
    /// event is multi-valued)
    pub query: HashMap<String, String>,
    /// `None` means the event carried no body; an empty body stays `Some("")`
    pub body: Option<String>,
    /// Headers with case as provided
    pub headers: HashMap<String, String>,
}

/// Detect the payload version and build the canonical request.
///
/// Fails with `MalformedEvent` when neither schema's discriminant fields
/// are present, fatal for this invocation only.
pub fn normalize(event: &Value) -> RpcResult<(CanonicalRequest, PayloadVersion)> {
    if is_v2(event) {
        normalize_v2(event).map(|request| (request, PayloadVersion::V2))
    } else if event.get("httpMethod").is_some() {
        normalize_v1(event).map(|request| (request, PayloadVersion::V1))
    } else {
        Err(RpcError::malformed_event(
            "Unrecognized event payload: expected proxy payload version 1 or 2",
        ))
    }
}

fn is_v2(event: &Value) -> bool {
    event.get("routeKey").is_some()
        || event.get("version").and_then(Value::as_str) == Some("2.0")
}

fn normalize_v1(event: &Value) -> RpcResult<CanonicalRequest> {
    let event: ProxyEvent = serde_json::from_value(event.clone())
        .map_err(|e| RpcError::malformed_event(format!("Invalid v1 event: {}", e)))?;

    reject_base64(event.is_base64_encoded)?;

    let query = match event.query_string_parameters {
        Some(flat) if !flat.is_empty() => flat,
        _ => first_values(event.multi_value_query_string_parameters),
    };

    Ok(CanonicalRequest {
        method: Method::parse(&event.http_method)?,
        path: event.path.trim_start_matches('/').to_string(),
        query,
        body: event.body,
        headers: event.headers,
    })
}

fn normalize_v2(event: &Value) -> RpcResult<CanonicalRequest> {
    let event: ProxyEventV2 = serde_json::from_value(event.clone())
        .map_err(|e| RpcError::malformed_event(format!("Invalid v2 event: {}", e)))?;

    reject_base64(event.is_base64_encoded)?;

    // The v2 gateway prefixes rawPath with the deployment stage unless
    // the stage is $default.
    let mut path = event.raw_path.as_str();
    if let Some(stage) = event.request_context.stage.as_deref() {
        if stage != "$default" {
            let prefix = format!("/{}", stage);
            if let Some(rest) = path.strip_prefix(prefix.as_str()) {
                path = rest;
            }
        }
    }

    Ok(CanonicalRequest {
        method: Method::parse(&event.request_context.http.method)?,
        path: path.trim_start_matches('/').to_string(),
        query: event.query_string_parameters.unwrap_or_default(),
        body: event.body,
        headers: event.headers,
    })
}

fn reject_base64(flag: Option<bool>) -> RpcResult<()> {
    if flag == Some(true) {
        return Err(RpcError::malformed_event(
            "Base64-encoded request bodies are not supported",
        ));
    }
    Ok(())
}

/// Collapse a multi-valued parameter map: first value wins.
fn first_values(multi: Option<HashMap<String, Vec<String>>>) -> HashMap<String, String> {
    multi
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, values)| values.into_iter().next().map(|value| (key, value)))
        .collect()
}
