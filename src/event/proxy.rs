//! # Proxy Event Models
//!
//! Serde models for the two inbound gateway payload versions and the
//! single outbound response shape. Unknown fields are tolerated; only
//! the fields the adapter reads are declared.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Payload format version 1 event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
}

/// Payload format version 2 event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEventV2 {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub route_key: Option<String>,
    pub raw_path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Delivered by the v2 gateway but irrelevant to procedure dispatch
    #[serde(default)]
    pub cookies: Option<Vec<String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
    pub request_context: RequestContextV2,
}

/// Routing object nested in a v2 event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContextV2 {
    pub http: HttpDescription,
    #[serde(default)]
    pub stage: Option<String>,
}

/// HTTP description nested in a v2 routing object
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpDescription {
    pub method: String,
}

/// Outbound response shape.
///
/// The v2 shape is a superset of v1, so one struct serves both; the
/// base64 flag is emitted only for v2 callers, always `false`, so the
/// platform treats the body as a raw string and never double-encodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_base64_encoded: Option<bool>,
}
