//! # Input Extractor
//!
//! Derives the procedure's input value from the canonical request:
//! read-type calls carry it JSON-encoded in a query parameter, write-type
//! calls carry it in the body. Absence of input is not an error here;
//! procedures whose declared shape accepts absence handle it.

use serde_json::Value;

use crate::event::{CanonicalRequest, Method};
use crate::rpc::errors::{RpcError, RpcResult};

/// Query parameter carrying the JSON-encoded input on read-type calls
pub const INPUT_PARAM: &str = "input";

/// Extract the decoded input, `None` when the caller provided none.
pub fn extract_input(request: &CanonicalRequest) -> RpcResult<Option<Value>> {
    match request.method {
        Method::Get => match request.query.get(INPUT_PARAM) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw).map(Some).map_err(|e| {
                RpcError::bad_request(format!(
                    "Invalid JSON in \"{}\" query parameter: {}",
                    INPUT_PARAM, e
                ))
            }),
        },
        Method::Post | Method::Put | Method::Patch | Method::Delete => match &request.body {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| RpcError::bad_request(format!("Invalid JSON body: {}", e))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::ErrorCode;
    use serde_json::json;
    use std::collections::HashMap;

    fn request(method: Method, query: &[(&str, &str)], body: Option<&str>) -> CanonicalRequest {
        CanonicalRequest {
            method,
            path: "hello".to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.map(str::to_string),
            headers: HashMap::new(),
        }
    }

    #[test]
    fn test_get_reads_input_parameter() {
        let req = request(Method::Get, &[("input", r#"{"who":"kATT"}"#)], None);
        let input = extract_input(&req).unwrap();
        assert_eq!(input, Some(json!({"who": "kATT"})));
    }

    #[test]
    fn test_get_without_parameter_is_no_input() {
        let req = request(Method::Get, &[], None);
        assert!(extract_input(&req).unwrap().is_none());
    }

    #[test]
    fn test_get_with_invalid_json_is_bad_request() {
        let req = request(Method::Get, &[("input", "{not json")], None);
        let err = extract_input(&req).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert!(err.message.contains("query parameter"));
    }

    #[test]
    fn test_post_parses_body() {
        let req = request(Method::Post, &[], Some(r#"{"who":"Lilja"}"#));
        let input = extract_input(&req).unwrap();
        assert_eq!(input, Some(json!({"who": "Lilja"})));
    }

    #[test]
    fn test_post_without_body_is_no_input() {
        let req = request(Method::Post, &[], None);
        assert!(extract_input(&req).unwrap().is_none());
    }

    #[test]
    fn test_post_with_malformed_body_is_bad_request() {
        let req = request(Method::Post, &[], Some("{"));
        let err = extract_input(&req).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_delete_parses_body_like_a_mutation() {
        let req = request(Method::Delete, &[], Some(r#"{"id":1}"#));
        let input = extract_input(&req).unwrap();
        assert_eq!(input, Some(json!({"id": 1})));
    }
}
