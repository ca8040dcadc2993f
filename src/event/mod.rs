//! # Event Module
//!
//! Inbound gateway event models and the normalizer that converges both
//! payload versions onto one canonical request record.

pub mod normalizer;
pub mod proxy;

pub use normalizer::{normalize, CanonicalRequest, Method, PayloadVersion};
pub use proxy::{ProxyEvent, ProxyEventV2, ProxyResponse};
