//! # RPC Protocol Module
//!
//! Error taxonomy and call envelopes shared by the whole pipeline.

pub mod envelope;
pub mod errors;

pub use envelope::{ErrorEnvelope, ResultEnvelope};
pub use errors::{ErrorCode, RpcError, RpcResult};
