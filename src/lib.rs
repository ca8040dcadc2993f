//! rpcgate - adapts serverless proxy events onto procedure calls
//!
//! Receives a gateway proxy event (payload version 1 or 2), maps it onto
//! a call against a registry of named query/mutation procedures, and
//! serializes the result or structured failure back into the platform's
//! response shape.

pub mod adapter;
pub mod event;
pub mod router;
pub mod rpc;

pub use adapter::{context_builder, ContextArgs, HandlerOptions, RequestHandler};
pub use event::{CanonicalRequest, Method, PayloadVersion, ProxyResponse};
pub use router::{ProcedureCall, ProcedureKind, Registry, Router};
pub use rpc::{ErrorCode, RpcError, RpcResult};
