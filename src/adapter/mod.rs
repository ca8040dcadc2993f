//! # Adapter Module
//!
//! The request-adaptation pipeline: input extraction, per-call context
//! construction, dispatch against the registry, and response
//! serialization.

pub mod context;
pub mod handler;
pub mod input;
pub mod response;

pub use context::{context_builder, ContextArgs, ContextBuilder};
pub use handler::{HandlerOptions, RequestHandler};
pub use input::{extract_input, INPUT_PARAM};
