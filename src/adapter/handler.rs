//! # Request Handler
//!
//! The per-invocation pipeline: Normalize → Extract → Build Context →
//! Dispatch → Serialize. Context construction and dispatch are the two
//! asynchronous suspension points; no state is shared across invocations.
//! No failure escapes [`RequestHandler::handle`]: every stage's error is
//! converted to an error envelope with a consistent status code.

use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::event::{normalize, CanonicalRequest, Method, PayloadVersion, ProxyResponse};
use crate::router::{ProcedureCall, ProcedureKind, Registry};
use crate::rpc::errors::RpcResult;

use super::context::{ContextArgs, ContextBuilder};
use super::input::extract_input;
use super::response::{render_error, render_result};

/// Handler configuration
pub struct HandlerOptions<R: Registry> {
    /// Registry the dispatcher delegates to
    pub registry: R,
    /// Optional per-call context construction function
    pub context_builder: Option<ContextBuilder<R::Context>>,
    /// Include diagnostic detail in error envelopes
    pub dev_mode: bool,
}

impl<R: Registry> HandlerOptions<R> {
    /// Options with no context builder, production mode
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            context_builder: None,
            dev_mode: false,
        }
    }

    /// Configure the context builder
    pub fn with_context_builder(mut self, builder: ContextBuilder<R::Context>) -> Self {
        self.context_builder = Some(builder);
        self
    }

    /// Toggle diagnostic detail in error envelopes
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }
}

/// Adapts platform events onto procedure calls against the registry
pub struct RequestHandler<R: Registry> {
    options: HandlerOptions<R>,
}

impl<R: Registry> RequestHandler<R> {
    /// Create a handler from options
    pub fn new(options: HandlerOptions<R>) -> Self {
        Self { options }
    }

    /// Handle one invocation.
    ///
    /// `event` is the raw platform event in either payload version;
    /// `platform_context` is the platform-native invocation metadata,
    /// handed to the context builder untouched.
    pub async fn handle(&self, event: Value, platform_context: Value) -> ProxyResponse {
        let invocation = Uuid::new_v4();

        let (request, version) = match normalize(&event) {
            Ok(pair) => pair,
            Err(err) => {
                warn!(%invocation, code = err.code.as_str(), "event normalization failed");
                // Version unknown here; the v1 response shape is the
                // common subset of both.
                return render_error(&err, "", PayloadVersion::V1, self.options.dev_mode);
            }
        };

        debug!(
            %invocation,
            method = request.method.as_str(),
            path = %request.path,
            "dispatching call"
        );

        let path = request.path.clone();
        match self.dispatch(event, platform_context, request).await {
            Ok(data) => render_result(data, version),
            Err(err) => {
                warn!(
                    %invocation,
                    code = err.code.as_str(),
                    path = %path,
                    "call failed"
                );
                render_error(&err, &path, version, self.options.dev_mode)
            }
        }
    }

    async fn dispatch(
        &self,
        event: Value,
        platform_context: Value,
        request: CanonicalRequest,
    ) -> RpcResult<Value> {
        let input = extract_input(&request)?;

        // First suspension point: context construction, exactly once,
        // completed before dispatch proceeds.
        let context = match &self.options.context_builder {
            Some(build) => Some(
                build(ContextArgs {
                    event,
                    platform_context,
                    request: request.clone(),
                })
                .await?,
            ),
            None => None,
        };

        let call = ProcedureCall {
            path: request.path,
            kind: call_kind(request.method),
            input,
            context,
        };

        // Second suspension point: the registry call.
        self.options.registry.invoke(call).await
    }
}

/// Read-type verbs become queries, write-type verbs mutations.
fn call_kind(method: Method) -> ProcedureKind {
    match method {
        Method::Get => ProcedureKind::Query,
        Method::Post | Method::Put | Method::Patch | Method::Delete => ProcedureKind::Mutation,
    }
}
