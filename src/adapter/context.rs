//! # Call Context Construction
//!
//! Optional per-call context built by a caller-supplied asynchronous
//! function before dispatch. Absence of a builder is a first-class
//! state: the dispatcher passes `None` through and procedures that do
//! not require a context tolerate it.

use std::future::Future;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::event::CanonicalRequest;
use crate::rpc::errors::RpcResult;

/// Arguments handed to a configured context builder, once per request
#[derive(Debug, Clone)]
pub struct ContextArgs {
    /// Raw platform event as delivered
    pub event: Value,
    /// Platform-native invocation metadata
    pub platform_context: Value,
    /// Normalized request, convenient for header-derived identity lookup
    pub request: CanonicalRequest,
}

/// Boxed form of the builder stored in [`HandlerOptions`]
///
/// [`HandlerOptions`]: crate::adapter::HandlerOptions
pub type ContextBuilder<Ctx> =
    Box<dyn Fn(ContextArgs) -> BoxFuture<'static, RpcResult<Ctx>> + Send + Sync>;

/// Wrap a plain async closure into the boxed builder form.
pub fn context_builder<Ctx, F, Fut>(build: F) -> ContextBuilder<Ctx>
where
    F: Fn(ContextArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RpcResult<Ctx>> + Send + 'static,
{
    Box::new(move |args| Box::pin(build(args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Method;
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_builder_sees_headers() {
        let builder = context_builder(|args: ContextArgs| async move {
            Ok(args.request.headers.get("X-USER").cloned())
        });

        let args = ContextArgs {
            event: json!({}),
            platform_context: json!({}),
            request: CanonicalRequest {
                method: Method::Get,
                path: "hello".to_string(),
                query: HashMap::new(),
                body: None,
                headers: HashMap::from([("X-USER".to_string(), "Lilja".to_string())]),
            },
        };

        let ctx = builder(args).await.unwrap();
        assert_eq!(ctx.as_deref(), Some("Lilja"));
    }
}
