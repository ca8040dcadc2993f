//! # Procedure Router
//!
//! The registry of named procedures the adapter dispatches against.
//! The adapter itself only depends on the [`Registry`] trait; [`Router`]
//! is the in-crate implementation holding read-type (query) and
//! write-type (mutation) procedures with their declared input shapes.

pub mod shape;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::rpc::errors::{ErrorCode, RpcError, RpcResult};

pub use shape::{InputShape, ShapeIssue};

/// Read or write flavor of a registered procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    Query,
    Mutation,
}

impl ProcedureKind {
    /// Lowercase name for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcedureKind::Query => "query",
            ProcedureKind::Mutation => "mutation",
        }
    }
}

/// One resolved call against the registry
#[derive(Debug)]
pub struct ProcedureCall<Ctx> {
    /// Slash-delimited procedure path
    pub path: String,
    pub kind: ProcedureKind,
    /// Decoded input, `None` when the caller provided none
    pub input: Option<Value>,
    /// Per-call context, `None` when no builder is configured
    pub context: Option<Ctx>,
}

/// External collaborator that executes named procedures.
///
/// A dispatch failure is terminal for the invocation; the adapter never
/// retries.
pub trait Registry: Send + Sync {
    /// Opaque per-call context type
    type Context: Send + 'static;

    /// Resolve the path, validate the input, and execute the procedure
    fn invoke(
        &self,
        call: ProcedureCall<Self::Context>,
    ) -> impl Future<Output = RpcResult<Value>> + Send;
}

type Resolver<Ctx> =
    Box<dyn Fn(Option<Value>, Option<Ctx>) -> BoxFuture<'static, RpcResult<Value>> + Send + Sync>;

struct Procedure<Ctx> {
    kind: ProcedureKind,
    shape: Option<InputShape>,
    resolver: Resolver<Ctx>,
}

/// Registry of named procedures with declared input shapes
pub struct Router<Ctx> {
    procedures: HashMap<String, Procedure<Ctx>>,
}

impl<Ctx> fmt::Debug for Router<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("procedures", &self.procedures.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<Ctx: Send + 'static> Router<Ctx> {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            procedures: HashMap::new(),
        }
    }

    /// Register a read-type procedure
    pub fn query<F, Fut>(self, path: &str, shape: Option<InputShape>, resolver: F) -> Self
    where
        F: Fn(Option<Value>, Option<Ctx>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RpcResult<Value>> + Send + 'static,
    {
        self.register(path, ProcedureKind::Query, shape, resolver)
    }

    /// Register a write-type procedure
    pub fn mutation<F, Fut>(self, path: &str, shape: Option<InputShape>, resolver: F) -> Self
    where
        F: Fn(Option<Value>, Option<Ctx>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RpcResult<Value>> + Send + 'static,
    {
        self.register(path, ProcedureKind::Mutation, shape, resolver)
    }

    fn register<F, Fut>(
        mut self,
        path: &str,
        kind: ProcedureKind,
        shape: Option<InputShape>,
        resolver: F,
    ) -> Self
    where
        F: Fn(Option<Value>, Option<Ctx>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RpcResult<Value>> + Send + 'static,
    {
        self.procedures.insert(
            path.to_string(),
            Procedure {
                kind,
                shape,
                resolver: Box::new(move |input, ctx| Box::pin(resolver(input, ctx))),
            },
        );
        self
    }
}

impl<Ctx: Send + 'static> Default for Router<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx: Send + Sync + 'static> Registry for Router<Ctx> {
    type Context = Ctx;

    fn invoke(
        &self,
        call: ProcedureCall<Ctx>,
    ) -> impl Future<Output = RpcResult<Value>> + Send {
        async move {
            let procedure = self
                .procedures
                .get(&call.path)
                .ok_or_else(|| RpcError::not_found(&call.path))?;

            if procedure.kind != call.kind {
                return Err(RpcError::new(
                    ErrorCode::MethodNotSupported,
                    format!(
                        "Procedure \"{}\" is a {}, called as a {}",
                        call.path,
                        procedure.kind.as_str(),
                        call.kind.as_str()
                    ),
                ));
            }

            if let Some(shape) = &procedure.shape {
                let issues = shape.check(call.input.as_ref());
                if !issues.is_empty() {
                    return Err(RpcError::validation(&issues));
                }
            }

            (procedure.resolver)(call.input, call.context).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn greeter() -> Router<()> {
        Router::new()
            .query(
                "hello",
                Some(
                    InputShape::object(vec![("who", InputShape::string().nullish())]).nullish(),
                ),
                |input, _ctx| async move {
                    let who = input
                        .as_ref()
                        .and_then(|v| v.get("who"))
                        .and_then(Value::as_str)
                        .unwrap_or("world")
                        .to_string();
                    Ok(json!({"text": format!("hello {}", who)}))
                },
            )
            .mutation("reset", None, |_input, _ctx| async move {
                Ok(json!({"reset": true}))
            })
    }

    fn call(path: &str, kind: ProcedureKind, input: Option<Value>) -> ProcedureCall<()> {
        ProcedureCall {
            path: path.to_string(),
            kind,
            input,
            context: None,
        }
    }

    #[tokio::test]
    async fn test_invoke_query() {
        let router = greeter();
        let result = router
            .invoke(call("hello", ProcedureKind::Query, Some(json!({"who": "kATT"}))))
            .await
            .unwrap();
        assert_eq!(result, json!({"text": "hello kATT"}));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let router = greeter();
        let err = router
            .invoke(call("missing", ProcedureKind::Query, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_kind_mismatch_is_method_not_supported() {
        let router = greeter();
        let err = router
            .invoke(call("reset", ProcedureKind::Query, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MethodNotSupported);
    }

    #[tokio::test]
    async fn test_shape_violation_is_bad_request() {
        let router = greeter();
        let err = router
            .invoke(call(
                "hello",
                ProcedureKind::Query,
                Some(json!({"who": [[]]})),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
        // Message carries the issue array verbatim
        let issues: Value = serde_json::from_str(&err.message).unwrap();
        assert_eq!(issues[0]["expected"], json!("string"));
    }

    #[tokio::test]
    async fn test_domain_error_propagates_verbatim() {
        let router: Router<()> = Router::new().mutation("forbidden", None, |_input, _ctx| {
            async move { Err(RpcError::new(ErrorCode::Forbidden, "no access")) }
        });
        let err = router
            .invoke(call("forbidden", ProcedureKind::Mutation, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message, "no access");
    }
}
