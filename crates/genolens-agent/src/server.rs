//! JSON tool-serving shim.
//!
//! Exposes the tool registry over HTTP:
//!   GET  /tools          → tool manifest
//!   POST /tools/{name}   → invoke a tool with the JSON body as params
//!
//! Tool failures never surface as transport errors. Whatever goes wrong,
//! the handler answers 200 with a single-element `[{"error": ...}]` list,
//! the shape agent clients already handle.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};

use crate::tools::ToolRegistry;

pub type SharedRegistry = Arc<ToolRegistry>;

/// Build and return the tool-serving router.
pub fn build_router(registry: SharedRegistry) -> Router {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(invoke_tool))
        .with_state(registry)
}

async fn list_tools(State(registry): State<SharedRegistry>) -> Json<Value> {
    Json(registry.manifest())
}

async fn invoke_tool(
    State(registry): State<SharedRegistry>,
    Path(name): Path<String>,
    body: String,
) -> Json<Value> {
    let params = if body.trim().is_empty() {
        json!({})
    } else {
        match serde_json::from_str::<Value>(&body) {
            Ok(v) => v,
            Err(e) => return Json(error_result(&format!("Invalid JSON params: {e}"))),
        }
    };

    match registry.invoke(&name, params).await {
        Ok(result) => Json(result),
        Err(e) => {
            tracing::warn!(tool = %name, error = %e, "Tool invocation failed");
            Json(error_result(&format!(
                "An error occurred while search gene: {e}"
            )))
        }
    }
}

fn error_result(message: &str) -> Value {
    json!([{ "error": message }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::GenolensTool;
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct EchoTool;

    #[async_trait]
    impl GenolensTool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes the input params back."
        }
        fn parameters_schema(&self) -> Value {
            json!({ "type": "object", "properties": {} })
        }
        async fn invoke(&self, params: Value) -> Result<Value> {
            Ok(json!({ "echo": params["message"] }))
        }
    }

    struct FailingTool;

    #[async_trait]
    impl GenolensTool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }
        fn description(&self) -> &str {
            "Always fails."
        }
        fn parameters_schema(&self) -> Value {
            json!({ "type": "object", "properties": {} })
        }
        async fn invoke(&self, _params: Value) -> Result<Value> {
            anyhow::bail!("upstream unavailable")
        }
    }

    fn test_router() -> Router {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        registry.register(FailingTool);
        build_router(Arc::new(registry))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_result_shape() {
        let value = error_result("boom");
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["error"], "boom");
    }

    #[tokio::test]
    async fn test_manifest_endpoint_lists_tools() {
        let response = test_router()
            .oneshot(Request::get("/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        let names: Vec<&str> = value["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"echo"));
        assert!(names.contains(&"failing"));
    }

    #[tokio::test]
    async fn test_invoke_returns_tool_output() {
        let response = test_router()
            .oneshot(
                Request::post("/tools/echo")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message": "hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "echo": "hi" }));
    }

    #[tokio::test]
    async fn test_tool_failure_is_wrapped_not_propagated() {
        let response = test_router()
            .oneshot(
                Request::post("/tools/failing")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Still 200: the boundary never lets an error escape as transport failure.
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        let message = value[0]["error"].as_str().unwrap();
        assert!(message.contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_unknown_tool_gets_error_shape() {
        let response = test_router()
            .oneshot(
                Request::post("/tools/no_such_tool")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert!(value[0]["error"].as_str().unwrap().contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_missing_body_defaults_to_empty_params() {
        let response = test_router()
            .oneshot(Request::post("/tools/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "echo": null }));
    }
}
