//! MCP method handlers
//!
//! Maps host requests onto the [`ToolRouter`]. `tools/call` is the one place
//! where a failed tool call is turned into an error result for the host.

use super::protocol::{RpcFailure, INTERNAL_ERROR};
use bridge_application::ToolRouter;
use bridge_domain::{CallToolResult, ToolCall};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Protocol revisions this server can speak, newest first
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

pub const SERVER_NAME: &str = "blueprint-mcp";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeRequest {
    #[serde(default)]
    protocol_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolRequest {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

/// Answers MCP requests from the host.
pub struct McpHandler {
    router: Arc<ToolRouter>,
}

impl McpHandler {
    pub fn new(router: Arc<ToolRouter>) -> Self {
        Self { router }
    }

    /// Handle a request and produce its `result` or error object.
    pub async fn handle_request(&self, method: &str, params: Option<Value>) -> Result<Value, RpcFailure> {
        match method {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => {
                let tools = self.router.list_tools().await;
                debug!(count = tools.len(), "Serving tool list");
                Ok(json!({ "tools": tools }))
            }
            "tools/call" => self.call_tool(params).await,
            other => Err(RpcFailure::method_not_found(other)),
        }
    }

    /// Notifications never get a reply.
    pub fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => info!("Host session initialized"),
            other => debug!(method = other, "Ignoring notification"),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, RpcFailure> {
        let requested = params
            .map(serde_json::from_value::<InitializeRequest>)
            .transpose()
            .map_err(|e| RpcFailure::invalid_params(e.to_string()))?
            .and_then(|p| p.protocol_version);

        let version = requested
            .as_deref()
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);

        Ok(json!({
            "protocolVersion": version,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        }))
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, RpcFailure> {
        let request: CallToolRequest = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| RpcFailure::invalid_params(format!("invalid tools/call params: {e}")))?;

        let call = ToolCall::new(request.name.as_str()).with_arguments(request.arguments.unwrap_or_default());
        info!(tool = %call.tool_name, "Tool call");
        debug!(arguments = %serde_json::Value::Object(call.arguments.clone()), "Tool call arguments");

        let result = match self.router.call(&call).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %call.tool_name, error = %e, "Tool call failed");
                CallToolResult::error(format!("error calling tool '{}': {e}", call.tool_name))
            }
        };

        serde_json::to_value(result).map_err(|e| RpcFailure::new(INTERNAL_ERROR, e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_application::{ExecutionContext, LocalToolKit};
    use bridge_domain::{ProviderError, ToolDefinition, ToolProvider};
    use std::time::Duration;

    /// Remote source with one tool whose calls take `delay`
    pub(crate) struct SlowRemote {
        pub delay: Duration,
    }

    #[async_trait]
    impl ToolProvider for SlowRemote {
        fn id(&self) -> &str {
            "remote"
        }

        fn display_name(&self) -> &str {
            "Slow Remote"
        }

        async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError> {
            Ok(vec![ToolDefinition::new("get_vaults", "List vaults")])
        }

        async fn call(&self, call: &ToolCall) -> Result<CallToolResult, ProviderError> {
            tokio::time::sleep(self.delay).await;
            Ok(CallToolResult::text(format!("called {}", call.tool_name)))
        }
    }

    pub(crate) fn handler_with(delay: Duration) -> McpHandler {
        let kit = LocalToolKit::new(Arc::new(ExecutionContext::new(None, None)));
        let router = ToolRouter::new(kit, Arc::new(SlowRemote { delay }));
        McpHandler::new(Arc::new(router))
    }

    fn handler() -> McpHandler {
        handler_with(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_initialize_negotiates_version() {
        let result = handler()
            .handle_request("initialize", Some(json!({"protocolVersion": "2024-11-05"})))
            .await
            .unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(result["capabilities"]["tools"].is_object());

        let result = handler()
            .handle_request("initialize", Some(json!({"protocolVersion": "1999-01-01"})))
            .await
            .unwrap();
        assert_eq!(result["protocolVersion"], SUPPORTED_PROTOCOL_VERSIONS[0]);
    }

    #[tokio::test]
    async fn test_tools_list_merges_sources() {
        let result = handler().handle_request("tools/list", None).await.unwrap();
        let names: Vec<_> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["get_vaults", "get_wallet_address", "execute_intent"]);
        assert!(result["tools"][2]["inputSchema"]["properties"]["chainType"].is_object());
    }

    #[tokio::test]
    async fn test_local_tool_error_becomes_error_result() {
        let result = handler()
            .handle_request(
                "tools/call",
                Some(json!({"name": "execute_intent", "arguments": {"chainType": "evm", "intent": "e30="}})),
            )
            .await
            .unwrap();

        assert_eq!(result["isError"], true);
        let text: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(
            text["error"],
            "error calling tool 'execute_intent': EVM executor not configured. Set EVM_PRIVATE_KEY."
        );
    }

    #[tokio::test]
    async fn test_missing_arguments_is_tool_error_not_rpc_error() {
        let result = handler()
            .handle_request("tools/call", Some(json!({"name": "execute_intent"})))
            .await
            .unwrap();
        assert_eq!(result["isError"], true);
    }

    #[tokio::test]
    async fn test_remote_tool_call() {
        let result = handler()
            .handle_request("tools/call", Some(json!({"name": "get_vaults"})))
            .await
            .unwrap();
        assert_eq!(result["content"][0]["text"], "called get_vaults");
        assert!(result.get("isError").is_none());
    }

    #[tokio::test]
    async fn test_tools_call_without_name_is_invalid_params() {
        let err = handler()
            .handle_request("tools/call", Some(json!({"arguments": {}})))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::server::protocol::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let err = handler().handle_request("resources/list", None).await.unwrap_err();
        assert_eq!(err.code, crate::server::protocol::METHOD_NOT_FOUND);
    }
}
