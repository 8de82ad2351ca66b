//! JSON-RPC protocol types for the MCP streamable HTTP client.
//!
//! - **Requests**: bridge → server (`initialize`, `tools/list`, `tools/call`)
//! - **Notifications**: bridge → server (`notifications/initialized`)
//! - **Responses**: server → bridge, as a JSON body or an SSE `data:` event

use bridge_domain::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// MCP revision that introduced streamable HTTP
pub const MCP_PROTOCOL_VERSION: &str = "2025-03-26";

pub const CLIENT_NAME: &str = "blueprint-bridge";

/// Global request ID counter for JSON-RPC requests.
static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    REQUEST_ID.fetch_add(1, Ordering::SeqCst)
}

/// JSON-RPC request
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC request with an auto-generated ID.
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: next_id(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC notification (no id, no response expected)
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: &'static str,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params: None,
        }
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// `initialize` parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: &'static str,
    pub capabilities: Value,
    pub client_info: ClientInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl Default for InitializeParams {
    fn default() -> Self {
        Self {
            protocol_version: MCP_PROTOCOL_VERSION,
            capabilities: Value::Object(Map::new()),
            client_info: ClientInfo {
                name: CLIENT_NAME,
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// `initialize` result (only the parts we log)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    #[serde(default)]
    pub server_info: Option<ServerInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// `tools/list` parameters
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListToolsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// `tools/list` result page
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsResult {
    pub tools: Vec<ToolDefinition>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// `tools/call` parameters
#[derive(Debug, Clone, Serialize)]
pub struct CallToolParams<'a> {
    pub name: &'a str,
    pub arguments: &'a Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_ids_are_unique() {
        let a = JsonRpcRequest::new("ping", None);
        let b = JsonRpcRequest::new("ping", None);
        assert_ne!(a.id, b.id);

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert!(json.get("params").is_none());
    }

    #[test]
    fn initialize_params_serialize_camel_case() {
        let json = serde_json::to_value(InitializeParams::default()).unwrap();
        assert_eq!(json["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert_eq!(json["clientInfo"]["name"], CLIENT_NAME);
        assert!(json["capabilities"].is_object());
    }

    #[test]
    fn list_tools_result_deserializes_tool_definitions() {
        let result: ListToolsResult = serde_json::from_value(json!({
            "tools": [{
                "name": "get_vaults",
                "description": "List vaults",
                "inputSchema": {"type": "object"},
                "outputSchema": {"type": "object"}
            }],
            "nextCursor": "page-2"
        }))
        .unwrap();
        assert_eq!(result.tools[0].name, "get_vaults");
        assert!(result.tools[0].output_schema.is_some());
        assert_eq!(result.next_cursor.as_deref(), Some("page-2"));
    }

    #[test]
    fn call_tool_params_serialize() {
        let mut args = Map::new();
        args.insert("vault".into(), json!("usdc"));
        let json = serde_json::to_value(CallToolParams {
            name: "deposit",
            arguments: &args,
        })
        .unwrap();
        assert_eq!(json, json!({"name": "deposit", "arguments": {"vault": "usdc"}}));
    }
}
