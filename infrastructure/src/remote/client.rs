//! MCP streamable HTTP client exposed as a [`ToolProvider`].

use super::error::{RemoteError, Result};
use super::payment::{PAYMENT_HEADER, PaymentRequired, X402Payer};
use super::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, ListToolsParams, ListToolsResult,
};
use super::transport::decode_response;
use async_trait::async_trait;
use bridge_domain::{CallToolResult, ProviderError, ToolCall, ToolDefinition, ToolProvider};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const SESSION_HEADER: &str = "Mcp-Session-Id";

const ACCEPT_VALUE: &str = "application/json, text/event-stream";

/// Upper bound on `tools/list` pages followed
const MAX_LIST_PAGES: usize = 50;

/// How the bridge pays for remote calls
pub enum RemoteAuth {
    /// `Authorization: Bearer <key>`
    ApiKey(SecretString),
    /// Per-request x402 payments signed by the EVM wallet
    X402(X402Payer),
}

/// Established MCP session. Stateless servers hand out no id.
struct Session {
    id: Option<String>,
}

/// Remote tool catalogue reached over MCP streamable HTTP.
///
/// The session is opened lazily on first use and reopened once if the
/// server reports it expired.
pub struct McpRemoteToolSource {
    http: reqwest::Client,
    url: String,
    auth: RemoteAuth,
    session: Mutex<Option<Session>>,
}

impl McpRemoteToolSource {
    pub fn new(url: impl Into<String>, auth: RemoteAuth) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            auth,
            session: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open the session now instead of on first use.
    pub async fn connect(&self) -> Result<()> {
        self.session_id().await.map(|_| ())
    }

    async fn session_id(&self) -> Result<Option<String>> {
        let mut session = self.session.lock().await;
        if let Some(existing) = session.as_ref() {
            return Ok(existing.id.clone());
        }
        let id = self.initialize().await?;
        *session = Some(Session { id: id.clone() });
        Ok(id)
    }

    async fn initialize(&self) -> Result<Option<String>> {
        let request = JsonRpcRequest::new(
            "initialize",
            Some(serde_json::to_value(InitializeParams::default())?),
        );
        let (response, session_id) = self.post(&request, None).await?;
        let result: InitializeResult = serde_json::from_value(into_result(response)?)?;

        info!(
            url = %self.url,
            protocol = %result.protocol_version,
            server = result.server_info.as_ref().map(|s| s.name.as_str()).unwrap_or("unknown"),
            session = session_id.is_some(),
            "Remote MCP session initialized"
        );

        let notification = JsonRpcNotification::new("notifications/initialized");
        let body = serde_json::to_vec(&notification)?;
        let response = self.send_paid(&body, session_id.as_deref()).await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "initialized notification was not accepted");
        }

        Ok(session_id)
    }

    /// Send a request within the session, reopening it once on expiry.
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let mut retried = false;
        loop {
            let session_id = self.session_id().await?;
            let request = JsonRpcRequest::new(method, params.clone());
            debug!(method, id = request.id, "Remote MCP request");

            match self.post(&request, session_id.as_deref()).await {
                Err(RemoteError::SessionExpired) if !retried => {
                    warn!(method, "Remote MCP session expired, reinitializing");
                    *self.session.lock().await = None;
                    retried = true;
                }
                Err(e) => return Err(e),
                Ok((response, _)) => return into_result(response),
            }
        }
    }

    async fn post(
        &self,
        request: &JsonRpcRequest,
        session_id: Option<&str>,
    ) -> Result<(JsonRpcResponse, Option<String>)> {
        let body = serde_json::to_vec(request)?;
        let response = self.send_paid(&body, session_id).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND && session_id.is_some() {
            return Err(RemoteError::SessionExpired);
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let headers = response.headers();
        let new_session = header_str(headers, SESSION_HEADER);
        let content_type = header_str(headers, CONTENT_TYPE.as_str());
        let text = response.text().await?;

        let decoded = decode_response(content_type.as_deref(), &text, request.id)?;
        Ok((decoded, new_session.or_else(|| session_id.map(String::from))))
    }

    /// POST `body`, settling an x402 payment demand if one comes back.
    async fn send_paid(&self, body: &[u8], session_id: Option<&str>) -> Result<Response> {
        let response = self.send(body, session_id, None).await?;
        if response.status() != StatusCode::PAYMENT_REQUIRED {
            return Ok(response);
        }

        let RemoteAuth::X402(payer) = &self.auth else {
            return Err(RemoteError::Payment(
                "server demanded payment although an API key is configured".into(),
            ));
        };

        let headers = response.headers().clone();
        let text = response.text().await?;
        let required = PaymentRequired::from_response(&headers, &text)?;
        let payment = payer.pay(&required)?;

        let paid = self.send(body, session_id, Some(&payment)).await?;
        if paid.status() == StatusCode::PAYMENT_REQUIRED {
            let reason = paid.text().await.unwrap_or_default();
            return Err(RemoteError::Payment(format!("payment rejected: {reason}")));
        }
        Ok(paid)
    }

    async fn send(&self, body: &[u8], session_id: Option<&str>, payment: Option<&str>) -> Result<Response> {
        let mut builder = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, ACCEPT_VALUE)
            .body(body.to_vec());

        if let Some(id) = session_id {
            builder = builder.header(SESSION_HEADER, id);
        }
        if let RemoteAuth::ApiKey(key) = &self.auth {
            builder = builder.bearer_auth(key.expose_secret());
        }
        if let Some(payment) = payment {
            builder = builder.header(PAYMENT_HEADER, payment);
        }

        Ok(builder.send().await?)
    }
}

fn header_str(headers: &reqwest::header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

fn into_result(response: JsonRpcResponse) -> Result<Value> {
    if let Some(error) = response.error {
        return Err(RemoteError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    response
        .result
        .ok_or_else(|| RemoteError::UnexpectedResponse("response has neither result nor error".into()))
}

#[async_trait]
impl ToolProvider for McpRemoteToolSource {
    fn id(&self) -> &str {
        "remote"
    }

    fn display_name(&self) -> &str {
        "Blueprint MCP"
    }

    async fn discover_tools(&self) -> std::result::Result<Vec<ToolDefinition>, ProviderError> {
        let mut tools = Vec::new();
        let mut cursor = None;

        for _ in 0..MAX_LIST_PAGES {
            let params = serde_json::to_value(ListToolsParams { cursor })
                .map_err(RemoteError::from)?;
            let page: ListToolsResult = serde_json::from_value(self.request("tools/list", Some(params)).await?)
                .map_err(|e| ProviderError::DiscoveryFailed(format!("invalid tools/list result: {e}")))?;

            tools.extend(page.tools);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(count = tools.len(), "Remote tools discovered");
        Ok(tools)
    }

    async fn call(&self, call: &ToolCall) -> std::result::Result<CallToolResult, ProviderError> {
        let params = serde_json::to_value(CallToolParams {
            name: &call.tool_name,
            arguments: &call.arguments,
        })
        .map_err(RemoteError::from)?;

        let result = self.request("tools/call", Some(params)).await?;
        serde_json::from_value(result)
            .map_err(|e| ProviderError::ExecutionFailed(format!("invalid tools/call result: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::signers::LocalWallet;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex as StdMutex};
    use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
    use tokio::net::{TcpListener, TcpStream};

    struct Canned {
        status: u16,
        headers: Vec<(&'static str, String)>,
        body: String,
    }

    type Responder = Box<dyn Fn(&Value) -> Canned + Send>;

    #[derive(Debug, Clone)]
    struct Recorded {
        headers: HashMap<String, String>,
        body: Value,
    }

    #[derive(Clone, Default)]
    struct TestServer {
        responders: Arc<StdMutex<VecDeque<Responder>>>,
        requests: Arc<StdMutex<Vec<Recorded>>>,
    }

    impl TestServer {
        fn then(self, responder: impl Fn(&Value) -> Canned + Send + 'static) -> Self {
            self.responders.lock().unwrap().push_back(Box::new(responder));
            self
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }

        fn methods(&self) -> Vec<String> {
            self.requests()
                .iter()
                .map(|r| r.body["method"].as_str().unwrap_or_default().to_string())
                .collect()
        }

        async fn start(&self) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let server = self.clone();
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    tokio::spawn(server.clone().handle(stream));
                }
            });
            format!("http://{addr}/mcp")
        }

        async fn handle(self, mut stream: TcpStream) {
            let (reader, mut writer) = stream.split();
            let mut reader = BufReader::new(reader);
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                    return;
                }
                let mut headers = HashMap::new();
                loop {
                    line.clear();
                    reader.read_line(&mut line).await.unwrap();
                    let header = line.trim_end();
                    if header.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = header.split_once(':') {
                        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
                    }
                }
                let len = headers
                    .get("content-length")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                let mut body = vec![0u8; len];
                reader.read_exact(&mut body).await.unwrap();
                let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

                let responder = self.responders.lock().unwrap().pop_front();
                let canned = match responder {
                    Some(respond) => respond(&body),
                    None => Canned { status: 500, headers: vec![], body: "unexpected request".into() },
                };
                self.requests.lock().unwrap().push(Recorded { headers, body });

                let mut out = format!(
                    "HTTP/1.1 {} Canned\r\ncontent-length: {}\r\n",
                    canned.status,
                    canned.body.len()
                );
                for (name, value) in &canned.headers {
                    out.push_str(&format!("{name}: {value}\r\n"));
                }
                out.push_str("\r\n");
                out.push_str(&canned.body);
                writer.write_all(out.as_bytes()).await.unwrap();
            }
        }
    }

    fn json_result(request: &Value, result: Value) -> Canned {
        Canned {
            status: 200,
            headers: vec![("content-type", "application/json".into())],
            body: json!({"jsonrpc": "2.0", "id": request["id"], "result": result}).to_string(),
        }
    }

    fn init_result(request: &Value, session: Option<&str>) -> Canned {
        let mut canned = json_result(
            request,
            json!({
                "protocolVersion": "2025-03-26",
                "capabilities": {"tools": {}},
                "serverInfo": {"name": "blueprint", "version": "1.0.0"}
            }),
        );
        if let Some(id) = session {
            canned.headers.push(("mcp-session-id", id.to_string()));
        }
        canned
    }

    fn accepted(_: &Value) -> Canned {
        Canned { status: 202, headers: vec![], body: String::new() }
    }

    fn payment_required(_: &Value) -> Canned {
        Canned {
            status: 402,
            headers: vec![("content-type", "application/json".into())],
            body: json!({
                "x402Version": 1,
                "accepts": [{
                    "scheme": "exact", "network": "base", "maxAmountRequired": "1000",
                    "payTo": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
                    "asset": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"
                }]
            })
            .to_string(),
        }
    }

    fn api_key() -> RemoteAuth {
        RemoteAuth::ApiKey(SecretString::from("sk-test"))
    }

    #[tokio::test]
    async fn test_handshake_then_list_with_session() {
        let server = TestServer::default()
            .then(|req| init_result(req, Some("sess-1")))
            .then(accepted)
            .then(|req| json_result(req, json!({"tools": [{"name": "get_vaults", "inputSchema": {"type": "object"}}]})));
        let url = server.start().await;
        let remote = McpRemoteToolSource::new(url, api_key());

        let tools = remote.discover_tools().await.unwrap();

        assert_eq!(tools[0].name, "get_vaults");
        assert_eq!(
            server.methods(),
            vec!["initialize", "notifications/initialized", "tools/list"]
        );
        let requests = server.requests();
        assert_eq!(requests[0].body["params"]["protocolVersion"], "2025-03-26");
        assert!(requests[0].headers.get("mcp-session-id").is_none());
        for r in &requests {
            assert_eq!(r.headers["authorization"], "Bearer sk-test");
            assert!(r.headers["accept"].contains("text/event-stream"));
        }
        assert_eq!(requests[1].headers["mcp-session-id"], "sess-1");
        assert_eq!(requests[2].headers["mcp-session-id"], "sess-1");
    }

    #[tokio::test]
    async fn test_list_follows_cursor() {
        let server = TestServer::default()
            .then(|req| init_result(req, None))
            .then(accepted)
            .then(|req| json_result(req, json!({"tools": [{"name": "a"}], "nextCursor": "p2"})))
            .then(|req| json_result(req, json!({"tools": [{"name": "b"}]})));
        let remote = McpRemoteToolSource::new(server.start().await, api_key());

        let names: Vec<_> = remote.discover_tools().await.unwrap().into_iter().map(|t| t.name).collect();

        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(server.requests()[3].body["params"]["cursor"], "p2");
    }

    #[tokio::test]
    async fn test_call_with_event_stream_reply() {
        let server = TestServer::default()
            .then(|req| init_result(req, Some("s")))
            .then(accepted)
            .then(|req| Canned {
                status: 200,
                headers: vec![("content-type", "text/event-stream".into())],
                body: format!(
                    "event: message\ndata: {}\n\nevent: message\ndata: {}\n\n",
                    json!({"jsonrpc": "2.0", "method": "notifications/message", "params": {}}),
                    json!({"jsonrpc": "2.0", "id": req["id"], "result": {"content": [], "structuredContent": {"apy": 4.2}}})
                ),
            });
        let remote = McpRemoteToolSource::new(server.start().await, api_key());

        let result = remote
            .call(&ToolCall::new("get_vaults").with_arg("vault", "usdc"))
            .await
            .unwrap();

        assert!(result.content.is_empty());
        assert_eq!(result.structured_content, Some(json!({"apy": 4.2})));
        let sent = &server.requests()[2].body;
        assert_eq!(sent["params"], json!({"name": "get_vaults", "arguments": {"vault": "usdc"}}));
    }

    #[tokio::test]
    async fn test_rpc_error_is_execution_failure() {
        let server = TestServer::default()
            .then(|req| init_result(req, None))
            .then(accepted)
            .then(|req| Canned {
                status: 200,
                headers: vec![("content-type", "application/json".into())],
                body: json!({"jsonrpc": "2.0", "id": req["id"], "error": {"code": -32602, "message": "Unknown tool: nope"}}).to_string(),
            });
        let remote = McpRemoteToolSource::new(server.start().await, api_key());

        let err = remote.call(&ToolCall::new("nope")).await.unwrap_err();

        assert!(matches!(err, ProviderError::ExecutionFailed(_)));
        assert_eq!(err.message(), "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_expired_session_is_reopened_once() {
        let server = TestServer::default()
            .then(|req| init_result(req, Some("old")))
            .then(accepted)
            .then(|_| Canned { status: 404, headers: vec![], body: "no such session".into() })
            .then(|req| init_result(req, Some("new")))
            .then(accepted)
            .then(|req| json_result(req, json!({"tools": []})));
        let remote = McpRemoteToolSource::new(server.start().await, api_key());

        remote.discover_tools().await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 6);
        assert_eq!(requests[5].headers["mcp-session-id"], "new");
    }

    #[tokio::test]
    async fn test_x402_payment_is_attached_on_retry() {
        let server = TestServer::default()
            .then(payment_required)
            .then(|req| init_result(req, Some("paid")))
            .then(accepted)
            .then(payment_required)
            .then(|req| json_result(req, json!({"content": [{"type": "text", "text": "ok"}]})));
        let wallet: LocalWallet = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
            .parse()
            .unwrap();
        let remote = McpRemoteToolSource::new(server.start().await, RemoteAuth::X402(X402Payer::new(wallet)));

        let result = remote.call(&ToolCall::new("deposit")).await.unwrap();

        assert_eq!(result.first_text(), Some("ok"));
        let requests = server.requests();
        assert_eq!(
            server.methods(),
            vec!["initialize", "initialize", "notifications/initialized", "tools/call", "tools/call"]
        );
        assert!(requests[0].headers.get("x-payment").is_none());
        assert!(requests[1].headers.contains_key("x-payment"));
        assert!(requests[4].headers.contains_key("x-payment"));
        assert!(requests.iter().all(|r| !r.headers.contains_key("authorization")));
    }

    #[tokio::test]
    async fn test_payment_demand_with_api_key_fails() {
        let server = TestServer::default().then(payment_required);
        let remote = McpRemoteToolSource::new(server.start().await, api_key());

        let err = remote.discover_tools().await.unwrap_err();

        assert!(matches!(err, ProviderError::ConfigurationError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_not_available() {
        let remote = McpRemoteToolSource::new("http://127.0.0.1:1/mcp", api_key());

        let err = remote.discover_tools().await.unwrap_err();

        assert!(matches!(err, ProviderError::NotAvailable(_)));
    }
}
