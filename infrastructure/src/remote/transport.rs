//! Response decoding for MCP streamable HTTP.
//!
//! A POST may be answered with a single `application/json` body or with a
//! `text/event-stream` carrying server messages. In the stream case every
//! event is classified and the response whose id matches our request wins;
//! server-initiated notifications and requests are skipped.

use super::error::{RemoteError, Result};
use super::protocol::JsonRpcResponse;
use serde_json::Value;

/// Classification of a server-to-client JSON-RPC message.
#[derive(Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// A response to one of our requests (has `id`, no `method`).
    Response { id: u64 },
    /// A request from the server (has `id` + `method`).
    IncomingRequest,
    /// A notification (has `method`, no `id`).
    Notification,
}

/// Classify a JSON-RPC message by inspecting `id` and `method` fields.
pub fn classify_message(json: &Value) -> MessageKind {
    let id = json.get("id").and_then(|v| v.as_u64());
    let method = json.get("method").and_then(|v| v.as_str());

    match (id, method) {
        (Some(_), Some(_)) => MessageKind::IncomingRequest,
        (Some(id), None) => MessageKind::Response { id },
        _ => MessageKind::Notification,
    }
}

/// Whether a `Content-Type` header denotes an SSE stream
pub fn is_event_stream(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.trim_start().starts_with("text/event-stream"))
}

/// Extract the response to request `id` from a reply body.
pub fn decode_response(content_type: Option<&str>, body: &str, id: u64) -> Result<JsonRpcResponse> {
    if is_event_stream(content_type) {
        return sse_events(body)
            .filter_map(|data| serde_json::from_str::<Value>(&data).ok())
            .flat_map(|value| match value {
                Value::Array(batch) => batch,
                single => vec![single],
            })
            .find(|msg| classify_message(msg) == MessageKind::Response { id })
            .map(serde_json::from_value::<JsonRpcResponse>)
            .transpose()?
            .ok_or_else(|| {
                RemoteError::UnexpectedResponse(format!("event stream ended without a response to request {id}"))
            });
    }

    let response: JsonRpcResponse = serde_json::from_str(body)?;
    match response.id {
        Some(got) if got != id => Err(RemoteError::UnexpectedResponse(format!(
            "response id {got} does not match request {id}"
        ))),
        _ => Ok(response),
    }
}

/// Joined `data:` payloads of each SSE event, in order.
fn sse_events(body: &str) -> impl Iterator<Item = String> + '_ {
    let mut events = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            if !current.is_empty() {
                events.push(current.join("\n"));
                current.clear();
            }
        } else if let Some(data) = line.strip_prefix("data:") {
            current.push(data.strip_prefix(' ').unwrap_or(data));
        }
    }
    if !current.is_empty() {
        events.push(current.join("\n"));
    }

    events.into_iter()
}
