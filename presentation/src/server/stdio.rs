//! Line-delimited JSON-RPC server over stdio
//!
//! Each request is handled on its own task so a slow tool call never holds
//! up `tools/list` or `ping`. Responses funnel through a single writer task
//! and may leave in any order.

use super::handler::McpHandler;
use super::protocol::{
    INVALID_REQUEST, IncomingMessage, OutgoingResponse, PARSE_ERROR, RpcFailure,
};
use serde_json::Value;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Serve until `reader` reaches EOF, then wait for in-flight requests.
///
/// A read error also stops reading, but in-flight requests still finish and
/// their responses are written before the error is returned.
pub async fn serve<R, W>(handler: Arc<McpHandler>, mut reader: R, writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<OutgoingResponse>();
    let writer_task = tokio::spawn(write_responses(writer, rx));
    let mut in_flight = JoinSet::new();
    let mut buf = Vec::new();

    info!("MCP server listening on stdio");

    let read_result = loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break Ok(()),
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Failed to read from host");
                break Err(e);
            }
        }

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_slice(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparseable message from host");
                let _ = tx.send(OutgoingResponse::failure(
                    Value::Null,
                    RpcFailure::new(PARSE_ERROR, "Parse error"),
                ));
                continue;
            }
        };

        if value.is_array() {
            let _ = tx.send(OutgoingResponse::failure(
                Value::Null,
                RpcFailure::new(INVALID_REQUEST, "Batch requests are not supported"),
            ));
            continue;
        }

        let id = value.get("id").cloned();
        let message: IncomingMessage = match serde_json::from_value(value) {
            Ok(message) => message,
            Err(e) => {
                if let Some(id) = id {
                    let _ = tx.send(OutgoingResponse::failure(
                        id,
                        RpcFailure::new(INVALID_REQUEST, format!("Invalid request: {e}")),
                    ));
                }
                continue;
            }
        };

        let Some(id) = message.id else {
            handler.handle_notification(&message.method);
            continue;
        };

        debug!(method = %message.method, id = %id, "Request");
        let handler = Arc::clone(&handler);
        let tx = tx.clone();
        in_flight.spawn(async move {
            let outcome = handler.handle_request(&message.method, message.params).await;
            let _ = tx.send(OutgoingResponse::from_outcome(id, outcome));
        });

        // Reap finished tasks without blocking the read loop
        while let Some(joined) = in_flight.try_join_next() {
            if let Err(e) = joined {
                error!(error = %e, "Request task failed");
            }
        }
    };

    info!("Input closed, draining in-flight requests");
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Request task failed");
        }
    }

    drop(tx);
    let write_result = match writer_task.await {
        Ok(result) => result,
        Err(e) => Err(io::Error::other(e)),
    };
    read_result.and(write_result)
}

async fn write_responses<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<OutgoingResponse>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response).map_err(io::Error::other)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
    }
    writer.shutdown().await
}
