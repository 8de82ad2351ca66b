//! Tool router
//!
//! Presents the remote catalogue and the local tools as a single tool set.
//! Local tools are consulted first on every call; anything else is
//! forwarded to the remote source.

use super::local_tools::{LocalToolError, LocalToolKit};
use bridge_domain::{CallToolResult, ToolCall, ToolDefinition, ToolProvider, sanitize_schema};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ToolRouter {
    local: LocalToolKit,
    remote: Arc<dyn ToolProvider>,
}

impl ToolRouter {
    pub fn new(local: LocalToolKit, remote: Arc<dyn ToolProvider>) -> Self {
        Self { local, remote }
    }

    /// Remote tools followed by local tools.
    ///
    /// A failing remote source is logged and leaves only the local tools.
    pub async fn list_tools(&self) -> Vec<ToolDefinition> {
        let (remote, local) = futures::join!(self.remote.discover_tools(), async {
            self.local.list_tools()
        });

        let mut tools = match remote {
            Ok(remote) => remote.into_iter().map(prepare_remote_definition).collect(),
            Err(e) => {
                warn!(
                    provider = self.remote.display_name(),
                    error = %e,
                    "Remote tool listing failed, serving local tools only"
                );
                Vec::new()
            }
        };

        debug!(remote = tools.len(), local = local.len(), "Tool listing assembled");
        tools.extend(local);
        tools
    }

    /// Dispatch a call to the local tool of that name, or to the remote source.
    ///
    /// Local failures are returned as `Err`. Remote failures become an error
    /// result so the host can still read them.
    pub async fn call(&self, call: &ToolCall) -> Result<CallToolResult, LocalToolError> {
        if self.local.has(&call.tool_name) {
            return self.local.call(call).await;
        }

        info!(tool = %call.tool_name, provider = self.remote.id(), "Forwarding tool call");
        match self.remote.call(call).await {
            Ok(result) => Ok(result.with_text_fallback()),
            Err(e) => {
                warn!(tool = %call.tool_name, error = %e, "Remote tool call failed");
                Ok(CallToolResult::compact_error(format!(
                    "error calling remote tool '{}': {}",
                    call.tool_name,
                    e.message()
                )))
            }
        }
    }
}

/// Strip schema keywords the host cannot resolve and drop the output schema.
fn prepare_remote_definition(mut definition: ToolDefinition) -> ToolDefinition {
    definition.input_schema = sanitize_schema(definition.input_schema);
    definition.output_schema = None;
    definition
}
