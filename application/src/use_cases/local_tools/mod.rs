//! Local tools
//!
//! Tools the bridge answers itself, without contacting the remote catalogue.
//! Names are matched exactly; local tools win over remote tools of the same
//! name.

mod execute_intent;
mod get_wallet_address;

pub use execute_intent::{EXECUTE_INTENT, ExecuteIntentTool};
pub use get_wallet_address::{GET_WALLET_ADDRESS, GetWalletAddressTool};

use super::execute_intent::ExecuteIntentError;
use super::execution_context::ExecutionContext;
use async_trait::async_trait;
use bridge_domain::{CallToolResult, ToolCall, ToolDefinition};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised by local tool handlers.
#[derive(Error, Debug)]
pub enum LocalToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Execution(#[from] ExecuteIntentError),
}

/// A tool handled in-process.
#[async_trait]
pub trait LocalTool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    async fn handle(
        &self,
        call: &ToolCall,
        context: &ExecutionContext,
    ) -> Result<CallToolResult, LocalToolError>;
}

/// Registry of local tools sharing one [`ExecutionContext`].
pub struct LocalToolKit {
    context: Arc<ExecutionContext>,
    tools: Vec<Box<dyn LocalTool>>,
}

impl LocalToolKit {
    /// Kit with the built-in wallet and intent tools
    pub fn new(context: Arc<ExecutionContext>) -> Self {
        Self::with_tools(
            context,
            vec![Box::new(GetWalletAddressTool), Box::new(ExecuteIntentTool)],
        )
    }

    pub fn with_tools(context: Arc<ExecutionContext>, tools: Vec<Box<dyn LocalTool>>) -> Self {
        Self { context, tools }
    }

    fn find(&self, name: &str) -> Option<&dyn LocalTool> {
        self.tools
            .iter()
            .find(|tool| tool.definition().name == name)
            .map(|tool| tool.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Run a local tool. Unknown names yield an error result, not an `Err`.
    pub async fn call(&self, call: &ToolCall) -> Result<CallToolResult, LocalToolError> {
        match self.find(&call.tool_name) {
            Some(tool) => {
                debug!(tool = %call.tool_name, "Calling local tool");
                tool.handle(call, &self.context).await
            }
            None => Ok(CallToolResult::error(format!(
                "unknown local tool: {}",
                call.tool_name
            ))),
        }
    }
}
