use super::{LocalTool, LocalToolError};
use crate::use_cases::execute_intent::ExecuteIntentError;
use crate::use_cases::execution_context::ExecutionContext;
use async_trait::async_trait;
use bridge_domain::{CallToolResult, ChainType, ToolCall, ToolDefinition, decode_intent};
use serde_json::json;
use tracing::info;

pub const EXECUTE_INTENT: &str = "execute_intent";

/// Decodes a base64 intent and runs it on the named chain family.
pub struct ExecuteIntentTool;

#[async_trait]
impl LocalTool for ExecuteIntentTool {
    fn definition(&self) -> ToolDefinition {
        let chain_types: Vec<&str> = ChainType::ALL.iter().map(|c| c.as_str()).collect();
        ToolDefinition::new(
            EXECUTE_INTENT,
            "Executes an intent by signing and sending the transaction to the blockchain. \
             Use this after receiving an intent from deposit/withdraw tools.",
        )
        .with_input_schema(json!({
            "type": "object",
            "properties": {
                "chainType": {
                    "type": "string",
                    "enum": chain_types,
                    "description": "The chain type of the intent",
                },
                "intent": {
                    "type": "string",
                    "description": "The base64-encoded intent string returned by the blueprint tools",
                },
            },
            "required": ["chainType", "intent"],
        }))
    }

    async fn handle(
        &self,
        call: &ToolCall,
        context: &ExecutionContext,
    ) -> Result<CallToolResult, LocalToolError> {
        let chain_tag = call
            .require_string("chainType")
            .map_err(LocalToolError::InvalidArguments)?;
        let encoded = call
            .require_string("intent")
            .map_err(LocalToolError::InvalidArguments)?;

        // Reject unknown or unconfigured chains before touching the payload
        let chain: ChainType = chain_tag.parse().map_err(ExecuteIntentError::from)?;
        context.require(chain)?;

        let envelope = decode_intent(encoded).map_err(ExecuteIntentError::InvalidIntent)?;
        let transactions = context.execute_intent(chain, envelope).await?;

        info!(chain = %chain, count = transactions.len(), "Intent executed");

        Ok(CallToolResult::json(&json!({
            "success": true,
            "transactions": transactions,
            "message": format!("Successfully executed {} transaction(s)", transactions.len()),
        })))
    }
}
