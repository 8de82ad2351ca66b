use super::{LocalTool, LocalToolError};
use crate::use_cases::execution_context::ExecutionContext;
use async_trait::async_trait;
use bridge_domain::{CallToolResult, ToolCall, ToolDefinition};
use serde_json::json;

pub const GET_WALLET_ADDRESS: &str = "get_wallet_address";

/// Reports the wallet address of every chain family.
pub struct GetWalletAddressTool;

#[async_trait]
impl LocalTool for GetWalletAddressTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(GET_WALLET_ADDRESS, "fetch all the wallet addresses of the user")
            .with_input_schema(json!({
                "type": "object",
                "properties": {},
            }))
    }

    async fn handle(
        &self,
        _call: &ToolCall,
        context: &ExecutionContext,
    ) -> Result<CallToolResult, LocalToolError> {
        let wallet = context.wallet();
        Ok(CallToolResult::json(&json!({
            "evmWalletAddress": wallet.evm,
            "solanaWalletAddress": wallet.solana,
            "suiWalletAddress": wallet.sui,
        })))
    }
}
