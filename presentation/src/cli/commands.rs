//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for blueprint-bridge
#[derive(Parser, Debug)]
#[command(name = "blueprint-bridge")]
#[command(author, version, about = "MCP bridge that executes Blueprint intents with your own wallets")]
#[command(long_about = r#"
Blueprint Bridge is an MCP server spoken to over stdio. It forwards the
Blueprint tool catalogue from the remote server and adds two local tools:

  get_wallet_address   Report the configured wallet addresses
  execute_intent       Sign and submit a base64 intent on EVM or Solana

Credentials come from the environment or a config file:
  EVM_PRIVATE_KEY, SOLANA_PRIVATE_KEY, BLUEPRINT_API_KEY,
  BLUEPRINT_MCP_URL, BASE_RPC_URL, SOLANA_RPC_URL

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./blueprint.toml    Project-level config
3. ~/.config/blueprint-bridge/config.toml   Global config
Environment variables override every file.

Without BLUEPRINT_API_KEY, remote tool calls are paid with x402 from the
EVM wallet.

Logs go to stderr; stdout carries the protocol.
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files (environment only)
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
