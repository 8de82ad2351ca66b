//! CLI entrypoint for blueprint-bridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then serves MCP on stdin/stdout.

use anyhow::{Context, Result};
use bridge_application::{
    EvmIntentExecutor, ExecutionContext, LocalToolKit, SolanaIntentExecutor, ToolRouter,
};
use bridge_domain::ChainType;
use bridge_infrastructure::{
    BridgeConfig, ConfigLoader, EthersEvmClient, McpRemoteToolSource, RemoteAuth, RpcSolanaClient,
    X402Payer,
};
use bridge_presentation::{Cli, McpHandler, serve};
use clap::Parser;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        return show_config(&cli);
    }

    info!("Starting blueprint-bridge");

    let file_config = if cli.no_config {
        ConfigLoader::load_env_only()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .context("failed to load configuration")?;
    let config = BridgeConfig::try_from(file_config)?;

    // === Dependency Injection ===
    let evm_client = match &config.evm {
        Some(evm) => Some(Arc::new(
            EthersEvmClient::connect(&evm.private_key, &evm.rpc_url)
                .await
                .context("failed to initialize EVM wallet")?,
        )),
        None => None,
    };
    let solana_client = match &config.solana {
        Some(solana) => Some(Arc::new(
            RpcSolanaClient::new(&solana.private_key, solana.rpc_url.as_str())
                .context("failed to initialize Solana wallet")?,
        )),
        None => None,
    };

    let auth = match (&config.remote.api_key, &evm_client) {
        (Some(key), _) => RemoteAuth::ApiKey(key.clone()),
        (None, Some(evm)) => {
            let payer = X402Payer::new(evm.wallet().clone());
            info!(payer = %payer.address(), "Remote calls are paid with x402");
            RemoteAuth::X402(payer)
        }
        // Rejected by config validation
        (None, None) => anyhow::bail!("an EVM private key is required without an API key"),
    };

    let context = ExecutionContext::new(
        evm_client.map(|c| EvmIntentExecutor::new(c)),
        solana_client.map(|c| SolanaIntentExecutor::new(c)),
    );
    log_wallets(&context);

    let remote = Arc::new(McpRemoteToolSource::new(config.remote.url.clone(), auth));
    info!(
        url = remote.url(),
        auth = if config.uses_api_key() { "api-key" } else { "x402" },
        "Remote tool source"
    );
    if let Err(e) = remote.connect().await {
        warn!(error = %e, "Remote MCP server unavailable, serving local tools until it recovers");
    }

    let router = ToolRouter::new(LocalToolKit::new(Arc::new(context)), remote);
    let handler = Arc::new(McpHandler::new(Arc::new(router)));

    serve(handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    info!("blueprint-bridge stopped");
    Ok(())
}

/// Logs go to stderr, and optionally to a file. stdout is reserved for the protocol.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn show_config(cli: &Cli) -> Result<()> {
    println!("Configuration sources (highest priority first):");
    for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
        println!("{line}");
    }
    println!();

    let config = if cli.no_config {
        ConfigLoader::load_env_only()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .context("failed to load configuration")?;

    println!("Merged configuration:");
    println!("{}", toml::to_string_pretty(&config.redacted())?);

    if let Err(e) = BridgeConfig::try_from(config) {
        println!("Configuration is not usable: {e}");
    }
    Ok(())
}

fn log_wallets(context: &ExecutionContext) {
    let wallet = context.wallet();
    for chain in [ChainType::Evm, ChainType::Solana] {
        if !context.is_configured(chain) {
            warn!(chain = %chain, "No wallet configured, intents for this chain will be rejected");
        }
    }
    info!(evm = %wallet.evm, solana = %wallet.solana, "Wallets ready");
}
