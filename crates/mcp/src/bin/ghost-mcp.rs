// Ghost Admin API MCP server over stdio

use anyhow::Result;
use clap::{Parser, ValueEnum};
use ghost_mcp::{McpServer, Overrides, ServerConfig};
use ghost_sdk::{TracingObserver, TrailingSlash};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ghost-mcp")]
#[command(about = "MCP server for the Ghost Admin API", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "ghost-mcp.toml")]
    config: PathBuf,

    /// Site URL of the Ghost installation
    #[arg(long, env = "GHOST_API_URL")]
    api_url: Option<String>,

    /// Admin API key (id:secret)
    #[arg(long, env = "GHOST_ADMIN_API_KEY", hide_env_values = true)]
    admin_api_key: Option<String>,

    /// Accept-Version header value
    #[arg(long, env = "GHOST_API_VERSION")]
    api_version: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Trailing slash policy: always, never or reads-only
    #[arg(long)]
    trailing_slash: Option<TrailingSlash>,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ghost_mcp=info,ghost_sdk=info".into());

    // stdout carries the protocol
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    match format {
        LogFormat::Text => builder.with_target(false).init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    tracing::info!("Ghost MCP server starting...");

    let config = ServerConfig::load(&args.config)?.apply(Overrides {
        api_url: args.api_url,
        admin_api_key: args.admin_api_key,
        api_version: args.api_version,
        timeout_secs: args.timeout_secs,
        trailing_slash: args.trailing_slash,
    });

    let client = config.build_client(Arc::new(TracingObserver))?;
    tracing::info!(
        "Using Ghost at {} (Accept-Version {})",
        client.config().base_url,
        client.config().api_version
    );

    let server = McpServer::new(client);
    tracing::info!("Registered {} tools", server.tools().len());
    server.start().await?;

    Ok(())
}
