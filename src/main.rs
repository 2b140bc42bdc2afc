// src/main.rs
// pattern-server - Fabric and custom prompt patterns over MCP

use anyhow::Result;
use clap::{Parser, Subcommand};
use patterns::{config::PatternConfig, mcp::PatternServer, ops, ops::SourceFilter, store::PatternStore};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "patterns")]
#[command(about = "MCP server exposing Fabric and custom prompt patterns")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as MCP server over stdio (default)
    Serve,

    /// Print the current pattern catalog to stdout
    List {
        /// Filter by source
        #[arg(short, long, value_enum, default_value = "all")]
        source: SourceFilter,
    },
}

async fn run_mcp_server() -> Result<()> {
    let config = PatternConfig::from_env()?;
    config.ensure_custom_root()?;

    let server = PatternServer::new(&config);
    info!(
        fabric = %config.fabric_root.display(),
        custom = %config.custom_root.display(),
        "serving patterns over stdio"
    );

    // Run with stdio transport
    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

fn run_list(source: SourceFilter) -> Result<()> {
    let config = PatternConfig::from_env()?;
    let store = PatternStore::new(config.fabric_root.clone(), config.custom_root.clone());

    let catalog = store.scan()?;
    let response = ops::list(&catalog, source, &[]);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".config/pattern-server/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Quiet on stdio so log lines never corrupt the MCP stream
    let log_level = match &cli.command {
        Some(Commands::Serve) | None => Level::WARN,
        Some(Commands::List { .. }) => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve) => {
            run_mcp_server().await?;
        }
        Some(Commands::List { source }) => {
            run_list(source)?;
        }
    }

    Ok(())
}
