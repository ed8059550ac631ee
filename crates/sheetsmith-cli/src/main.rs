//! Sheetsmith server
//!
//! Main entry point: loads configuration, fails fast on a missing API
//! key, and serves the generation API.

use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use sheetsmith_cli::{create_router, AppState, Config};
use sheetsmith_generate::{GenerationClient, HttpCompletionBackend, ResourceGenerator};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Sheetsmith - Educational Resource Generator
///
/// Serves an HTTP API that generates worksheets, quizzes, rubrics, exit
/// slips, and lesson plans with an LLM, tuned per grade and subject.
#[derive(Parser, Debug)]
#[command(name = "sheetsmith")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: sheetsmith.json in current directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Port for the HTTP API server (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Sheetsmith starting");

    match run_server(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Loads configuration, builds the pipeline, and serves the API until
/// interrupted.
async fn run_server(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }
    config.validate()?;

    // Resolve the API key now so a bad deployment fails before the first
    // request, not during it.
    let api_key = config.resolve_api_key()?;

    print_config(&config);

    let backend = HttpCompletionBackend::new(
        config.api_base_url.clone(),
        api_key,
        config.model.clone(),
        config.request_timeout_seconds,
    )?;
    let client = GenerationClient::new(Arc::new(backend)).with_attempt_budgets(
        config.max_transport_retries,
        config.max_validation_retries,
    );
    let generator = Arc::new(ResourceGenerator::new(client));

    let addr: SocketAddr = ([127, 0, 0, 1], config.port).into();
    let state = AppState::new(config, generator);
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        anyhow::anyhow!("Failed to bind to {addr}: {e}\n\nSuggestion: Try a different port with --port")
    })?;

    println!("Sheetsmith API running on http://{addr}");
    println!("Press Ctrl+C to stop");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Received Ctrl+C, shutting down");
}

/// Loads configuration from the specified path or the default location.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Config::load_from_file(path).map_err(|e| anyhow::anyhow!("{e}"))
        }
        None => Config::load().map_err(|e| anyhow::anyhow!("{e}")),
    }
}

/// Prints the loaded configuration.
fn print_config(config: &Config) {
    println!("Configuration loaded:");
    println!("  Model: {}", config.model);
    println!("  API base URL: {}", config.api_base_url);
    println!("  Request timeout: {}s", config.request_timeout_seconds);
    println!("  Port: {}", config.port);
}
