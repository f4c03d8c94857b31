mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use vidforge::pipeline::{PipelineOrchestrator, PipelineRequest};
use vidforge::{config, server};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidforge=trace,vidforge_av=trace".to_string()
        } else {
            "vidforge=info,vidforge_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve(host, port, cli.config.as_deref()))
        }
        Commands::Run {
            topic,
            tone,
            duration,
            audience,
            call_to_action,
        } => {
            let request = PipelineRequest {
                topic,
                tone,
                duration_seconds: duration,
                audience,
                call_to_action,
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_once(request, cli.config.as_deref()))
        }
        Commands::CheckTools => {
            check_tools();
            Ok(())
        }
        Commands::Validate { config } => {
            let path = config.or(cli.config);
            match config::load_config_or_default(path.as_deref()) {
                Ok(loaded) => {
                    println!("Configuration is valid");
                    let missing = loaded.missing_credentials();
                    if !missing.is_empty() {
                        println!("Warning: missing credentials: {}", missing.join(", "));
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

async fn serve(host: String, port: u16, config_path: Option<&std::path::Path>) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    config.server.host = host;
    config.server.port = port;

    tracing::info!("Starting Vidforge server");

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(
            "Missing credentials ({}); pipeline requests will be rejected until they are set",
            missing.join(", ")
        );
    }

    server::run_server(config).await
}

async fn run_once(request: PipelineRequest, config_path: Option<&std::path::Path>) -> Result<()> {
    let config = Arc::new(config::load_config_or_default(config_path)?);
    let orchestrator = PipelineOrchestrator::from_config(config);

    let response = orchestrator.run(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

fn check_tools() {
    for tool in vidforge_av::check_tools() {
        if tool.available {
            println!(
                "{}: OK ({})",
                tool.name,
                tool.version.as_deref().unwrap_or("unknown version")
            );
        } else {
            println!("{}: NOT FOUND", tool.name);
        }
    }
}
