//! # flowqa: run the BERT QA processor from the command line
//!
//! This is the main entry point for the `flowqa` command-line interface.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use flowqa_cli::{
    ask::{handle_ask, AskArgs},
    config::get_config,
    process::{handle_process, ProcessArgs},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, global = true, env = "FLOWQA_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer the question of every record in a JSON-lines file
    Process(ProcessArgs),
    /// Ask a single question about a paragraph
    Ask(AskArgs),
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for records.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowqa=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = get_config(cli.config.as_deref())?;
    info!(provider = %config.provider.provider, "Configuration loaded");

    match &cli.command {
        Commands::Process(args) => {
            handle_process(config, args).await?;
        }
        Commands::Ask(args) => {
            let routed = handle_ask(config, args).await?;
            let attributes = serde_json::to_string_pretty(&routed.record.attributes)?;
            println!("{attributes}");
            if !routed.is_success() {
                bail!("record routed to {}", routed.relationship);
            }
        }
    }

    Ok(())
}
