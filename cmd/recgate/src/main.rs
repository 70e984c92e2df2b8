//! Recgate CLI - rule-based activation gate for session recording.
//!
//! Commands:
//! - `recgate check` - Validate a gate configuration file
//! - `recgate decide` - Run one visit decision end to end

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recgate_config::Config;
use std::fs;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "recgate")]
#[command(about = "Rule-based activation gate for session-recording tags")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a gate configuration file
    Check {
        /// Path to the configuration JSON
        #[arg(short, long, default_value = "recgate.json")]
        config: String,
    },

    /// Run one visit decision with real geolocation lookups
    Decide {
        /// Path to the configuration JSON
        #[arg(short, long, default_value = "recgate.json")]
        config: String,

        /// Pathname of the visited page
        #[arg(short, long)]
        path: String,

        /// Cookie header of the visit, for session detection
        #[arg(long, default_value = "")]
        cookies: String,
    },
}

fn load_config(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {path}"))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse configuration file: {path}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Check { config } | Commands::Decide { config, .. } => load_config(config)?,
    };

    // Initialize tracing; the config debug flag raises the filter too
    let filter = if cli.verbose || config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Check { .. } => commands::check::run(config),
        Commands::Decide { path, cookies, .. } => commands::decide::run(config, &path, &cookies).await,
    }
}
