use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rabota::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "rabota",
    version,
    about = "Normalize HeadHunter, SuperJob and canonical vacancy payloads",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configuration
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a file of raw vacancy payloads
    Normalize {
        /// JSON file with an array of payloads or a provider envelope
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of normalization workers
        #[arg(short, long)]
        workers: Option<usize>,

        /// Write full records instead of the compact projection
        #[arg(long, default_value = "false")]
        full: bool,
    },

    /// Parse a free-text salary
    Salary {
        /// Salary text, e.g. "от 50 000 до 80 000 руб."
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());

    // Initialize tracing/logging
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Normalize {
            input,
            output,
            workers,
            full,
        } => {
            tracing::info!(
                input = %input.display(),
                output = ?output,
                workers = ?workers,
                full = %full,
                "Starting normalize command"
            );
            commands::normalize(config, input, output, workers, full).await?;
        }

        Commands::Salary { text } => {
            tracing::debug!(text = %text, "Starting salary command");
            commands::salary(&config, &text)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("rabota=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("rabota={level},warn")))
            .context("Invalid log level")?
    };

    // stdout carries normalized records
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
