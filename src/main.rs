use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(
    name = "friendlang",
    version,
    about = "Classify Steam accounts by the scripts used in their friends' names",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every account in the input file
    Run {
        /// Configuration file (JSON or TOML)
        #[arg(short, long, default_value = "app-settings.json")]
        config: PathBuf,

        /// Newline-delimited steam ids
        #[arg(short, long, default_value = "check_ids.txt")]
        input: PathBuf,

        /// Override the configured output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Check configuration (and optionally the input file) without calling the API
    Validate {
        /// Configuration file (JSON or TOML)
        #[arg(short, long, default_value = "app-settings.json")]
        config: PathBuf,

        /// Newline-delimited steam ids
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Run {
            config,
            input,
            output_dir,
        } => {
            tracing::info!(
                config = %config.display(),
                input = %input.display(),
                output_dir = ?output_dir,
                "Starting run command"
            );
            commands::classify(&config, &input, output_dir).await?;
        }

        Commands::Validate { config, input } => {
            tracing::info!(config = %config.display(), input = ?input, "Starting validate command");
            commands::validate(&config, input.as_deref()).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("friendlang=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("friendlang=info,warn"))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
