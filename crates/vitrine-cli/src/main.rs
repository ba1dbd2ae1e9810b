use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_core::AppConfig;
use vitrine_tui::PreviewOptions;

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Preview interactive site templates in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a template in the interactive preview
    Preview {
        /// Template name (see `vitrine templates`)
        #[arg(short, long)]
        template: Option<String>,
        /// Behave as if the platform asked for reduced motion
        #[arg(long)]
        reduced_motion: bool,
        /// Simulate a touch device (disables the magnetic effect)
        #[arg(long)]
        coarse_pointer: bool,
    },
    /// List bundled templates
    Templates {
        /// Print the catalogue as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write the defaults to the config file if it does not exist
        #[arg(long)]
        init: bool,
        /// Only print the config file location
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let interactive = matches!(cli.command, Some(Commands::Preview { .. }) | None);
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Preview {
            template,
            reduced_motion,
            coarse_pointer,
        }) => {
            let name = template.unwrap_or_else(|| config.general.default_template.clone());
            let options = PreviewOptions {
                reduced_motion,
                coarse_pointer,
            };
            commands::preview::run(config, &name, options).await
        }
        None => {
            let name = config.general.default_template.clone();
            commands::preview::run(config, &name, PreviewOptions::default()).await
        }
        Some(Commands::Templates { json }) => commands::templates::run(json),
        Some(Commands::Config { init, path }) => commands::config::run(&config, init, path),
    }
}

/// RUST_LOG wins over the configured level
fn init_logging(config: &AppConfig, interactive: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if interactive {
        // The preview owns the terminal; log next to the config file instead
        let path = AppConfig::config_path().with_file_name("vitrine.log");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
