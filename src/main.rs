//! wireframe - ASCII wireframes of web page snapshots
//!
//! Main entry point for the wireframe CLI.

mod cli;
mod cmd_snapshot;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use wireframe_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::{Cli, Commands};

/// Initialize tracing: stderr console output, plus daily rolling files when
/// `logging.directory` is set.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();

    let file_layer = match &logging.directory {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("wireframe")
                .filename_suffix("log")
                .max_log_files(30)
                .build(log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = GUARD.set(guard);

            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
            Some(if logging.json {
                layer.json().boxed()
            } else {
                layer.boxed()
            })
        }
        None => None,
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Wireframes go to stdout, so console logs go to stderr.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Render {
            snapshot,
            char_width,
            char_height,
        } => cmd_snapshot::render(&config, &snapshot, char_width, char_height).await,
        Commands::Refs { snapshot, format } => cmd_snapshot::refs(&config, &snapshot, format).await,
        Commands::Act {
            snapshot,
            action,
            ref_id,
            text,
        } => cmd_snapshot::act(&config, &snapshot, action, ref_id, text).await,
        Commands::CheckConfig => check_config(&cli.config, &config),
    }
}

/// Validate the configuration and print its problems.
fn check_config(path: &std::path::Path, config: &Config) -> anyhow::Result<()> {
    if path.exists() {
        info!("Checking {}", path.display());
    } else {
        println!("{} not found, checking built-in defaults", path.display());
    }

    let result = ConfigValidator::validate(config);
    for error in &result.errors {
        println!("error:   {}: {}", error.path, error.message);
    }
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }

    if !result.is_valid() {
        bail!("configuration has {} error(s)", result.errors.len());
    }
    println!("Configuration OK");
    Ok(())
}
