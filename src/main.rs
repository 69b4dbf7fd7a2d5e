//! Vitals - live terminal dashboard of your machine's vital signs
//!
//! Samples CPU, memory, disk, network, power and sensor data on a fixed
//! cadence and renders it as a two-column card grid in the terminal.

mod collector;
mod config;
mod core;
mod metrics;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::collector::SystemCollector;
use crate::core::app::App;
use crate::render::{DashboardRenderer, Theme};

#[derive(Parser)]
#[command(name = "vitals")]
#[command(author = "Vitals Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Live terminal dashboard of your machine's vital signs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the refresh interval in seconds
    #[arg(short, long, value_name = "SECS")]
    interval: Option<u64>,

    /// Render a single frame to stdout and exit
    #[arg(long)]
    once: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect one metrics snapshot and print it as JSON
    Snapshot,
}

fn setup_logging(verbosity: u8) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitals")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "vitals.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive for the duration of the program
    let _logging_guard = setup_logging(cli.verbose)?;

    let config_path = cli.config.or_else(|| {
        let default_config = config::Config::default_path()?;
        if default_config.exists() {
            Some(default_config)
        } else {
            None
        }
    });

    let mut config = if let Some(path) = config_path {
        config::Config::load(&path)?
    } else {
        config::Config::default()
    };
    if let Some(interval) = cli.interval {
        config.collector.interval_secs = interval.max(1);
    }

    match cli.command {
        Some(Commands::Snapshot) => {
            let snapshot = collect_settled(&config).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        None if cli.once => {
            let snapshot = collect_settled(&config).await?;
            let theme = Theme::from_name(&config.display.theme);
            let renderer =
                DashboardRenderer::new(theme, config.network.primary_interface.clone());
            let (width, _) = crossterm::terminal::size().unwrap_or((100, 30));
            println!("{}", renderer.render(&snapshot, None, 0, width));
        }
        None => {
            let mut app = App::new(&config)?;
            app.run().await?;
        }
    }

    Ok(())
}

/// One-shot sampling needs a short settle between the priming refresh and
/// the real one, or CPU usage reads as zero.
async fn collect_settled(config: &config::Config) -> Result<metrics::MetricsSnapshot> {
    let mut collector = SystemCollector::new(&config.collector);
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    Ok(collector.sample()?)
}
