//! # Tripline Main Entry Point
//!
//! Terminal trip planner with inline editing.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tripline::cmd_args::CommandLineArgs;
use tripline::{config, AppController};

fn init_logging(verbose: bool) -> Result<()> {
    let log_path = shellexpand::tilde(&config::get_log_path()).into_owned();
    if let Some(parent) = Path::new(&log_path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory for '{log_path}'"))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file '{log_path}'"))?;

    let default_filter = if verbose { "tripline=debug" } else { "tripline=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    init_logging(args.verbose())?;

    tracing::info!("starting tripline with profile '{}'", args.profile());
    let mut app = AppController::new(&args)?;
    app.run().await?;

    println!("Thanks for planning with tripline!");
    Ok(())
}
