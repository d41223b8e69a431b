use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rebang::config;
use rebang::pipeline::Pipeline;
use rebang::scheduler::{CycleDriver, PipelineDriver, RefreshScheduler};

#[derive(Parser)]
#[command(
    name = "rebang",
    version,
    about = "Aggregates Chinese trending-topic feeds into a single marquee text stream",
    long_about = None
)]
struct Cli {
    /// Config file path (defaults to the per-user application data dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single cycle, print the result, and exit
    #[arg(long)]
    once: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, default_value = "text")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_path()?,
    };
    tracing::info!(config = %config_path.display(), "rebang starting");

    let snapshot = config::load_or_default(&config_path);
    let driver = PipelineDriver::new(Pipeline::new()?, config_path);

    if cli.once {
        let text = driver.run_cycle().await?;
        println!("{text}");
        return Ok(());
    }

    let (scheduler, mut rx) = RefreshScheduler::new(
        Arc::new(driver),
        snapshot.refresh_interval_minutes,
    );
    tokio::spawn(Arc::clone(&scheduler).run());

    // Renderer seam: each published cycle goes to stdout. The scrolling
    // marquee itself is an external collaborator.
    loop {
        tokio::select! {
            changed = rx.changed() => {
                changed?;
                println!("{}", *rx.borrow_and_update());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                return Ok(());
            }
        }
    }
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("rebang=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("rebang=info,warn")
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
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}
