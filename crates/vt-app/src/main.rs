mod config;
mod progress;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vt_client::Orchestrator;

use crate::config::AppConfig;
use crate::progress::StageProgress;
use crate::source::FileImageSource;

/// Dress the person in one photo in the outfit from another.
#[derive(Parser, Debug)]
#[command(name = "vt-app", version, about)]
struct Cli {
    /// Photo of the person (png, jpg, jpeg or webp)
    user_image: PathBuf,

    /// Photo of the outfit (png, jpg, jpeg or webp)
    outfit_image: PathBuf,

    /// Try-on endpoint URL, overriding TRYON_API_ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,

    /// Send one blocking request instead of submitting an async job
    #[arg(long)]
    sync: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()?.with_endpoint(cli.endpoint).validated()?;

    let user = FileImageSource::open(&cli.user_image)?;
    let outfit = FileImageSource::open(&cli.outfit_image)?;

    let budget = config.client.polling_budget();
    let orchestrator = Orchestrator::http(config.client)?.sync_only(cli.sync);
    let progress = StageProgress::default();

    info!(
        user = %cli.user_image.display(),
        outfit = %cli.outfit_image.display(),
        budget_secs = budget.as_secs(),
        "starting try-on"
    );

    let result = orchestrator
        .process_images(Arc::new(user), Arc::new(outfit), Some(&progress))
        .await?;

    println!("{}", result.message);
    println!("{}", result.image_url);

    Ok(())
}
