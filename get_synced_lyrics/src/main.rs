mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    // stdout is reserved for the lyrics
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let args = cli::Args::parse();
    let configs = config::Configs::from_env()?;

    let client = synced_lyrics::Client::new(configs.sp_dc).await?;
    tracing::info!("created a new lyrics session: {client:?}");

    cli::run(&client, &args.track_id, &mut std::io::stdout().lock()).await
}
