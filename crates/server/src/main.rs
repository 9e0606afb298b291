//! Simple test harness for the pick orchestrator.
//!
//! This binary runs one pick against the configured endpoint and logs the
//! result. Reads `OPENAI_API_KEY` and, optionally, `TREND_PICK_BASE_URL`.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use llm_client::ClientConfig;
use server::{PickOrchestrator, PickerSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,llm_client=debug")),
        )
        .init();

    info!("Starting trend picker test harness");

    let mut config = match std::env::var("TREND_PICK_BASE_URL") {
        Ok(base_url) => ClientConfig::new(base_url),
        Err(_) => ClientConfig::default(),
    };
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) => config = config.with_api_key(key),
        Err(_) => warn!("OPENAI_API_KEY is not set; expect the fallback pick"),
    }

    let orchestrator = PickOrchestrator::connect(config, PickerSettings::default())
        .context("Failed to build text-generation client")?;

    let pick = orchestrator.next_newest_pick().await;
    info!("\"{}\" by {}", pick.title, pick.artist);
    info!("   Lens: {} | Genre: {} | Community: {}", pick.lens, pick.genre, pick.community);
    info!("   {}", pick.desc);
    info!("   {}", pick.hashtags.join(" "));

    Ok(())
}
