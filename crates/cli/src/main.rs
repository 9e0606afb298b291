use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::warn;

use llm_client::config::DEFAULT_BASE_URL;
use llm_client::{ClientConfig, Role};
use models::{BannedSongs, PickResult, RecentPick};
use pipeline::settings::DEFAULT_MODEL;
use pipeline::{metadata_request, PickerSettings};
use server::PickOrchestrator;

/// trend-pick - Trending song suggestions
#[derive(Parser, Debug)]
#[command(name = "trend-pick")]
#[command(about = "Suggests a currently trending song using a text-generation service", long_about = None)]
struct Cli {
    /// API key for the text-generation service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "TREND_PICK_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Model identifier sent with every request
    #[arg(long, env = "TREND_PICK_MODEL", default_value = DEFAULT_MODEL, global = true)]
    model: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "TREND_PICK_TIMEOUT_SECS", default_value = "30", global = true)]
    timeout_secs: u64,

    /// Extra title to ban (repeatable, given before the subcommand)
    #[arg(long = "ban", value_name = "TITLE")]
    ban: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get one trending song pick
    Pick {
        /// Print the pick as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run several picks in a row and show the rolling history
    Session {
        /// Number of picks to make
        #[arg(long, default_value = "3")]
        count: usize,

        /// Print each pick as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the metadata prompt without calling the service
    Prompt,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Pick { json } => handle_pick(&cli, *json).await?,
        Commands::Session { count, json } => handle_session(&cli, *count, *json).await?,
        Commands::Prompt => handle_prompt(&cli),
    }

    Ok(())
}

fn settings_from(cli: &Cli) -> PickerSettings {
    PickerSettings::default()
        .with_model(cli.model.clone())
        .with_request_timeout(Duration::from_secs(cli.timeout_secs))
}

fn banned_from(cli: &Cli) -> BannedSongs {
    BannedSongs::with_extra(cli.ban.iter().cloned())
}

fn build_orchestrator(cli: &Cli) -> Result<PickOrchestrator> {
    let mut config =
        ClientConfig::new(cli.base_url.clone()).with_timeout(Duration::from_secs(cli.timeout_secs));
    match &cli.api_key {
        Some(key) => config = config.with_api_key(key.clone()),
        None => warn!("No API key configured (--api-key / OPENAI_API_KEY); expect the fallback pick"),
    }

    let orchestrator = PickOrchestrator::connect(config, settings_from(cli))
        .context("Failed to build text-generation client")?
        .with_banned(banned_from(cli));
    Ok(orchestrator)
}

/// Handle the 'pick' command
async fn handle_pick(cli: &Cli, json: bool) -> Result<()> {
    let orchestrator = build_orchestrator(cli)?;

    let start = Instant::now();
    let pick = orchestrator.next_newest_pick().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&pick)?);
    } else {
        print_pick(None, &pick);
        println!("{}", format!("({:.2?})", start.elapsed()).dimmed());
    }
    Ok(())
}

/// Handle the 'session' command
async fn handle_session(cli: &Cli, count: usize, json: bool) -> Result<()> {
    let orchestrator = build_orchestrator(cli)?;

    for i in 0..count {
        let pick = orchestrator.next_newest_pick().await;
        if json {
            println!("{}", serde_json::to_string(&pick)?);
        } else {
            print_pick(Some(i + 1), &pick);
        }
    }

    if !json {
        print_history(&orchestrator.history().await);
    }
    Ok(())
}

/// Handle the 'prompt' command
fn handle_prompt(cli: &Cli) {
    let request = metadata_request(&[], &banned_from(cli), &settings_from(cli));

    println!(
        "{}",
        format!("Model: {} (temperature {})", request.model, request.temperature)
            .bold()
            .blue()
    );
    for role in [Role::System, Role::User] {
        if let Some(content) = request.content_for(role) {
            println!("\n{}", format!("[{:?}]", role).green());
            println!("{}", content);
        }
    }
}

/// Helper function to format and print a pick
fn print_pick(rank: Option<usize>, pick: &PickResult) {
    let heading = format!("\"{}\" by {}", pick.title, pick.artist);
    match rank {
        Some(rank) => println!("{}. {}", rank.to_string().green(), heading.bold()),
        None => println!("{}", heading.bold().blue()),
    }
    if pick.is_fallback() {
        println!("   {}", "(fallback pick)".yellow());
    }
    if !pick.lens.is_empty() {
        println!("   {}Lens: {}", "• ".green(), pick.lens);
    }
    if !pick.genre.is_empty() {
        println!("   {}Genre: {}", "• ".green(), pick.genre);
    }
    if !pick.community.is_empty() {
        println!("   {}Community: {}", "• ".green(), pick.community);
    }
    println!("   {}", pick.desc);
    println!("   {}", pick.hashtags.join(" ").cyan());
}

fn print_history(history: &[RecentPick]) {
    println!("\n{}", "Rolling history (oldest first):".bold().blue());
    for pick in history {
        println!("  - \"{}\" by {}", pick.title, pick.artist);
    }
}
