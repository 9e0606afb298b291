//! # Pick Orchestrator
//!
//! This module runs one trending-song pick from start to finish:
//! 1. Snapshot the rolling history
//! 2. Ask the generator for song metadata (placeholder on a bad reply)
//! 3. Ask the generator for a description (fixed line on any failure)
//! 4. Record the pick in the rolling history
//! 5. Assemble the `PickResult`
//!
//! The two calls are strictly sequential: the description prompt needs the
//! metadata. If the metadata call fails outright the whole pick is replaced by
//! `PickResult::fallback()` and history is left alone.
//!
//! ## Shared state
//!
//! History lives behind an `Arc<Mutex<_>>`, so clones of the orchestrator
//! share it. Each push is one critical section, which keeps the
//! five-entry bound intact when several callers pick at once.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use llm_client::{ChatCompletionsClient, ChatRequest, ClientConfig, LlmClientError, TextGenerator};
use models::{BannedSongs, PickResult, RecentPick, RollingHistory, SongPick, FALLBACK_DESCRIPTION};
use pipeline::{combine, decode, description_request, metadata_request, PickerSettings, StepOutcome};

use crate::error::PickError;

/// Owns the picker state and sequences the generator calls.
#[derive(Clone)]
pub struct PickOrchestrator {
    generator: Arc<dyn TextGenerator>,
    history: Arc<Mutex<RollingHistory>>,
    banned: Arc<BannedSongs>,
    settings: PickerSettings,
}

impl PickOrchestrator {
    /// Create an orchestrator around any text generator.
    ///
    /// Starts with an empty history and the seeded banned set.
    pub fn new(generator: Arc<dyn TextGenerator>, settings: PickerSettings) -> Self {
        Self {
            generator,
            history: Arc::new(Mutex::new(RollingHistory::new())),
            banned: Arc::new(BannedSongs::new()),
            settings,
        }
    }

    /// Create an orchestrator backed by an HTTP chat-completions client.
    pub fn connect(config: ClientConfig, settings: PickerSettings) -> Result<Self, PickError> {
        info!("Using text-generation endpoint {}", config.completions_url());
        let client = ChatCompletionsClient::new(config)?;
        Ok(Self::new(Arc::new(client), settings))
    }

    /// Replace the banned set (builder pattern).
    pub fn with_banned(mut self, banned: BannedSongs) -> Self {
        self.banned = Arc::new(banned);
        self
    }

    /// Main entry point: produce the next pick.
    ///
    /// Never fails. Any error that escapes the per-step fallbacks yields
    /// `PickResult::fallback()`, and history is not touched in that case.
    pub async fn next_newest_pick(&self) -> PickResult {
        let start_time = Instant::now();

        match self.try_next_pick().await {
            Ok(result) => {
                info!(
                    "Picked \"{}\" by {} in {:.2?}",
                    result.title,
                    result.artist,
                    start_time.elapsed()
                );
                result
            }
            Err(e) => {
                error!("Pick failed, returning fallback: {}", e);
                PickResult::fallback()
            }
        }
    }

    /// Recent picks, oldest first.
    pub async fn history(&self) -> Vec<RecentPick> {
        self.history.lock().await.snapshot()
    }

    pub fn banned(&self) -> &BannedSongs {
        &self.banned
    }

    async fn try_next_pick(&self) -> Result<PickResult, PickError> {
        let history = self.history.lock().await.snapshot();
        debug!("Building metadata request with {} recent picks", history.len());

        let song = self.fetch_song_pick(&history).await?;
        if let Some(reason) = song.reason() {
            warn!("Using placeholder pick: {}", reason);
        }

        let desc = self.fetch_description(song.value()).await;
        if let Some(reason) = desc.reason() {
            warn!("Using fallback description: {}", reason);
        }

        let result = combine(song, desc);
        self.record(&result).await;
        Ok(result)
    }

    /// Step A. Content failures become the placeholder pick; transport
    /// failures abort the pick.
    async fn fetch_song_pick(
        &self,
        history: &[RecentPick],
    ) -> Result<StepOutcome<SongPick>, PickError> {
        let request = metadata_request(history, &self.banned, &self.settings);

        match self.call(request).await {
            Ok(text) => Ok(decode::song_pick_outcome(&text)),
            Err(e) if e.is_content_failure() => {
                Ok(StepOutcome::fallback(SongPick::placeholder(), e.to_string()))
            }
            Err(e) => Err(PickError::Generation(e)),
        }
    }

    /// Step B. Every failure becomes the fixed description.
    async fn fetch_description(&self, song: &SongPick) -> StepOutcome<String> {
        let request = description_request(song, &self.settings);

        match self.call(request).await {
            Ok(text) => decode::description_outcome(&text),
            Err(e) => StepOutcome::fallback(FALLBACK_DESCRIPTION.to_string(), e.to_string()),
        }
    }

    /// One generator call under the configured timeout.
    async fn call(&self, request: ChatRequest) -> Result<String, LlmClientError> {
        let timeout = self.settings.request_timeout;
        tokio::time::timeout(timeout, self.generator.complete(request))
            .await
            .unwrap_or(Err(LlmClientError::Timeout(timeout)))
    }

    /// Step C.
    async fn record(&self, result: &PickResult) {
        let mut history = self.history.lock().await;
        if let Some(evicted) = history.push(RecentPick::from(result)) {
            debug!("Evicted \"{}\" by {} from history", evicted.title, evicted.artist);
        }
    }
}
