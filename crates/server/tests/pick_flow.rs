//! End-to-end tests for `next_newest_pick` against in-process generators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use llm_client::{ChatRequest, LlmClientError, Role, TextGenerator};
use models::{PickResult, RecentPick, FALLBACK_DESCRIPTION};
use server::{PickOrchestrator, PickerSettings};

// ============================================================================
// Test Generators
// ============================================================================

enum Reply {
    Text(String),
    Fail(LlmClientError),
    Hang,
}

fn text(s: &str) -> Reply {
    Reply::Text(s.to_string())
}

/// Replays queued replies in order.
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn user_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.content_for(Role::User).map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmClientError> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(e)) => Err(e),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(LlmClientError::Connection("hung".into()))
            }
            None => Err(LlmClientError::Connection("script exhausted".into())),
        }
    }
}

/// Answers metadata requests with numbered songs and description requests
/// with a fixed blurb, whatever order the calls arrive in.
#[derive(Default)]
struct CountingGenerator {
    songs: AtomicUsize,
}

#[async_trait]
impl TextGenerator for CountingGenerator {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmClientError> {
        let is_metadata = request
            .content_for(Role::System)
            .map(|s| s.contains("trend-detection"))
            .unwrap_or(false);

        tokio::task::yield_now().await;
        if is_metadata {
            let n = self.songs.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!(r#"{{"title":"Song {}","artist":"Artist {}"}}"#, n, n))
        } else {
            Ok("Can't stop playing it.".to_string())
        }
    }
}

fn orchestrator_with(generator: Arc<dyn TextGenerator>) -> PickOrchestrator {
    let settings = PickerSettings::default().with_request_timeout(Duration::from_millis(100));
    PickOrchestrator::new(generator, settings)
}

fn song_json(n: usize) -> String {
    format!(
        r#"{{"title":"Song {}","artist":"Artist {}","lens":"dance trend","genre":"pop","community":"fans {}"}}"#,
        n, n, n
    )
}

fn assert_fully_populated(result: &PickResult) {
    assert!(!result.title.is_empty());
    assert!(!result.artist.is_empty());
    assert!(!result.desc.is_empty());
    assert!(!result.hashtags.is_empty());
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_successful_pick() {
    let generator = ScriptedGenerator::new(vec![
        text(r#"{"title":"Flowers","artist":"Miley Cyrus","lens":"self-love edits","genre":"pop","community":"Miley fandom"}"#),
        text("  Honestly this one lives in my head rent free.  "),
    ]);
    let orchestrator = orchestrator_with(generator.clone());

    let result = orchestrator.next_newest_pick().await;

    assert_eq!(result.title, "Flowers");
    assert_eq!(result.artist, "Miley Cyrus");
    assert_eq!(result.lens, "self-love edits");
    assert_eq!(result.genre, "pop");
    assert_eq!(result.community, "Miley fandom");
    assert_eq!(result.desc, "Honestly this one lives in my head rent free.");
    assert_eq!(result.hashtags, vec!["#NowPlaying", "#TrendingNow", "#AIFavorite"]);
    assert_eq!(orchestrator.history().await, vec![RecentPick::new("Flowers", "Miley Cyrus")]);

    // Description prompt is built from the metadata reply.
    let prompts = generator.user_prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("\"Flowers\" by Miley Cyrus"));
    assert!(prompts[1].contains("Miley fandom"));
}

#[tokio::test]
async fn test_missing_optional_fields_default_to_empty() {
    let generator = ScriptedGenerator::new(vec![
        text(r#"{"title":"Blinding Lights","artist":"The Weeknd"}"#),
        text("Synths forever."),
    ]);
    let orchestrator = orchestrator_with(generator);

    let result = orchestrator.next_newest_pick().await;

    assert_eq!(result.title, "Blinding Lights");
    assert_eq!(result.artist, "The Weeknd");
    assert_eq!(result.lens, "");
    assert_eq!(result.genre, "");
    assert_eq!(result.community, "");
}

#[tokio::test]
async fn test_invalid_metadata_json_uses_placeholder() {
    let generator = ScriptedGenerator::new(vec![
        text("Here's a great song: Blinding Lights!"),
        text("Pure energy."),
    ]);
    let orchestrator = orchestrator_with(generator.clone());

    let result = orchestrator.next_newest_pick().await;

    assert_eq!(result.title, "Fresh Drop");
    assert_eq!(result.artist, "AI DJ");
    assert_eq!(result.lens, "viral energy");
    assert_eq!(result.genre, "mixed");
    assert_eq!(result.community, "global fans");
    assert_eq!(result.desc, "Pure energy.");
    assert!(!result.is_fallback());

    // The placeholder is still recorded and still described.
    assert_eq!(orchestrator.history().await, vec![RecentPick::new("Fresh Drop", "AI DJ")]);
    assert!(generator.user_prompts()[1].contains("\"Fresh Drop\" by AI DJ"));
}

#[tokio::test]
async fn test_empty_metadata_uses_placeholder() {
    let generator = ScriptedGenerator::new(vec![
        Reply::Fail(LlmClientError::EmptyCompletion),
        text("Pure energy."),
    ]);
    let orchestrator = orchestrator_with(generator);

    let result = orchestrator.next_newest_pick().await;
    assert_eq!(result.title, "Fresh Drop");
    assert_eq!(result.artist, "AI DJ");
}

#[tokio::test]
async fn test_metadata_timeout_uses_placeholder_not_fallback() {
    let generator = ScriptedGenerator::new(vec![Reply::Hang, text("Still a bop.")]);
    let orchestrator = orchestrator_with(generator);

    let result = orchestrator.next_newest_pick().await;
    assert_eq!(result.title, "Fresh Drop");
    assert_eq!(result.desc, "Still a bop.");
    assert_eq!(orchestrator.history().await.len(), 1);
}

#[tokio::test]
async fn test_description_failure_keeps_metadata() {
    let generator = ScriptedGenerator::new(vec![
        text(r#"{"title":"Blinding Lights","artist":"The Weeknd","genre":"synth-pop"}"#),
        Reply::Fail(LlmClientError::Connection("connection reset".into())),
    ]);
    let orchestrator = orchestrator_with(generator);

    let result = orchestrator.next_newest_pick().await;

    assert_eq!(result.title, "Blinding Lights");
    assert_eq!(result.artist, "The Weeknd");
    assert_eq!(result.genre, "synth-pop");
    assert_eq!(result.desc, FALLBACK_DESCRIPTION);
    assert_eq!(result.hashtags.len(), 3);
    assert_eq!(orchestrator.history().await.len(), 1);
}

#[tokio::test]
async fn test_metadata_transport_failure_returns_fallback_without_history_change() {
    let generator = ScriptedGenerator::new(vec![text(&song_json(1)), text("Nice.")]);
    let orchestrator = orchestrator_with(generator.clone());

    orchestrator.next_newest_pick().await;
    let before = orchestrator.history().await;
    assert_eq!(before.len(), 1);

    generator.push(Reply::Fail(LlmClientError::Status {
        status: 401,
        body: "invalid api key".into(),
    }));
    let result = orchestrator.next_newest_pick().await;

    assert_eq!(result, PickResult::fallback());
    assert_eq!(result.hashtags, vec!["#AITrend"]);
    assert_eq!(
        result.desc,
        "Couldn't fetch the latest trend — but this track still sets the vibe."
    );
    assert_eq!(orchestrator.history().await, before);
}

#[tokio::test]
async fn test_every_path_is_fully_populated() {
    let scripts = vec![
        vec![text(&song_json(1)), text("Nice.")],
        vec![text("{}"), text("Nice.")],
        vec![text("nope"), Reply::Fail(LlmClientError::EmptyCompletion)],
        vec![Reply::Fail(LlmClientError::Connection("refused".into()))],
        vec![],
    ];

    for script in scripts {
        let orchestrator = orchestrator_with(ScriptedGenerator::new(script));
        let result = orchestrator.next_newest_pick().await;
        assert_fully_populated(&result);
    }
}

#[tokio::test]
async fn test_empty_object_defaults_to_unknown() {
    let generator = ScriptedGenerator::new(vec![text("{}"), text("Mystery track.")]);
    let orchestrator = orchestrator_with(generator);

    let result = orchestrator.next_newest_pick().await;
    assert_eq!(result.title, "Unknown");
    assert_eq!(result.artist, "Unknown");
    assert_eq!(orchestrator.history().await, vec![RecentPick::new("Unknown", "Unknown")]);
}

#[tokio::test]
async fn test_history_is_min_of_runs_and_five() {
    let orchestrator = orchestrator_with(Arc::new(CountingGenerator::default()));

    for n in 1..=8 {
        orchestrator.next_newest_pick().await;
        let history = orchestrator.history().await;
        assert_eq!(history.len(), n.min(5));

        // Always the most recent runs, oldest first.
        let expected: Vec<_> = ((n.saturating_sub(5) + 1)..=n)
            .map(|i| RecentPick::new(format!("Song {}", i), format!("Artist {}", i)))
            .collect();
        assert_eq!(history, expected);
    }
}

#[tokio::test]
async fn test_six_runs_evict_the_first() {
    let generator = ScriptedGenerator::new(vec![]);
    for n in 1..=6 {
        generator.push(text(&song_json(n)));
        generator.push(text("Nice."));
    }
    let orchestrator = orchestrator_with(generator.clone());

    for _ in 0..6 {
        orchestrator.next_newest_pick().await;
    }

    let history = orchestrator.history().await;
    assert_eq!(history.len(), 5);
    assert!(!history.iter().any(|p| p.title == "Song 1"));
    assert_eq!(history[0].title, "Song 2");

    // The sixth metadata prompt excluded the five picks before it.
    let sixth_metadata_prompt = &generator.user_prompts()[10];
    for n in 1..=5 {
        assert!(sixth_metadata_prompt.contains(&format!("\"Song {}\" by Artist {}", n, n)));
    }
}

#[tokio::test]
async fn test_concurrent_picks_share_bounded_history() {
    let orchestrator = orchestrator_with(Arc::new(CountingGenerator::default()));

    let mut handles = vec![];
    for _ in 0..20 {
        let orchestrator = orchestrator.clone();
        handles.push(tokio::spawn(async move { orchestrator.next_newest_pick().await }));
    }
    for handle in handles {
        let result = handle.await.expect("pick task panicked");
        assert!(result.title.starts_with("Song "));
    }

    let history = orchestrator.history().await;
    assert_eq!(history.len(), 5);
}
