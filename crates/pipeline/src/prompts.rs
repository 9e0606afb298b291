//! Prompt construction for the two generator calls.
//!
//! ## Metadata request
//! Asks for exactly one currently viral song as a single JSON object, and
//! lists everything that must not be suggested: the rolling history (title
//! and artist) and every banned title.
//!
//! ## Description request
//! Asks for a 60-80 word first-person fan blurb about the chosen song.

use std::fmt::Write;

use llm_client::{ChatMessage, ChatRequest};
use models::{BannedSongs, RecentPick, SongPick, FILLER_WORDS};

use crate::settings::PickerSettings;

const METADATA_SYSTEM_PROMPT: &str = "You are a music trend-detection assistant. \
You follow what is going viral right now across TikTok, Instagram Reels, YouTube Shorts \
and the streaming charts, and you answer only with strict JSON.";

const DESCRIPTION_SYSTEM_PROMPT: &str = "You are a music fan who writes short, \
genuine blurbs about songs you love, the way you would post them for friends.";

/// Build the metadata request.
///
/// # Arguments
/// * `history` - Recent picks, oldest first
/// * `banned` - Titles that must never be suggested
/// * `settings` - Model and temperature
pub fn metadata_request(
    history: &[RecentPick],
    banned: &BannedSongs,
    settings: &PickerSettings,
) -> ChatRequest {
    ChatRequest::new(settings.model.clone(), settings.metadata_temperature)
        .message(ChatMessage::system(METADATA_SYSTEM_PROMPT))
        .message(ChatMessage::user(metadata_user_prompt(history, banned)))
}

/// Build the description request for an already chosen song.
pub fn description_request(song: &SongPick, settings: &PickerSettings) -> ChatRequest {
    ChatRequest::new(settings.model.clone(), settings.description_temperature)
        .message(ChatMessage::system(DESCRIPTION_SYSTEM_PROMPT))
        .message(ChatMessage::user(description_user_prompt(song)))
}

fn metadata_user_prompt(history: &[RecentPick], banned: &BannedSongs) -> String {
    let mut prompt = String::new();
    prompt.push_str("Name exactly ONE real song that is going viral right now.\n\n");

    prompt.push_str("Do not suggest any of these recent picks, by title or by artist:\n");
    if history.is_empty() {
        prompt.push_str("- (none yet)\n");
    }
    for pick in history {
        let _ = writeln!(prompt, "- \"{}\" by {}", pick.title, pick.artist);
    }

    prompt.push_str("\nNever suggest these banned titles:\n");
    for title in banned.titles() {
        let _ = writeln!(prompt, "- \"{}\"", title);
    }

    prompt.push_str("\nReply with a single JSON object and nothing else, with exactly these fields:\n");
    prompt.push_str(
        r#"{"title": "...", "artist": "...", "lens": "...", "genre": "...", "community": "..."}"#,
    );
    prompt.push_str("\n\nRules:\n");
    prompt.push_str("1) title and artist must be a real song and its real performing artist.\n");
    prompt.push_str(
        "2) lens is a short description of how the song is going viral (e.g. \"TikTok dance challenge\").\n",
    );
    prompt.push_str("3) genre is a real genre label (e.g. \"synth-pop\", \"afrobeats\").\n");
    prompt.push_str(
        "4) community names the audience driving it (e.g. \"K-pop stans\", \"gym TikTok\").\n",
    );
    let _ = writeln!(
        prompt,
        "5) Never use filler values such as {}.",
        quoted_list(&FILLER_WORDS)
    );
    prompt
}

fn description_user_prompt(song: &SongPick) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Write a 60-80 word description of this song in the first person, in a casual fan voice."
    );
    let _ = writeln!(
        prompt,
        "Song: \"{}\" by {}",
        song.display_title(),
        song.display_artist()
    );
    let _ = writeln!(prompt, "Viral lens: {}", or_not_given(song.lens.as_deref()));
    let _ = writeln!(prompt, "Genre: {}", or_not_given(song.genre.as_deref()));
    let _ = writeln!(prompt, "Community: {}", or_not_given(song.community.as_deref()));
    prompt.push_str(
        "Mention the title, the artist, the lens, the genre and the community in the description.\n",
    );
    let _ = writeln!(
        prompt,
        "Do not use the words {}. Reply with the description only.",
        quoted_list(&FILLER_WORDS)
    );
    prompt
}

fn or_not_given(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => "(not given)",
    }
}

fn quoted_list(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| format!("\"{}\"", w))
        .collect::<Vec<_>>()
        .join(", ")
}
