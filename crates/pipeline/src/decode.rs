//! Decoding of generator replies.
//!
//! Generator output is untrusted. The metadata reply must be one JSON object;
//! each of its fields is kept only if it is a string. The description reply
//! is kept only if it has some text once trimmed.

use serde_json::Value;
use thiserror::Error;

use models::{SongPick, FALLBACK_DESCRIPTION};

use crate::outcome::StepOutcome;

/// Why a metadata reply could not be turned into a `SongPick`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("metadata reply was empty")]
    Empty,

    #[error("metadata reply is not valid JSON: {0}")]
    Malformed(String),

    #[error("metadata reply is JSON but not an object")]
    NotAnObject,
}

/// Decode the metadata reply into a `SongPick`.
///
/// Fields that are missing or not strings are left as `None`.
pub fn decode_song_pick(text: &str) -> Result<SongPick, DecodeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);

    Ok(SongPick {
        title: field("title"),
        artist: field("artist"),
        lens: field("lens"),
        genre: field("genre"),
        community: field("community"),
    })
}

/// Step A: decoded pick, or the placeholder if the reply can't be decoded.
pub fn song_pick_outcome(text: &str) -> StepOutcome<SongPick> {
    match decode_song_pick(text) {
        Ok(pick) => StepOutcome::Fresh(pick),
        Err(e) => StepOutcome::fallback(SongPick::placeholder(), e.to_string()),
    }
}

/// Step B: trimmed description, or the fixed line if nothing is left.
pub fn description_outcome(text: &str) -> StepOutcome<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        StepOutcome::fallback(FALLBACK_DESCRIPTION.to_string(), "description reply was empty")
    } else {
        StepOutcome::Fresh(trimmed.to_string())
    }
}
