//! Step D: turn the step outcomes into the final `PickResult`.

use models::{PickResult, SongPick, PICK_HASHTAGS};

use crate::outcome::StepOutcome;

/// Build a fully populated result from a (possibly placeholder) pick and its
/// description.
///
/// title/artist default to "Unknown"; lens/genre/community default to "".
pub fn assemble_result(song: &SongPick, desc: String) -> PickResult {
    PickResult {
        title: song.display_title().to_string(),
        artist: song.display_artist().to_string(),
        lens: or_empty(song.lens.as_deref()),
        genre: or_empty(song.genre.as_deref()),
        community: or_empty(song.community.as_deref()),
        desc,
        hashtags: PICK_HASHTAGS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Combine the Step A and Step B outcomes.
pub fn combine(song: StepOutcome<SongPick>, desc: StepOutcome<String>) -> PickResult {
    assemble_result(song.value(), desc.into_value())
}

fn or_empty(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
