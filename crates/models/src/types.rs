//! Core domain types for trending-song picks.
//!
//! Three shapes flow through a pick:
//! - `SongPick`: untrusted metadata decoded from the generator's JSON reply
//! - `PickResult`: the normalized record handed back to callers
//! - `RecentPick`: the title/artist pair remembered to avoid repeats

use serde::{Deserialize, Serialize};

// =============================================================================
// Fixed values
// =============================================================================

/// Title/artist used when the generator gave us nothing usable.
pub const UNKNOWN: &str = "Unknown";

/// Description used when the description request fails.
pub const FALLBACK_DESCRIPTION: &str = "This track is buzzing everywhere right now.";

/// Hashtags attached to every normal pick, in order.
pub const PICK_HASHTAGS: [&str; 3] = ["#NowPlaying", "#TrendingNow", "#AIFavorite"];

/// Hashtags attached to the top-level fallback pick.
pub const FALLBACK_HASHTAGS: [&str; 1] = ["#AITrend"];

/// Filler values the generator must never return.
pub const FILLER_WORDS: [&str; 3] = ["unknown", "omg", "idk"];

// =============================================================================
// Intermediate pick
// =============================================================================

/// Song metadata as decoded from the metadata response.
///
/// Every field is optional: the generator may omit any of them, or send
/// something that is not a string. Defaults are applied when the pick is
/// assembled into a `PickResult`, never earlier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPick {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub lens: Option<String>,
    pub genre: Option<String>,
    pub community: Option<String>,
}

impl SongPick {
    /// Placeholder used when the metadata reply can't be decoded.
    pub fn placeholder() -> Self {
        Self {
            title: Some("Fresh Drop".to_string()),
            artist: Some("AI DJ".to_string()),
            lens: Some("viral energy".to_string()),
            genre: Some("mixed".to_string()),
            community: Some("global fans".to_string()),
        }
    }

    /// Title with the "Unknown" default applied.
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(UNKNOWN)
    }

    /// Artist with the "Unknown" default applied.
    pub fn display_artist(&self) -> &str {
        non_blank(self.artist.as_deref()).unwrap_or(UNKNOWN)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// Final result
// =============================================================================

/// A fully populated pick, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickResult {
    pub title: String,
    pub artist: String,
    pub lens: String,
    pub genre: String,
    pub community: String,
    pub desc: String,
    pub hashtags: Vec<String>,
}

impl PickResult {
    /// The hardcoded result returned when a pick can't be produced at all.
    pub fn fallback() -> Self {
        Self {
            title: "Fallback Song".to_string(),
            artist: "AI DJ".to_string(),
            lens: "viral energy".to_string(),
            genre: "mixed".to_string(),
            community: "global fans".to_string(),
            desc: "Couldn't fetch the latest trend — but this track still sets the vibe."
                .to_string(),
            hashtags: FALLBACK_HASHTAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// True if this is the top-level fallback result.
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

// =============================================================================
// History entries
// =============================================================================

/// A recently suggested song, kept so it isn't suggested again right away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPick {
    pub title: String,
    pub artist: String,
}

impl RecentPick {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl From<&PickResult> for RecentPick {
    fn from(result: &PickResult) -> Self {
        Self::new(result.title.clone(), result.artist.clone())
    }
}
