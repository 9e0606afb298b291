//! # Models Crate
//!
//! Domain types shared by every other crate in the trend picker.
//!
//! ## Main Components
//!
//! - **types**: `SongPick`, `PickResult`, `RecentPick` and the fixed fallback values
//! - **history**: `RollingHistory` (last five picks) and `BannedSongs`
//!
//! ## Example Usage
//!
//! ```ignore
//! use models::{BannedSongs, RecentPick, RollingHistory};
//!
//! let mut history = RollingHistory::new();
//! history.push(RecentPick::new("Blinding Lights", "The Weeknd"));
//!
//! let banned = BannedSongs::with_extra(["Flowers"]);
//! assert!(banned.contains("flowers"));
//! ```

pub mod types;
pub mod history;

// Re-export commonly used types for convenience
pub use types::{
    SongPick,
    PickResult,
    RecentPick,
    UNKNOWN,
    FALLBACK_DESCRIPTION,
    PICK_HASHTAGS,
    FALLBACK_HASHTAGS,
    FILLER_WORDS,
};
pub use history::{BannedSongs, RollingHistory, HISTORY_CAPACITY, SEED_BANNED_TITLE};
