//! Exclusion state: the rolling history of recent picks and the banned titles.
//!
//! Both feed the "don't suggest these" part of the metadata prompt.

use std::collections::VecDeque;

use crate::types::RecentPick;

/// How many recent picks are remembered.
pub const HISTORY_CAPACITY: usize = 5;

/// Title that is always banned, whatever the caller adds.
pub const SEED_BANNED_TITLE: &str = "Espresso";

/// Bounded FIFO of the most recent picks, oldest first.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    entries: VecDeque<RecentPick>,
    capacity: usize,
}

impl RollingHistory {
    /// Create an empty history holding up to `HISTORY_CAPACITY` picks.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Create an empty history with a custom bound (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a pick, evicting the oldest entry if the bound is exceeded.
    ///
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, pick: RecentPick) -> Option<RecentPick> {
        self.entries.push_back(pick);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RecentPick> {
        self.entries.iter()
    }

    /// Copy of the entries, oldest first.
    pub fn snapshot(&self) -> Vec<RecentPick> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Titles that must never be suggested.
///
/// Keeps insertion order so the prompt text is stable between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedSongs {
    titles: Vec<String>,
}

impl BannedSongs {
    /// The seeded set: just `SEED_BANNED_TITLE`.
    pub fn new() -> Self {
        Self {
            titles: vec![SEED_BANNED_TITLE.to_string()],
        }
    }

    /// The seeded set plus extra titles. Blank titles and duplicates
    /// (compared case-insensitively) are skipped.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut banned = Self::new();
        for title in extra {
            let title = title.into();
            let title = title.trim();
            if title.is_empty() || banned.contains(title) {
                continue;
            }
            banned.titles.push(title.to_string());
        }
        banned
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t.eq_ignore_ascii_case(title.trim()))
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl Default for BannedSongs {
    fn default() -> Self {
        Self::new()
    }
}
