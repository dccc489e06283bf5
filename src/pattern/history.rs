//! Bounded list of recently used pattern settings

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::render::PatternSettings;
use crate::constants::pattern::DEFAULT_HISTORY_CAPACITY;
use crate::{ColorError, Result};

/// Most-recent-first history, capped at a fixed capacity
///
/// The history is a plain value: [`PatternHistory::record`] consumes it and
/// returns the updated list, so callers own the state explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPatternHistory")]
pub struct PatternHistory {
    capacity: usize,
    entries: VecDeque<PatternSettings>,
}

/// Unvalidated form used for deserialization
#[derive(Deserialize)]
struct RawPatternHistory {
    capacity: usize,
    entries: VecDeque<PatternSettings>,
}

impl TryFrom<RawPatternHistory> for PatternHistory {
    type Error = ColorError;

    fn try_from(raw: RawPatternHistory) -> Result<Self> {
        if raw.capacity == 0 {
            return Err(ColorError::range("capacity", raw.capacity, ">= 1"));
        }
        if raw.entries.len() > raw.capacity {
            return Err(ColorError::range(
                "entries",
                raw.entries.len(),
                "no more entries than capacity",
            ));
        }
        Ok(Self {
            capacity: raw.capacity,
            entries: raw.entries,
        })
    }
}

impl Default for PatternHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl PatternHistory {
    /// Empty history keeping at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Add `settings` as the newest entry, evicting the oldest when full
    ///
    /// Repeated settings are kept as separate entries.
    pub fn record(mut self, settings: PatternSettings) -> Self {
        self.entries.push_front(settings);
        self.entries.truncate(self.capacity);
        self
    }

    pub fn latest(&self) -> Option<&PatternSettings> {
        self.entries.front()
    }

    /// Entries from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &PatternSettings> {
        self.entries.iter()
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pattern::PatternKind;

    fn tile(size: u32) -> PatternSettings {
        PatternSettings::new(
            PatternKind::Grid,
            size,
            Color::rgb8(255, 255, 255),
            Color::rgb8(0, 0, 0),
            0.1,
        )
        .unwrap()
    }

    #[test]
    fn test_default_capacity() {
        let history = PatternHistory::default();
        assert_eq!(history.capacity(), 12);
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_most_recent_first() {
        let history = PatternHistory::default().record(tile(4)).record(tile(8));
        let sizes: Vec<u32> = history.iter().map(|s| s.tile_size()).collect();
        assert_eq!(sizes, [8, 4]);
        assert_eq!(history.latest().map(|s| s.tile_size()), Some(8));
    }

    #[test]
    fn test_oldest_evicted() {
        let history = (1..=5).fold(PatternHistory::with_capacity(3), |h, size| h.record(tile(size)));
        let sizes: Vec<u32> = history.iter().map(|s| s.tile_size()).collect();
        assert_eq!(sizes, [5, 4, 3]);
    }

    #[test]
    fn test_duplicates_kept() {
        let history = PatternHistory::default().record(tile(4)).record(tile(4));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_deserialize_enforces_bound() {
        let history = PatternHistory::with_capacity(2).record(tile(4)).record(tile(8));
        let json = serde_json::to_string(&history).unwrap();
        let back: PatternHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);

        let zero = json.replace("\"capacity\":2", "\"capacity\":0");
        assert!(serde_json::from_str::<PatternHistory>(&zero).is_err());

        let overfull = json.replace("\"capacity\":2", "\"capacity\":1");
        assert!(serde_json::from_str::<PatternHistory>(&overfull).is_err());
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let history = PatternHistory::with_capacity(0).record(tile(4)).record(tile(6));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().map(|s| s.tile_size()), Some(6));
    }
}
