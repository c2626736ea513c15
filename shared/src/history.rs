use serde::{Deserialize, Serialize};

use crate::constants::MAX_HISTORY;
use crate::shared_draw_modes::DrawMode;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub item: String,
    pub mode: DrawMode,
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,
}

/// Past draws, newest first.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct DrawHistory {
    entries: Vec<HistoryEntry>,
}

impl DrawHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a draw at the front, dropping the oldest past `MAX_HISTORY`.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Loads a stored history. Oversized lists are cut back to the cap.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut history: Self = serde_json::from_str(json)?;
        history.entries.truncate(MAX_HISTORY);
        Ok(history)
    }
}
