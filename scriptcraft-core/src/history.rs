use crate::generation::ScriptResult;
use crate::types::ContentKind;
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOutcome {
    Generated,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ts_unix_ms: i64,
    pub content_kind: ContentKind,
    pub topic: String,
    pub script_text: String,
    pub outcome: EntryOutcome,
}

impl HistoryEntry {
    /// Failures keep their message as `script_text` but are marked `Failed`.
    pub fn from_result(
        ts_unix_ms: i64,
        content_kind: ContentKind,
        topic: impl Into<String>,
        result: &ScriptResult,
    ) -> Self {
        let outcome = if result.is_success() {
            EntryOutcome::Generated
        } else {
            EntryOutcome::Failed
        };
        Self {
            ts_unix_ms,
            content_kind,
            topic: topic.into(),
            script_text: result.display_text().to_string(),
            outcome,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == EntryOutcome::Failed
    }

    /// Local time as `YYYY-MM-DD HH:MM`.
    pub fn formatted_timestamp(&self) -> String {
        match Local.timestamp_millis_opt(self.ts_unix_ms).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => self.ts_unix_ms.to_string(),
        }
    }

    /// Plain-text document suitable for saving to disk.
    pub fn to_text_document(&self) -> String {
        let mut doc = format!(
            "{}\n{} | {}\n",
            self.topic,
            self.content_kind.label(),
            self.formatted_timestamp()
        );
        if self.is_failure() {
            doc.push_str("(generation failed)\n");
        }
        doc.push('\n');
        doc.push_str(&self.script_text);
        if !doc.ends_with('\n') {
            doc.push('\n');
        }
        doc
    }
}

/// Append-only, session-scoped list of generations. Insertion order is chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the new entry.
    pub fn push(&mut self, entry: HistoryEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
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

    /// Last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// All entries with their indices, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> {
        self.entries.iter().enumerate().rev()
    }
}
