//! Append-only, timestamped record of user-visible events.
//!
//! Entries are never edited, removed individually, or reordered. The only bulk
//! operation is [`LogSink::clear`], which leaves a single "Logs cleared" entry
//! behind so the log is never empty after a clear.

use tracing::info;
use chrono::Local;

/// Format used for entry timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message recorded by [`LogSink::clear`].
pub const LOGS_CLEARED: &str = "Logs cleared";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl LogEntry {
    /// `[timestamp] message`
    pub fn to_line(&self) -> String {
        format!("[{}] {}", self.timestamp, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogSink {
    entries: Vec<LogEntry>,
}

impl LogSink {
    /// Stamp `message` with the current local time and append it.
    pub fn append(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.entries.push(LogEntry {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            message,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.append(LOGS_CLEARED);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// All entries, one `[timestamp] message` line each.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.to_line());
            text.push('\n');
        }
        text
    }
}
