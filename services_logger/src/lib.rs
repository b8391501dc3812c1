//! # Logger Service
//!
//! This crate implements structured logging for the resolver services.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Components build [`LogEntry`] values and hand them to a [`LogSink`]; the
//! host decides where they end up.

use std::sync::Mutex;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Source component (if known)
    pub source: Option<&'static str>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a debug entry
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, message)
    }

    /// Creates an info entry
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Creates an error entry
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    /// Sets the source component
    pub fn with_source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Looks up a field value by key
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders fields as `key=value` pairs separated by spaces
    pub fn render_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Destination for log entries
pub trait LogSink: Send + Sync {
    /// Records one entry
    fn emit(&self, entry: LogEntry);
}

/// Forwards entries to the `tracing` facade
///
/// Fields are rendered into a single `fields` value so that any subscriber
/// shows them without knowing their keys up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn emit(&self, entry: LogEntry) {
        let source = entry.source.unwrap_or("-");
        let fields = entry.render_fields();
        match entry.level {
            LogLevel::Debug => tracing::debug!(source = source, fields = %fields, "{}", entry.message),
            LogLevel::Info => tracing::info!(source = source, fields = %fields, "{}", entry.message),
            LogLevel::Warn => tracing::warn!(source = source, fields = %fields, "{}", entry.message),
            LogLevel::Error => tracing::error!(source = source, fields = %fields, "{}", entry.message),
        }
    }
}

/// Records entries in memory
///
/// Used by tests to assert on what a component logged.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogSink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Entries at the given level
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Removes and returns all recorded entries
    pub fn take(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemoryLogSink {
    fn emit(&self, entry: LogEntry) {
        self.lock().push(entry);
    }
}

/// Discards all entries
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogSink;

impl LogSink for NullLogSink {
    fn emit(&self, _entry: LogEntry) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_entry_creation() {
        let entry = LogEntry::new(LogLevel::Info, "test message");
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "test message");
        assert!(entry.source.is_none());
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_log_entry_with_source() {
        let entry = LogEntry::info("test").with_source("path_resolver");
        assert_eq!(entry.source, Some("path_resolver"));
    }

    #[test]
    fn test_log_entry_with_fields() {
        let entry = LogEntry::info("test")
            .with_field("site", "sandbox")
            .with_field("count", 2);

        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.field("site"), Some("sandbox"));
        assert_eq!(entry.field("count"), Some("2"));
        assert_eq!(entry.field("missing"), None);
        assert_eq!(entry.render_fields(), "site=sandbox count=2");
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemoryLogSink::new();
        sink.emit(LogEntry::debug("first"));
        sink.emit(LogEntry::error("second"));

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(sink.at_level(LogLevel::Error).len(), 1);
    }

    #[test]
    fn test_memory_sink_take_drains() {
        let sink = MemoryLogSink::new();
        sink.emit(LogEntry::info("only"));
        assert_eq!(sink.take().len(), 1);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        TracingLogSink.emit(LogEntry::info("no subscriber installed").with_field("k", "v"));
        NullLogSink.emit(LogEntry::info("dropped"));
    }
}
