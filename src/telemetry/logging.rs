//! Logging
//!
//! Injected logging observer for the login flow.
//!
//! Logging is a capability handed to the client, not a hard dependency:
//! the default is [`NoOpLogger`]. [`InMemoryLogger`] backs test
//! assertions and [`ConsoleLogger`] suits simple hosting applications.

use std::collections::HashMap;
use std::sync::Mutex;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Context attached to a log event.
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    /// Provider name.
    pub provider: Option<String>,
    /// Operation name (e.g. "token_exchange").
    pub operation: Option<String>,
    /// Endpoint the operation targets.
    pub endpoint: Option<String>,
    /// Additional fields.
    pub extra: HashMap<String, String>,
}

impl LogContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider name.
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Set the operation name.
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Set the target endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Add an extra field.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Logger interface.
pub trait Logger: Send + Sync {
    /// Record a log event.
    fn log(&self, level: LogLevel, message: &str, context: &LogContext);

    /// Check whether a level is enabled.
    fn is_enabled(&self, level: LogLevel) -> bool;

    fn debug(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Debug, message, context);
    }

    fn info(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Info, message, context);
    }

    fn warn(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Warn, message, context);
    }

    fn error(&self, message: &str, context: &LogContext) {
        self.log(LogLevel::Error, message, context);
    }
}

/// No-op logger, the default observer.
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: &LogContext) {}

    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Create the no-op logger.
pub fn no_op_logger() -> NoOpLogger {
    NoOpLogger
}

/// Recorded log event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
}

/// In-memory logger for testing.
pub struct InMemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
    min_level: LogLevel,
}

impl InMemoryLogger {
    /// Create a logger recording every level.
    pub fn new() -> Self {
        Self::with_level(LogLevel::Debug)
    }

    /// Create a logger with a minimum level.
    pub fn with_level(min_level: LogLevel) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            min_level,
        }
    }

    /// Get all recorded entries.
    pub fn get_entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Get entries at a given level.
    pub fn get_entries_by_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl Default for InMemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for InMemoryLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        if level >= self.min_level {
            self.entries.lock().unwrap().push(LogEntry {
                level,
                message: message.to_string(),
                context: context.clone(),
            });
        }
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// Console logger writing to stdout/stderr.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    /// Create a console logger at info level.
    pub fn new() -> Self {
        Self::with_level(LogLevel::Info)
    }

    /// Create a console logger with a minimum level.
    pub fn with_level(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn format(&self, level: LogLevel, message: &str, context: &LogContext) -> String {
        let mut parts = vec![format!("{} {}", level, message)];

        if let Some(provider) = &context.provider {
            parts.push(format!("provider={}", provider));
        }
        if let Some(operation) = &context.operation {
            parts.push(format!("operation={}", operation));
        }
        if let Some(endpoint) = &context.endpoint {
            parts.push(format!("endpoint={}", endpoint));
        }
        for (key, value) in &context.extra {
            parts.push(format!("{}={}", key, value));
        }

        parts.join(" ")
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        if !self.is_enabled(level) {
            return;
        }
        let line = self.format(level, message, context);
        if level >= LogLevel::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// Create an in-memory logger for testing.
pub fn create_in_memory_logger() -> InMemoryLogger {
    InMemoryLogger::new()
}

/// Create a console logger.
pub fn create_console_logger() -> ConsoleLogger {
    ConsoleLogger::new()
}
