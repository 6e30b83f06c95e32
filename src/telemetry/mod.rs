//! Telemetry
//!
//! Observability seam for the login flow: an injected logging observer.

pub mod logging;

pub use logging::{
    create_console_logger, create_in_memory_logger, no_op_logger, ConsoleLogger, InMemoryLogger,
    LogContext, LogEntry, LogLevel, Logger, NoOpLogger,
};
