//! Internal logging system for Nebula Engine
//!
//! This module provides a flexible logging system with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - An editor mirror that keeps recent entries and warning/error flags
//! - File and line information for detailed ERROR logs

use colored::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to create custom loggers (file logging, network logging, etc.)
///
/// # Example
///
/// ```no_run
/// use nebula_engine::nebula::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "nebula::ResourceManager")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (typically disabled in release)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (recoverable failures: missing file, fallback taken)
    Warn,

    /// Error messages (critical issues with file:line details)
    Error,
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

// ===== EDITOR LOG =====

/// Number of entries kept for the on-screen log by default
pub const EDITOR_LOG_CAPACITY: usize = 256;

struct EditorLogState {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    has_warnings: bool,
    has_errors: bool,
}

/// Logger mirroring every entry into the editor's on-screen log
///
/// Entries are forwarded to an inner logger (console by default) and kept
/// in a bounded buffer the editor polls once per frame. Warnings and errors
/// raise sticky flags until [`EditorLog::clear`] is called.
///
/// The type is a cheap handle: install one clone with `Engine::set_logger`
/// and keep another in the editor.
#[derive(Clone)]
pub struct EditorLog {
    inner: Arc<dyn Logger>,
    state: Arc<Mutex<EditorLogState>>,
}

impl EditorLog {
    /// Create an editor log forwarding to the colored console logger
    pub fn new() -> Self {
        Self::with_inner(DefaultLogger, EDITOR_LOG_CAPACITY)
    }

    /// Create an editor log forwarding to `inner`, keeping at most `capacity` entries
    pub fn with_inner<L: Logger + 'static>(inner: L, capacity: usize) -> Self {
        Self {
            inner: Arc::new(inner),
            state: Arc::new(Mutex::new(EditorLogState {
                entries: VecDeque::with_capacity(capacity.min(EDITOR_LOG_CAPACITY)),
                capacity: capacity.max(1),
                has_warnings: false,
                has_errors: false,
            })),
        }
    }

    /// Whether a warning was logged since the last clear
    pub fn has_warnings(&self) -> bool {
        self.state.lock().map(|s| s.has_warnings).unwrap_or(false)
    }

    /// Whether an error was logged since the last clear
    pub fn has_errors(&self) -> bool {
        self.state.lock().map(|s| s.has_errors).unwrap_or(false)
    }

    /// Snapshot of the buffered entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state
            .lock()
            .map(|s| s.entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of buffered entries with the given severity
    pub fn count(&self, severity: LogSeverity) -> usize {
        self.state
            .lock()
            .map(|s| s.entries.iter().filter(|e| e.severity == severity).count())
            .unwrap_or(0)
    }

    /// Drop buffered entries and reset the warning/error flags
    pub fn clear(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.entries.clear();
            state.has_warnings = false;
            state.has_errors = false;
        }
    }
}

impl Default for EditorLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for EditorLog {
    fn log(&self, entry: &LogEntry) {
        self.inner.log(entry);

        if let Ok(mut state) = self.state.lock() {
            match entry.severity {
                LogSeverity::Warn => state.has_warnings = true,
                LogSeverity::Error => state.has_errors = true,
                _ => {}
            }
            if state.entries.len() == state.capacity {
                state.entries.pop_front();
            }
            state.entries.push_back(entry.clone());
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::nebula::Engine::log(
            $crate::nebula::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::nebula::Engine::log(
            $crate::nebula::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
///
/// # Example
///
/// ```no_run
/// nebula_engine::engine_info!("nebula::ResourceManager", "{} resources warmed", 12);
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::nebula::Engine::log(
            $crate::nebula::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (recoverable failure)
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::nebula::Engine::log(
            $crate::nebula::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::nebula::Engine::log_detailed(
            $crate::nebula::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and build an `Error::BackendError` from it
///
/// # Example
///
/// ```ignore
/// device.create_pipeline(desc)
///     .map_err(|e| engine_err!("nebula::ShaderProgram", "Pipeline rebuild failed: {}", e))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::nebula::Engine::log_detailed(
            $crate::nebula::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::nebula::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return `Err(Error::BackendError)` from the current function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
