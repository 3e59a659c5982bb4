/// Polaris Engine - Process-wide logging host
///
/// This module hosts the global logger used by the engine_* macros. Rendering
/// state is never global: backends are owned by the `RenderDevice` that
/// created them and passed explicitly to the code that draws with them.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;

use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Engine-wide services accessor
///
/// Currently only carries the logging facility. All engine and backend code
/// logs through here via the `engine_trace!` .. `engine_error!` macros.
pub struct Engine;

impl Engine {
    fn logger() -> &'static RwLock<Box<dyn Logger>> {
        LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
    }

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// test capture logger, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use polaris_engine::polaris::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = Self::logger().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = Self::logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = Self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by the engine_error! and engine_err! macros to include source
    /// location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = Self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
