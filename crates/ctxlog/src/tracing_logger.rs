//! crates/ctxlog/src/tracing_logger.rs
//! The standard logger: a [`Logger`] that emits `tracing` events.
//!
//! Filtering, formatting and sinks are left to whatever `tracing` subscriber the
//! application installed (see `init_tracing` for the stock setup). Levels map
//! one to one except for the terminal ones:
//!
//! | ctxlog level | tracing level | extra field          |
//! |--------------|---------------|----------------------|
//! | trace        | TRACE         |                      |
//! | debug        | DEBUG         |                      |
//! | info         | INFO          |                      |
//! | warn         | WARN          |                      |
//! | error        | ERROR         |                      |
//! | panic        | ERROR         | `severity = "panic"` |
//! | fatal        | ERROR         | `severity = "fatal"` |
//!
//! Attached fields travel in a single `fields` value rendered as `key=value`
//! pairs, because `tracing` field names must be known at compile time.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::field::display;

use crate::fields::Fields;
use crate::levels::Level;
use crate::logger::{ExitHandler, FATAL_EXIT_CODE, Logger, SharedLogger, exit_process};
use crate::message::Message;

/// Target of every event emitted by [`TracingLogger`].
pub const TARGET: &str = "ctxlog";

/// Logger capability backed by the `tracing` crate.
///
/// After emitting a panic-level event the logger panics with the rendered
/// message as payload; after a fatal-level event it calls its exit handler with
/// [`FATAL_EXIT_CODE`].
#[derive(Clone)]
pub struct TracingLogger {
    fields: Fields,
    exit: ExitHandler,
}

impl TracingLogger {
    /// Creates a logger without fields that exits the process on fatal calls.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: Fields::new(),
            exit: exit_process,
        }
    }

    /// Replaces the handler invoked after fatal-level events.
    #[must_use]
    pub fn with_exit_handler(mut self, exit: ExitHandler) -> Self {
        self.exit = exit;
        self
    }

    /// Fields attached to this logger.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    fn emit(&self, level: Level, text: &str) {
        let fields = (!self.fields.is_empty()).then(|| display(&self.fields));
        match level {
            Level::Trace => tracing::trace!(target: TARGET, fields, "{text}"),
            Level::Debug => tracing::debug!(target: TARGET, fields, "{text}"),
            Level::Info => tracing::info!(target: TARGET, fields, "{text}"),
            Level::Warn => tracing::warn!(target: TARGET, fields, "{text}"),
            Level::Error => tracing::error!(target: TARGET, fields, "{text}"),
            Level::Panic => {
                tracing::error!(target: TARGET, severity = "panic", fields, "{text}");
            }
            Level::Fatal => {
                tracing::error!(target: TARGET, severity = "fatal", fields, "{text}");
            }
        }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TracingLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingLogger")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: Message<'_>) {
        let text = message.to_string();
        self.emit(level, &text);
        match level {
            Level::Panic => panic!("{text}"),
            Level::Fatal => (self.exit)(FATAL_EXIT_CODE),
            _ => {}
        }
    }

    fn with_fields(&self, fields: Fields) -> SharedLogger {
        let mut derived = self.clone();
        derived.fields.merge(fields);
        Arc::new(derived)
    }
}

/// Returns the process-wide standard logger.
///
/// The instance is created on first use and every call returns a handle to
/// the same allocation.
pub fn standard_logger() -> SharedLogger {
    static STANDARD: OnceLock<SharedLogger> = OnceLock::new();
    Arc::clone(STANDARD.get_or_init(|| Arc::new(TracingLogger::new())))
}
