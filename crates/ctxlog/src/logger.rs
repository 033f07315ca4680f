//! crates/ctxlog/src/logger.rs
//! The logger capability and its per-level convenience methods.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::fields::{ERROR_KEY, FieldValue, Fields};
use crate::levels::Level;
use crate::message::Message;

/// Exit status used whenever a fatal log call terminates the process.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Reference-counted handle to a logger capability.
///
/// Contexts store and hand out clones of this handle, so the instance a caller
/// bound is the instance a later lookup returns (`Arc::ptr_eq` holds).
pub type SharedLogger = Arc<dyn Logger>;

/// Handler invoked with [`FATAL_EXIT_CODE`] when a fatal call must end the process.
pub type ExitHandler = fn(i32);

/// Default [`ExitHandler`]: terminates the process immediately.
pub fn exit_process(code: i32) {
    std::process::exit(code)
}

/// A logger capability.
///
/// Implementations receive every log call through [`log`](Self::log); the
/// per-level methods in [`LoggerExt`] are thin wrappers around it. Attaching
/// fields never mutates the receiver: each `with_*` method returns a new
/// derived logger that carries the receiver's fields plus the new ones.
///
/// The [`Level::Panic`] and [`Level::Fatal`] contracts belong to the
/// implementation. A production logger unwinds after logging at panic level
/// and terminates the process after logging at fatal level; a test double may
/// record the call and return.
pub trait Logger: Send + Sync {
    /// Handles one log call.
    fn log(&self, level: Level, message: Message<'_>);

    /// Returns a derived logger carrying `fields` in addition to the receiver's own.
    fn with_fields(&self, fields: Fields) -> SharedLogger;

    /// Returns a derived logger carrying one extra field.
    fn with_field(&self, key: &str, value: FieldValue) -> SharedLogger {
        self.with_fields(Fields::new().with(key, value))
    }

    /// Returns a derived logger with `err` attached under [`ERROR_KEY`].
    fn with_error(&self, err: &dyn Error) -> SharedLogger {
        self.with_field(ERROR_KEY, FieldValue::Str(err.to_string()))
    }
}

macro_rules! level_methods {
    ($($level:ident => $values:ident, $format:ident, $line:ident;)*) => {
        $(
            #[doc = concat!("Logs `args` back to back at `", stringify!($level), "` level.")]
            fn $values(&self, args: &[&dyn fmt::Display]) {
                self.log(Level::$level, Message::Values(args));
            }

            #[doc = concat!("Logs pre-bound format arguments at `", stringify!($level), "` level.")]
            fn $format(&self, args: fmt::Arguments<'_>) {
                self.log(Level::$level, Message::Format(args));
            }

            #[doc = concat!("Logs space-separated `args` at `", stringify!($level), "` level.")]
            fn $line(&self, args: &[&dyn fmt::Display]) {
                self.log(Level::$level, Message::Line(args));
            }
        )*
    };
}

/// Named per-level methods for every [`Logger`].
///
/// ```
/// use ctxlog::{LoggerExt, testing::RecordingLogger};
///
/// let logger = RecordingLogger::new();
/// logger.warnf(format_args!("disk {}% full", 91));
/// assert_eq!(logger.entries()[0].message, "disk 91% full");
/// ```
pub trait LoggerExt: Logger {
    level_methods! {
        Trace => trace, tracef, traceln;
        Debug => debug, debugf, debugln;
        Info => info, infof, infoln;
        Info => print, printf, println;
        Warn => warn, warnf, warnln;
        Warn => warning, warningf, warningln;
        Error => error, errorf, errorln;
        Panic => panic, panicf, panicln;
        Fatal => fatal, fatalf, fatalln;
    }
}

impl<L: Logger + ?Sized> LoggerExt for L {}

/// A logger that drops every entry.
///
/// Output is discarded but the terminal levels keep their meaning: panic-level
/// calls still unwind and fatal-level calls still end the process through the
/// configured [`ExitHandler`]. Binding a `DiscardLogger` silences a context
/// even while the default logger is enabled.
#[derive(Clone, Copy, Debug)]
pub struct DiscardLogger {
    exit: ExitHandler,
}

impl DiscardLogger {
    /// Creates a discarding logger that exits the process on fatal calls.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exit: exit_process,
        }
    }

    /// Replaces the handler invoked on fatal calls.
    #[must_use]
    pub const fn with_exit_handler(mut self, exit: ExitHandler) -> Self {
        self.exit = exit;
        self
    }
}

impl Default for DiscardLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for DiscardLogger {
    fn log(&self, level: Level, message: Message<'_>) {
        if !level.is_terminal() {
            return;
        }
        if level == Level::Fatal {
            (self.exit)(FATAL_EXIT_CODE);
        } else {
            panic!("{message}");
        }
    }

    fn with_fields(&self, _fields: Fields) -> SharedLogger {
        Arc::new(*self)
    }
}
