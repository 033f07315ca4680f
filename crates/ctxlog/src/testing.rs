//! crates/ctxlog/src/testing.rs
//! A recording logger for asserting what code under test logged.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::fields::Fields;
use crate::levels::{Level, Style};
use crate::logger::{Logger, SharedLogger};
use crate::message::Message;

/// One log call observed by a [`RecordingLogger`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedEntry {
    /// Level of the call.
    pub level: Level,
    /// Style the arguments were passed in.
    pub style: Style,
    /// Rendered message.
    pub message: String,
    /// Fields carried by the logger that received the call.
    pub fields: Fields,
}

/// Spy logger that records every call instead of emitting it.
///
/// Derived loggers returned by the `with_*` methods carry their own fields but
/// share the parent's buffer, so entries logged through any view of the same
/// root show up in [`entries`](Self::entries). Panic and fatal calls are
/// recorded like any other level; the spy neither unwinds nor exits.
///
/// ```
/// use std::sync::Arc;
/// use ctxlog::{Context, ContextLogger, DefaultLogger, Level, testing::RecordingLogger};
///
/// let spy = RecordingLogger::new();
/// let logging = ContextLogger::new(DefaultLogger::disabled(Arc::new(RecordingLogger::new())));
/// let ctx = Context::background().with_logger(Arc::new(spy.clone()));
///
/// logging.info(&ctx, &[&"hello"]);
///
/// let entries = spy.entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].level, Level::Info);
/// assert_eq!(entries[0].message, "hello");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingLogger {
    fields: Fields,
    entries: Arc<Mutex<Vec<RecordedEntry>>>,
}

impl RecordingLogger {
    /// Creates a spy with no fields and an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields attached to this view.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a copy of every entry recorded through this logger's family.
    #[must_use]
    pub fn entries(&self) -> Vec<RecordedEntry> {
        self.lock().clone()
    }

    /// Removes and returns the recorded entries.
    pub fn drain(&self) -> Vec<RecordedEntry> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: Message<'_>) {
        let entry = RecordedEntry {
            level,
            style: message.style(),
            message: message.to_string(),
            fields: self.fields.clone(),
        };
        self.lock().push(entry);
    }

    fn with_fields(&self, fields: Fields) -> SharedLogger {
        let mut derived = self.clone();
        derived.fields.merge(fields);
        Arc::new(derived)
    }
}
