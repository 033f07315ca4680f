//! crates/ctxlog/src/capture.rs
//! A `tracing-subscriber` layer that keeps events in memory for assertions.
//!
//! The layer records the level, target, message and every other field of each
//! event it sees. [`capture`] wires it into a scoped subscriber so a test can
//! observe exactly what the [`TracingLogger`](crate::TracingLogger) emitted.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context as LayerContext, Layer, SubscriberExt};

/// One event observed by a [`CaptureLayer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Level the event was emitted at.
    pub level: tracing::Level,
    /// Event target.
    pub target: String,
    /// The `message` field, empty when the event had none.
    pub message: String,
    /// Every other field, rendered as text.
    pub fields: BTreeMap<String, String>,
}

/// Layer that stores every event it receives.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// subscriber owns the other.
#[derive(Clone, Debug, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    /// Creates a layer with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the captured events.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    /// Removes and returns the captured events.
    pub fn drain(&self) -> Vec<CapturedEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CapturedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: BTreeMap<String, String>,
}

impl EventVisitor {
    fn store(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_owned(), value);
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.store(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_owned());
    }
}

/// Runs `f` under a scoped subscriber with a fresh [`CaptureLayer`] and returns
/// its result together with the events it emitted on the current thread.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
    let layer = CaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, layer.drain())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_message_and_fields() {
        let ((), events) = capture(|| {
            tracing::info!(target: "probe", count = 3, name = "x", "hello {}", "world");
        });

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.level, tracing::Level::INFO);
        assert_eq!(event.target, "probe");
        assert_eq!(event.message, "hello world");
        assert_eq!(event.fields.get("count").map(String::as_str), Some("3"));
        assert_eq!(event.fields.get("name").map(String::as_str), Some("x"));
    }

    #[test]
    fn events_outside_the_scope_are_not_captured() {
        let ((), events) = capture(|| {});
        tracing::warn!("after scope");
        assert!(events.is_empty());
    }

    #[test]
    fn drain_empties_the_buffer() {
        let layer = CaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || tracing::debug!("one"));

        assert_eq!(layer.events().len(), 1);
        assert_eq!(layer.drain().len(), 1);
        assert!(layer.events().is_empty());
    }
}
