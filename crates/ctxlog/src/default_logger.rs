//! crates/ctxlog/src/default_logger.rs
//! Fallback logger consulted when a context carries no logger of its own.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::logger::SharedLogger;
use crate::tracing_logger::standard_logger;

/// Provides the fallback logger for contexts without a bound logger.
///
/// The provider holds one standard logger and a switch. While enabled,
/// [`get`](Self::get) hands out the standard logger; while disabled it returns
/// `None`, which turns every non-fatal log call on an unbound context into a
/// no-op. A new provider starts enabled.
///
/// Toggling is atomic, but it is meant as startup configuration: a call that
/// already resolved its logger is not affected by a later toggle.
pub struct DefaultLogger {
    standard: SharedLogger,
    enabled: AtomicBool,
}

impl DefaultLogger {
    /// Creates an enabled provider around `standard`.
    #[must_use]
    pub fn new(standard: SharedLogger) -> Self {
        Self {
            standard,
            enabled: AtomicBool::new(true),
        }
    }

    /// Creates a provider around `standard` that starts disabled.
    #[must_use]
    pub fn disabled(standard: SharedLogger) -> Self {
        let provider = Self::new(standard);
        provider.disable();
        provider
    }

    /// Makes [`get`](Self::get) return the standard logger.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Makes [`get`](Self::get) return `None`.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// Reports whether the fallback is currently handed out.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Returns the fallback logger, or `None` while disabled.
    #[must_use]
    pub fn get(&self) -> Option<SharedLogger> {
        self.is_enabled().then(|| Arc::clone(&self.standard))
    }

    /// Returns the standard logger regardless of the switch.
    #[must_use]
    pub fn standard(&self) -> &SharedLogger {
        &self.standard
    }
}

impl Default for DefaultLogger {
    /// Wraps the process-wide [`standard_logger`].
    fn default() -> Self {
        Self::new(standard_logger())
    }
}

impl fmt::Debug for DefaultLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultLogger")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}
