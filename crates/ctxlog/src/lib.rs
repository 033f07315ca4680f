#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `ctxlog` carries a logger through an immutable, request-scoped [`Context`]
//! and logs through it from anywhere the context reaches. Code that logs never
//! needs to know whether a logger was bound: unbound contexts fall back to a
//! process-wide default logger, and when that is disabled non-fatal calls do
//! nothing at all.
//!
//! # Design
//!
//! - [`Logger`] is the capability a context can carry. Implementations receive
//!   a [`Level`] and a [`Message`] and can derive copies of themselves with
//!   extra structured [`Fields`] attached.
//! - [`Context`] is a persistent chain of bindings. [`Context::with_logger`]
//!   (or [`new_context`]) derives a child holding a logger; parents are never
//!   modified.
//! - [`ContextLogger`] resolves the logger for a context (bound logger first,
//!   then the [`DefaultLogger`] if enabled) and forwards every per-level call.
//!   [`global`] holds the process-wide instance used by the free functions
//!   ([`info`], [`warnf`], [`fatalln`], ...) and the `ctx_*` macros.
//! - [`TracingLogger`] is the standard logger. It emits `tracing` events under
//!   the [`TARGET`] target, so output formatting and filtering belong to
//!   whatever subscriber the application installs (`init_tracing` installs the
//!   usual `fmt` subscriber when the `subscriber` feature is enabled).
//!
//! Every level comes in three styles: values (`info`), format (`infof`) and
//! line (`infoln`). `print` is an alias of `info` and `warning` of `warn`.
//!
//! # Invariants
//!
//! - A logger bound to a context resolves to that very instance
//!   (`Arc::ptr_eq` holds).
//! - A context without a logger resolves to the standard logger while the
//!   default is enabled and to nothing once it is disabled.
//! - Panic-level calls unwind after logging. Fatal-level calls end the process
//!   with status [`FATAL_EXIT_CODE`], even when no logger resolves.
//! - Attaching fields never emits anything on its own.
//!
//! # Examples
//!
//! Bind a recording logger and observe what reaches it:
//!
//! ```
//! use std::sync::Arc;
//! use ctxlog::{Context, Level, new_context, testing::RecordingLogger};
//!
//! let spy = RecordingLogger::new();
//! let ctx = new_context(Some(&Context::background()), Arc::new(spy.clone()));
//!
//! ctxlog::infof(&ctx, format_args!("copied {} files", 3));
//! ctxlog::warnln(&ctx, &[&"disk", &"almost", &"full"]);
//!
//! let entries = spy.entries();
//! assert_eq!(entries[0].level, Level::Info);
//! assert_eq!(entries[0].message, "copied 3 files");
//! assert_eq!(entries[1].message, "disk almost full");
//! ```
//!
//! Attach fields and an error before logging:
//!
//! ```
//! use std::sync::Arc;
//! use ctxlog::{Context, LoggerExt, testing::RecordingLogger};
//!
//! let spy = RecordingLogger::new();
//! let ctx = Context::background().with_logger(Arc::new(spy.clone()));
//!
//! let err = std::io::Error::other("timed out");
//! if let Some(logger) = ctxlog::with_error(&ctx, &err) {
//!     logger.error(&[&"upload failed"]);
//! }
//!
//! assert_eq!(spy.entries()[0].fields.to_string(), r#"error="timed out""#);
//! ```
//!
//! # See also
//!
//! - [`testing`] for the recording logger used in tests.
//! - [`LogConfig`] for environment-driven startup configuration.

mod config;
mod context;
mod default_logger;
mod dispatch;
mod fields;
mod functions;
mod levels;
mod logger;
mod macros;
mod message;
mod tracing_logger;

#[cfg(any(test, feature = "subscriber"))]
pub mod capture;
pub mod testing;

#[cfg(feature = "subscriber")]
pub use config::{init_tracing, init_tracing_with_layer};
pub use config::{ConfigError, DEFAULT_LOGGER_ENV, FILTER_ENV, LogConfig, RUST_LOG_ENV};
pub use context::{Context, new_context};
pub use default_logger::DefaultLogger;
pub use dispatch::{ContextLogger, global};
pub use fields::{ERROR_KEY, FieldValue, Fields};
pub use functions::{
    debug, debugf, debugln, disable_default_logger, enable_default_logger, error, errorf, errorln,
    fatal, fatalf, fatalln, from_context, info, infof, infoln, panic, panicf, panicln, print,
    printf, println, trace, tracef, traceln, warn, warnf, warning, warningf, warningln, warnln,
    with_error, with_field, with_fields,
};
pub use levels::{Level, ParseLevelError, ParseStyleError, Style};
pub use logger::{
    DiscardLogger, ExitHandler, FATAL_EXIT_CODE, Logger, LoggerExt, SharedLogger, exit_process,
};
pub use message::Message;
pub use tracing_logger::{TARGET, TracingLogger, standard_logger};
