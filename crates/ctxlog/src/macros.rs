//! crates/ctxlog/src/macros.rs
//! Convenience macros over the process-wide dispatcher.
//!
//! These wrap `format_args!` and argument slices so call sites read like the
//! standard formatting macros.

/// Log values back to back at an explicit level on the context's logger.
///
/// # Example
/// ```
/// use ctxlog::{Context, Level, ctx_log};
///
/// let ctx = Context::background();
/// ctx_log!(&ctx, Level::Info, "copied ", 3, " files");
/// ```
#[macro_export]
macro_rules! ctx_log {
    ($ctx:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $crate::global().log($ctx, $level, $crate::Message::Values(&[$(&$arg),+]))
    };
}

/// Log a format string at an explicit level on the context's logger.
///
/// # Example
/// ```
/// use ctxlog::{Context, Level, ctx_logf};
///
/// let ctx = Context::background();
/// ctx_logf!(&ctx, Level::Debug, "retry {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! ctx_logf {
    ($ctx:expr, $level:expr, $($arg:tt)+) => {
        $crate::global().log($ctx, $level, $crate::Message::Format(::core::format_args!($($arg)+)))
    };
}

/// Log a format string at trace level.
///
/// # Example
/// ```ignore
/// ctx_tracef!(&ctx, "entering {}", name);
/// ```
#[macro_export]
macro_rules! ctx_tracef {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::ctx_logf!($ctx, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a format string at debug level.
///
/// # Example
/// ```ignore
/// ctx_debugf!(&ctx, "cache miss for {}", key);
/// ```
#[macro_export]
macro_rules! ctx_debugf {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::ctx_logf!($ctx, $crate::Level::Debug, $($arg)+)
    };
}

/// Log a format string at info level.
///
/// # Example
/// ```
/// use ctxlog::{Context, ctx_infof};
///
/// let ctx = Context::background();
/// ctx_infof!(&ctx, "user {} signed in", "alice");
/// ```
#[macro_export]
macro_rules! ctx_infof {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::ctx_logf!($ctx, $crate::Level::Info, $($arg)+)
    };
}

/// Log a format string at warn level.
#[macro_export]
macro_rules! ctx_warnf {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::ctx_logf!($ctx, $crate::Level::Warn, $($arg)+)
    };
}

/// Log a format string at error level.
///
/// # Example
/// ```ignore
/// ctx_errorf!(&ctx, "write failed: {}", err);
/// ```
#[macro_export]
macro_rules! ctx_errorf {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::ctx_logf!($ctx, $crate::Level::Error, $($arg)+)
    };
}

/// Log a format string at panic level; the logger unwinds afterwards.
#[macro_export]
macro_rules! ctx_panicf {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::ctx_logf!($ctx, $crate::Level::Panic, $($arg)+)
    };
}

/// Log a format string at fatal level; the process ends afterwards, even when
/// no logger resolves.
#[macro_export]
macro_rules! ctx_fatalf {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::ctx_logf!($ctx, $crate::Level::Fatal, $($arg)+)
    };
}
