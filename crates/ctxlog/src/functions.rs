//! crates/ctxlog/src/functions.rs
//! Crate-level entry points operating on the process-wide
//! [`ContextLogger`](crate::ContextLogger).
//!
//! These mirror the methods of `ContextLogger` one for one and delegate to
//! [`global`]. Code that owns its own dispatcher should call the methods
//! directly instead.

use std::error::Error;
use std::fmt;

use crate::context::Context;
use crate::dispatch::global;
use crate::fields::{FieldValue, Fields};
use crate::logger::SharedLogger;

/// Returns the logger bound to `ctx`, else the process default if enabled.
#[must_use]
pub fn from_context(ctx: &Context) -> Option<SharedLogger> {
    global().resolve(ctx)
}

/// Makes unbound contexts fall back to the standard logger (the initial state).
pub fn enable_default_logger() {
    global().enable_default();
}

/// Makes unbound contexts resolve to nothing, silencing their non-fatal calls.
pub fn disable_default_logger() {
    global().disable_default();
}

/// Derives a logger with `err` attached; `None` when `ctx` resolves to nothing.
#[must_use]
pub fn with_error(ctx: &Context, err: &dyn Error) -> Option<SharedLogger> {
    global().with_error(ctx, err)
}

/// Derives a logger with one extra field; `None` when `ctx` resolves to nothing.
///
/// The returned logger only logs once one of its level methods is called.
#[must_use]
pub fn with_field(ctx: &Context, key: &str, value: impl Into<FieldValue>) -> Option<SharedLogger> {
    global().with_field(ctx, key, value)
}

/// Derives a logger with several extra fields; `None` when `ctx` resolves to nothing.
#[must_use]
pub fn with_fields(ctx: &Context, fields: Fields) -> Option<SharedLogger> {
    global().with_fields(ctx, fields)
}

macro_rules! global_functions {
    ($($values:ident, $format:ident, $line:ident;)*) => {
        $(
            #[doc = concat!("See [`ContextLogger::", stringify!($values), "`](crate::ContextLogger::", stringify!($values), ").")]
            pub fn $values(ctx: &Context, args: &[&dyn fmt::Display]) {
                global().$values(ctx, args);
            }

            #[doc = concat!("See [`ContextLogger::", stringify!($format), "`](crate::ContextLogger::", stringify!($format), ").")]
            pub fn $format(ctx: &Context, args: fmt::Arguments<'_>) {
                global().$format(ctx, args);
            }

            #[doc = concat!("See [`ContextLogger::", stringify!($line), "`](crate::ContextLogger::", stringify!($line), ").")]
            pub fn $line(ctx: &Context, args: &[&dyn fmt::Display]) {
                global().$line(ctx, args);
            }
        )*
    };
}

global_functions! {
    trace, tracef, traceln;
    debug, debugf, debugln;
    info, infof, infoln;
    print, printf, println;
    warn, warnf, warnln;
    warning, warningf, warningln;
    error, errorf, errorln;
    panic, panicf, panicln;
    fatal, fatalf, fatalln;
}
