//! Enabling and disabling the process default logger.

use std::sync::Arc;

use ctxlog::testing::RecordingLogger;
use ctxlog::{
    Context, disable_default_logger, enable_default_logger, from_context, standard_logger,
};
use serial_test::serial;

struct DefaultGuard;

impl Drop for DefaultGuard {
    fn drop(&mut self) {
        enable_default_logger();
    }
}

#[test]
#[serial]
fn unbound_context_falls_back_to_the_standard_logger() {
    let _guard = DefaultGuard;
    enable_default_logger();

    let resolved = from_context(&Context::background()).expect("default enabled");
    assert!(Arc::ptr_eq(&resolved, &standard_logger()));
}

#[test]
#[serial]
fn disabling_makes_unbound_contexts_resolve_to_nothing() {
    let _guard = DefaultGuard;
    disable_default_logger();

    assert!(from_context(&Context::background()).is_none());
    assert!(from_context(&Context::background().with_value("x")).is_none());
}

#[test]
#[serial]
fn toggle_is_idempotent() {
    let _guard = DefaultGuard;
    disable_default_logger();
    disable_default_logger();
    assert!(from_context(&Context::background()).is_none());

    enable_default_logger();
    enable_default_logger();
    assert!(from_context(&Context::background()).is_some());
}

#[test]
#[serial]
fn bound_logger_ignores_the_toggle() {
    let _guard = DefaultGuard;
    let spy = RecordingLogger::new();
    let ctx = Context::background().with_logger(Arc::new(spy.clone()));

    disable_default_logger();
    ctxlog::info(&ctx, &[&"still here"]);

    assert_eq!(spy.entries()[0].message, "still here");
}

#[test]
#[serial]
fn non_fatal_calls_without_logger_are_silent() {
    let _guard = DefaultGuard;
    disable_default_logger();
    let ctx = Context::background();

    ctxlog::trace(&ctx, &[&"a"]);
    ctxlog::debugf(&ctx, format_args!("b"));
    ctxlog::infoln(&ctx, &[&"c"]);
    ctxlog::print(&ctx, &[&"d"]);
    ctxlog::warning(&ctx, &[&"e"]);
    ctxlog::errorln(&ctx, &[&"f"]);
    ctxlog::panic(&ctx, &[&"g"]);
    ctxlog::panicf(&ctx, format_args!("h"));
    ctxlog::panicln(&ctx, &[&"i"]);
}
