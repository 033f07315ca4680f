//! Deriving loggers with attached fields through a context.

use std::fmt;
use std::sync::Arc;

use ctxlog::testing::RecordingLogger;
use ctxlog::{
    Context, ERROR_KEY, FieldValue, Fields, Logger, LoggerExt, disable_default_logger,
    enable_default_logger,
};
use serial_test::serial;

#[derive(Debug)]
struct Refused;

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection refused")
    }
}

impl std::error::Error for Refused {}

#[test]
#[serial]
fn with_field_attaches_without_emitting() {
    let spy = RecordingLogger::new();
    let ctx = Context::background().with_logger(Arc::new(spy.clone()));

    let logger = ctxlog::with_field(&ctx, "request_id", 17_u64).expect("bound");
    assert!(spy.is_empty());

    logger.info(&[&"handled"]);
    let entry = &spy.entries()[0];
    assert_eq!(entry.fields.get("request_id"), Some(&FieldValue::U64(17)));
    assert_eq!(entry.message, "handled");
}

#[test]
#[serial]
fn with_error_uses_the_error_key() {
    let spy = RecordingLogger::new();
    let ctx = Context::background().with_logger(Arc::new(spy.clone()));

    ctxlog::with_error(&ctx, &Refused)
        .expect("bound")
        .errorln(&[&"dial", &"failed"]);

    let entry = &spy.entries()[0];
    assert_eq!(
        entry.fields.get(ERROR_KEY).and_then(FieldValue::as_str),
        Some("connection refused")
    );
    assert_eq!(entry.message, "dial failed");
}

#[test]
#[serial]
fn with_fields_merges_and_later_keys_win() {
    let spy = RecordingLogger::new();
    let base = spy.with_field("stage", FieldValue::from("parse"));
    let ctx = Context::background().with_logger(base);

    let fields = Fields::new().with("stage", "load").with("rows", 12);
    ctxlog::with_fields(&ctx, fields)
        .expect("bound")
        .warn(&[&"slow"]);

    assert_eq!(spy.entries()[0].fields.to_string(), "rows=12 stage=load");
}

#[test]
#[serial]
fn absence_propagates_when_nothing_resolves() {
    disable_default_logger();
    let ctx = Context::background();

    let results = (
        ctxlog::with_error(&ctx, &Refused),
        ctxlog::with_field(&ctx, "k", "v"),
        ctxlog::with_fields(&ctx, Fields::from([("a", 1)])),
    );
    enable_default_logger();

    assert!(results.0.is_none());
    assert!(results.1.is_none());
    assert!(results.2.is_none());
}

#[test]
#[serial]
fn unbound_context_derives_from_the_default_logger() {
    enable_default_logger();
    let derived = ctxlog::with_field(&Context::background(), "k", "v").expect("default enabled");
    assert!(!Arc::ptr_eq(&derived, &ctxlog::standard_logger()));
}
