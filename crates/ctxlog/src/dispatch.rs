//! crates/ctxlog/src/dispatch.rs
//! Resolves the logger for a context and forwards log calls to it.

use std::error::Error;
use std::fmt;
use std::sync::OnceLock;

use crate::context::Context;
use crate::default_logger::DefaultLogger;
use crate::fields::{FieldValue, Fields};
use crate::levels::Level;
use crate::logger::{ExitHandler, FATAL_EXIT_CODE, SharedLogger, exit_process};
use crate::message::Message;

/// Logs through whatever logger a [`Context`] carries, falling back to a
/// [`DefaultLogger`] and finally to nothing.
///
/// Every per-level method resolves the context's logger and forwards the call
/// unchanged. When nothing resolves, non-fatal calls return without effect and
/// fatal calls end the process with [`FATAL_EXIT_CODE`], without emitting
/// anything.
///
/// Applications can own an instance (for example in their composition root)
/// or use the process-wide one behind [`global`] and the crate-level free
/// functions.
pub struct ContextLogger {
    default: DefaultLogger,
    exit: ExitHandler,
}

macro_rules! dispatch_methods {
    ($($level:ident => $values:ident, $format:ident, $line:ident;)*) => {
        $(
            #[doc = concat!("Logs `args` back to back at `", stringify!($level), "` level on the context's logger.")]
            pub fn $values(&self, ctx: &Context, args: &[&dyn fmt::Display]) {
                self.log(ctx, Level::$level, Message::Values(args));
            }

            #[doc = concat!("Logs format arguments at `", stringify!($level), "` level on the context's logger.")]
            pub fn $format(&self, ctx: &Context, args: fmt::Arguments<'_>) {
                self.log(ctx, Level::$level, Message::Format(args));
            }

            #[doc = concat!("Logs space-separated `args` at `", stringify!($level), "` level on the context's logger.")]
            pub fn $line(&self, ctx: &Context, args: &[&dyn fmt::Display]) {
                self.log(ctx, Level::$level, Message::Line(args));
            }
        )*
    };
}

impl ContextLogger {
    /// Creates a dispatcher around `default`.
    #[must_use]
    pub fn new(default: DefaultLogger) -> Self {
        Self {
            default,
            exit: exit_process,
        }
    }

    /// Replaces the handler invoked when a fatal call finds no logger.
    #[must_use]
    pub fn with_exit_handler(mut self, exit: ExitHandler) -> Self {
        self.exit = exit;
        self
    }

    /// The fallback provider.
    #[must_use]
    pub const fn default_logger(&self) -> &DefaultLogger {
        &self.default
    }

    /// Makes unbound contexts resolve to the standard logger again.
    pub fn enable_default(&self) {
        self.default.enable();
    }

    /// Makes unbound contexts resolve to nothing.
    pub fn disable_default(&self) {
        self.default.disable();
    }

    /// Returns the logger bound to `ctx`, else the default logger if enabled.
    #[must_use]
    pub fn resolve(&self, ctx: &Context) -> Option<SharedLogger> {
        ctx.logger().cloned().or_else(|| self.default.get())
    }

    /// Derives a logger with `err` attached from the logger resolved for `ctx`.
    #[must_use]
    pub fn with_error(&self, ctx: &Context, err: &dyn Error) -> Option<SharedLogger> {
        self.resolve(ctx).map(|logger| logger.with_error(err))
    }

    /// Derives a logger with one extra field from the logger resolved for `ctx`.
    #[must_use]
    pub fn with_field(
        &self,
        ctx: &Context,
        key: &str,
        value: impl Into<FieldValue>,
    ) -> Option<SharedLogger> {
        self.resolve(ctx)
            .map(|logger| logger.with_field(key, value.into()))
    }

    /// Derives a logger with `fields` attached from the logger resolved for `ctx`.
    #[must_use]
    pub fn with_fields(&self, ctx: &Context, fields: Fields) -> Option<SharedLogger> {
        self.resolve(ctx).map(|logger| logger.with_fields(fields))
    }

    /// Forwards one call to the logger resolved for `ctx`.
    ///
    /// This is the single routine behind every per-level method.
    pub fn log(&self, ctx: &Context, level: Level, message: Message<'_>) {
        match self.resolve(ctx) {
            Some(logger) => logger.log(level, message),
            None if level == Level::Fatal => (self.exit)(FATAL_EXIT_CODE),
            None => {}
        }
    }

    dispatch_methods! {
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

impl Default for ContextLogger {
    fn default() -> Self {
        Self::new(DefaultLogger::default())
    }
}

impl fmt::Debug for ContextLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextLogger")
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Process-wide dispatcher used by the crate-level free functions.
///
/// Initialised on first use with the default logger enabled around
/// [`standard_logger`](crate::standard_logger).
pub fn global() -> &'static ContextLogger {
    static GLOBAL: OnceLock<ContextLogger> = OnceLock::new();
    GLOBAL.get_or_init(ContextLogger::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Style;
    use crate::logger::Logger;
    use crate::testing::RecordingLogger;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    static EXIT_CODE: AtomicI32 = AtomicI32::new(0);

    fn record_exit(code: i32) {
        EXIT_CODE.store(code, Ordering::SeqCst);
    }

    fn fixture() -> (ContextLogger, RecordingLogger) {
        let standard = RecordingLogger::new();
        let dispatcher = ContextLogger::new(DefaultLogger::new(Arc::new(standard.clone())));
        (dispatcher, standard)
    }

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl Error for Broken {}

    #[test]
    fn resolve_prefers_bound_logger() {
        let (dispatcher, _standard) = fixture();
        let bound: SharedLogger = Arc::new(RecordingLogger::new());
        let ctx = Context::background().with_logger(Arc::clone(&bound));
        let resolved = dispatcher.resolve(&ctx).expect("bound logger resolves");
        assert!(Arc::ptr_eq(&resolved, &bound));
    }

    #[test]
    fn resolve_falls_back_to_default_until_disabled() {
        let (dispatcher, _standard) = fixture();
        let ctx = Context::background().with_value("not a logger");

        let fallback = dispatcher.resolve(&ctx).expect("default enabled");
        assert!(Arc::ptr_eq(&fallback, dispatcher.default_logger().standard()));

        dispatcher.disable_default();
        assert!(dispatcher.resolve(&ctx).is_none());

        dispatcher.enable_default();
        assert!(dispatcher.resolve(&ctx).is_some());
    }

    #[test]
    fn every_style_forwards_level_and_arguments() {
        let (dispatcher, _standard) = fixture();
        let spy = RecordingLogger::new();
        let ctx = Context::background().with_logger(Arc::new(spy.clone()));

        dispatcher.trace(&ctx, &[&"a", &1]);
        dispatcher.debugf(&ctx, format_args!("{}-{}", "b", 2));
        dispatcher.infoln(&ctx, &[&"c", &3]);
        dispatcher.print(&ctx, &[&"d"]);
        dispatcher.warning(&ctx, &[&"e"]);
        dispatcher.errorf(&ctx, format_args!("f"));

        let seen: Vec<_> = spy
            .entries()
            .into_iter()
            .map(|entry| (entry.level, entry.style, entry.message))
            .collect();
        assert_eq!(
            seen,
            vec![
                (Level::Trace, Style::Values, "a1".to_owned()),
                (Level::Debug, Style::Format, "b-2".to_owned()),
                (Level::Info, Style::Line, "c 3".to_owned()),
                (Level::Info, Style::Values, "d".to_owned()),
                (Level::Warn, Style::Values, "e".to_owned()),
                (Level::Error, Style::Format, "f".to_owned()),
            ]
        );
    }

    #[test]
    fn unbound_context_logs_on_default_logger() {
        let (dispatcher, standard) = fixture();
        dispatcher.info(&Context::background(), &[&"hello"]);
        assert_eq!(standard.len(), 1);
        assert_eq!(standard.entries()[0].message, "hello");
    }

    #[test]
    fn non_fatal_levels_are_silent_without_logger() {
        let (dispatcher, standard) = fixture();
        let dispatcher = dispatcher.with_exit_handler(record_exit);
        dispatcher.disable_default();
        let ctx = Context::background();

        dispatcher.trace(&ctx, &[&"x"]);
        dispatcher.debugln(&ctx, &[&"x"]);
        dispatcher.infof(&ctx, format_args!("x"));
        dispatcher.warn(&ctx, &[&"x"]);
        dispatcher.error(&ctx, &[&"x"]);
        dispatcher.panic(&ctx, &[&"x"]);
        dispatcher.panicf(&ctx, format_args!("x"));

        assert!(standard.is_empty());
    }

    #[test]
    fn fatal_without_logger_exits_with_status_one() {
        let (dispatcher, standard) = fixture();
        let dispatcher = dispatcher.with_exit_handler(record_exit);
        dispatcher.disable_default();

        EXIT_CODE.store(0, Ordering::SeqCst);
        dispatcher.fatalln(&Context::background(), &[&"gone"]);
        assert_eq!(EXIT_CODE.load(Ordering::SeqCst), FATAL_EXIT_CODE);
        assert!(standard.is_empty());
    }

    #[test]
    fn fatal_with_logger_delegates_to_it() {
        let (dispatcher, _standard) = fixture();
        let spy = RecordingLogger::new();
        let ctx = Context::background().with_logger(Arc::new(spy.clone()));

        dispatcher.fatalf(&ctx, format_args!("stop {}", 1));

        let entries = spy.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Fatal);
        assert_eq!(entries[0].message, "stop 1");
    }

    #[test]
    fn field_helpers_derive_from_resolved_logger() {
        let (dispatcher, _standard) = fixture();
        let spy = RecordingLogger::new();
        let base = spy.with_field("service", FieldValue::from("api"));
        let ctx = Context::background().with_logger(Arc::clone(&base));

        let derived = dispatcher
            .with_field(&ctx, "k", "v")
            .expect("logger resolves");
        assert!(!Arc::ptr_eq(&derived, &base));
        derived.log(Level::Info, Message::Values(&[&"msg"]));

        let with_err = dispatcher.with_error(&ctx, &Broken).expect("logger resolves");
        with_err.log(Level::Error, Message::Values(&[&"failed"]));

        let with_many = dispatcher
            .with_fields(&ctx, Fields::from([("a", 1), ("b", 2)]))
            .expect("logger resolves");
        with_many.log(Level::Debug, Message::Values(&[&"many"]));

        let entries = spy.entries();
        assert_eq!(entries[0].fields.to_string(), "k=v service=api");
        assert_eq!(
            entries[1].fields.to_string(),
            r#"error="connection reset" service=api"#
        );
        assert_eq!(entries[2].fields.to_string(), "a=1 b=2 service=api");
    }

    #[test]
    fn field_helpers_propagate_absence() {
        let (dispatcher, standard) = fixture();
        dispatcher.disable_default();
        let ctx = Context::background();

        assert!(dispatcher.with_field(&ctx, "k", "v").is_none());
        assert!(dispatcher.with_error(&ctx, &Broken).is_none());
        assert!(dispatcher.with_fields(&ctx, Fields::new()).is_none());
        assert!(standard.is_empty());
    }

    #[test]
    fn attaching_fields_never_emits() {
        let (dispatcher, standard) = fixture();
        let _derived = dispatcher.with_field(&Context::background(), "k", 1);
        assert!(standard.is_empty());
    }

    #[test]
    fn global_dispatcher_is_a_single_instance() {
        assert!(std::ptr::eq(global(), global()));
    }
}
