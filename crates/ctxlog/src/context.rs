//! crates/ctxlog/src/context.rs
//! Immutable, chainable request context carrying a logger and typed values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::logger::SharedLogger;

/// An immutable chain of request-scoped bindings.
///
/// Every `with_*` call returns a child context that shares its parent's chain;
/// the parent is never modified, so contexts are cheap to clone and safe to
/// hand across threads. Lookups walk from the newest binding towards the root
/// and return the first match, which lets a child shadow a parent's binding.
///
/// The logger has a dedicated slot. Other values are keyed by their Rust type,
/// so a value of one type can never be mistaken for the logger or for a value
/// of another type.
///
/// ```
/// use std::sync::Arc;
/// use ctxlog::{Context, SharedLogger, testing::RecordingLogger};
///
/// #[derive(Debug, PartialEq)]
/// struct RequestId(u64);
///
/// let logger: SharedLogger = Arc::new(RecordingLogger::new());
/// let ctx = Context::background()
///     .with_value(RequestId(7))
///     .with_logger(Arc::clone(&logger));
///
/// assert_eq!(ctx.value::<RequestId>(), Some(&RequestId(7)));
/// assert!(Arc::ptr_eq(ctx.logger().unwrap(), &logger));
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

struct Node {
    parent: Option<Arc<Node>>,
    binding: Binding,
}

enum Binding {
    Logger(SharedLogger),
    Value(Arc<dyn Any + Send + Sync>),
}

impl Context {
    /// Returns the empty root context.
    #[must_use]
    pub const fn background() -> Self {
        Self { head: None }
    }

    fn extend(&self, binding: Binding) -> Self {
        Self {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                binding,
            })),
        }
    }

    fn bindings(&self) -> impl Iterator<Item = &Binding> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
            .map(|node| &node.binding)
    }

    /// Returns a child context with `logger` bound.
    #[must_use]
    pub fn with_logger(&self, logger: SharedLogger) -> Self {
        self.extend(Binding::Logger(logger))
    }

    /// Returns a child context carrying `value`, keyed by its type.
    #[must_use]
    pub fn with_value<T>(&self, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.extend(Binding::Value(Arc::new(value)))
    }

    /// Returns the nearest logger bound to this context, ignoring any default.
    #[must_use]
    pub fn logger(&self) -> Option<&SharedLogger> {
        self.bindings().find_map(|binding| match binding {
            Binding::Logger(logger) => Some(logger),
            Binding::Value(_) => None,
        })
    }

    /// Returns the nearest value of type `T` bound to this context.
    #[must_use]
    pub fn value<T>(&self) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        self.bindings().find_map(|binding| match binding {
            Binding::Value(value) => value.downcast_ref::<T>(),
            Binding::Logger(_) => None,
        })
    }

    /// Number of bindings in the chain, shadowed ones included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.bindings().count()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.depth())
            .field("has_logger", &self.logger().is_some())
            .finish()
    }
}

/// Returns `ctx` extended with `logger`, starting from [`Context::background`]
/// when no context is supplied.
#[must_use]
pub fn new_context(ctx: Option<&Context>, logger: SharedLogger) -> Context {
    match ctx {
        Some(ctx) => ctx.with_logger(logger),
        None => Context::background().with_logger(logger),
    }
}
