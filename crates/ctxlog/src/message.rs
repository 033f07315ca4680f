//! crates/ctxlog/src/message.rs
//! The argument payload of a single log call.

use std::fmt;

use crate::levels::Style;

/// Arguments of one log call, tagged with the style they were passed in.
///
/// A `Message` borrows its arguments; nothing is rendered until a logger
/// formats it through the [`Display`](fmt::Display) implementation.
///
/// ```
/// use ctxlog::Message;
///
/// let user = "alice";
/// let attempts = 3;
/// assert_eq!(Message::Values(&[&"user=", &user]).to_string(), "user=alice");
/// assert_eq!(Message::Line(&[&"attempts", &attempts]).to_string(), "attempts 3");
/// assert_eq!(Message::Format(format_args!("{user}/{attempts}")).to_string(), "alice/3");
/// ```
#[derive(Clone, Copy)]
pub enum Message<'a> {
    /// Values written back to back.
    Values(&'a [&'a dyn fmt::Display]),
    /// Pre-bound format arguments.
    Format(fmt::Arguments<'a>),
    /// Values separated by single spaces.
    Line(&'a [&'a dyn fmt::Display]),
}

impl Message<'_> {
    /// Returns the style the arguments were passed in.
    #[must_use]
    pub const fn style(&self) -> Style {
        match self {
            Self::Values(_) => Style::Values,
            Self::Format(_) => Style::Format,
            Self::Line(_) => Style::Line,
        }
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values(values) => values
                .iter()
                .try_for_each(|value| fmt::Display::fmt(value, f)),
            Self::Format(args) => f.write_fmt(*args),
            Self::Line(values) => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    fmt::Display::fmt(value, f)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("style", &self.style())
            .field("text", &self.to_string())
            .finish()
    }
}
