//! crates/ctxlog/src/levels.rs
//! Severity levels and argument styles understood by every logger capability.

use std::fmt;
use std::str::FromStr;

/// Severity of a log call.
///
/// The ordering runs from the most verbose level to the most severe one, so
/// `Level::Trace < Level::Fatal`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Fine-grained tracing output.
    Trace,
    /// Debugging output.
    Debug,
    /// Informational output. `print` is an alias.
    Info,
    /// Something unexpected that does not stop the operation. `warning` is an alias.
    Warn,
    /// An operation failed.
    Error,
    /// Log, then unwind the calling thread.
    Panic,
    /// Log, then terminate the process.
    Fatal,
}

impl Level {
    /// Every level, ordered from least to most severe.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Panic,
        Self::Fatal,
    ];

    /// Returns the canonical lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Reports whether the level's contract ends the current thread or process.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Panic | Self::Fatal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}' (expected trace, debug, info, print, warn, warning, error, panic or fatal)")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" | "print" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "panic" => Ok(Self::Panic),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

/// How the arguments of a log call are turned into a message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Style {
    /// Values written back to back (`info`).
    Values,
    /// A format string with arguments (`infof`).
    Format,
    /// Values separated by single spaces (`infoln`).
    Line,
}

impl Style {
    /// Returns the lowercase name of the style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Values => "values",
            Self::Format => "format",
            Self::Line => "line",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a style name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown message style '{0}' (expected values, format or line)")]
pub struct ParseStyleError(String);

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "values" => Ok(Self::Values),
            "format" | "f" => Ok(Self::Format),
            "line" | "ln" => Ok(Self::Line),
            _ => Err(ParseStyleError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        let mut sorted = Level::ALL;
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
        assert!(Level::Trace < Level::Info);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn level_names_round_trip_through_display() {
        for level in Level::ALL {
            let parsed: Level = level.to_string().parse().expect("canonical name parses");
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn level_aliases_map_to_their_targets() {
        assert_eq!("print".parse::<Level>(), Ok(Level::Info));
        assert_eq!("Warning".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(" FATAL ".parse::<Level>(), Ok(Level::Fatal));
    }

    #[test]
    fn unknown_level_reports_input() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("'verbose'"));
    }

    #[test]
    fn only_panic_and_fatal_are_terminal() {
        let terminal: Vec<_> = Level::ALL.into_iter().filter(|l| l.is_terminal()).collect();
        assert_eq!(terminal, vec![Level::Panic, Level::Fatal]);
    }

    #[test]
    fn style_parsing_accepts_suffix_names() {
        assert_eq!("values".parse::<Style>(), Ok(Style::Values));
        assert_eq!("f".parse::<Style>(), Ok(Style::Format));
        assert_eq!("LN".parse::<Style>(), Ok(Style::Line));
        assert!("printf".parse::<Style>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&Level::Warn).expect("serialize");
        assert_eq!(json, "\"warn\"");
        let level: Level = serde_json::from_str("\"fatal\"").expect("deserialize");
        assert_eq!(level, Level::Fatal);
    }
}
