#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of `ctxlog-probe`, a small
//! diagnostic binary that drives one log call through the [`ctxlog`] dispatch
//! path. It is useful for checking how a deployment's `tracing` filter and the
//! default-logger switch interact, and it is how the workspace observes the
//! process-level effects of fatal and panic calls.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for standard
//! output and error. A [`clap`](https://docs.rs/clap/) command definition
//! parses the arguments into a private `ParsedArgs` record, after which the
//! probe:
//!
//! 1. builds a [`LogConfig`] from the environment and the command line and
//!    installs the `tracing` subscriber,
//! 2. optionally binds a fresh [`TracingLogger`] into a new context,
//! 3. derives a logger carrying `--field` and `--error` values, and
//! 4. forwards one call at the requested level and style.
//!
//! # Invariants
//!
//! - Help and version output go to standard output; diagnostics go to standard
//!   error. Log events are written to the process's standard error by the
//!   installed subscriber.
//! - A fatal call ends the process with status [`ctxlog::FATAL_EXIT_CODE`],
//!   whether or not a logger resolved.
//! - A panic call is reported with status [`EXIT_PANIC`].
//!
//! # Errors
//!
//! Argument and template problems print a diagnostic and return
//! [`EXIT_USAGE`].
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["ctxlog-probe", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("ctxlog-probe "));
//! assert!(stderr.is_empty());
//! ```

mod template;

use std::ffi::OsString;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use clap::{Arg, ArgAction, Command};
use ctxlog::{
    ConfigError, Context, FieldValue, Fields, Level, LogConfig, Message, Style, TracingLogger,
    global, new_context,
};

pub use template::{TemplateError, expand_template};

/// Program name used in help, version and diagnostic output.
pub const PROGRAM_NAME: &str = "ctxlog-probe";

/// Exit status for successful runs.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status for argument, template and configuration errors.
pub const EXIT_USAGE: i32 = 1;

/// Exit status reported when the log call unwound at panic level.
pub const EXIT_PANIC: i32 = 101;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

const HELP_TEXT: &str = concat!(
    "ctxlog-probe: send one log call through a context-scoped logger\n",
    "\n",
    "Usage: ctxlog-probe [OPTIONS] [MESSAGE]...\n",
    "\n",
    "Options:\n",
    "  -l, --level LEVEL      trace, debug, info, print, warn, warning, error, panic\n",
    "                         or fatal (default: info).\n",
    "  -s, --style STYLE      values, format (f) or line (ln) (default: values).\n",
    "      --format TEMPLATE  Fill '{}' placeholders from MESSAGE operands; implies\n",
    "                         --style format.\n",
    "      --bind             Bind a dedicated logger into the context instead of\n",
    "                         relying on the default logger.\n",
    "      --field KEY=VALUE  Attach a structured field (repeatable).\n",
    "      --error TEXT       Attach TEXT as the error field.\n",
    "      --no-default       Disable the default logger.\n",
    "      --print-config     Print the effective logging configuration as JSON\n",
    "                         and exit without logging.\n",
    "  -v, --verbose          Lower the tracing filter one level per use.\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Output version information and exit.\n",
    "\n",
    "Environment:\n",
    "  CTXLOG_FILTER          tracing filter directive (falls back to RUST_LOG).\n",
    "  CTXLOG_DEFAULT_LOGGER  0/false/no/off disables the default logger.\n",
);

/// Error attached through `--error`.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct ProbeError(String);

/// Parsed command produced by [`parse_args`].
#[derive(Debug)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    level: Level,
    style: Style,
    template: Option<String>,
    bind: bool,
    fields: Vec<(String, String)>,
    error: Option<String>,
    no_default: bool,
    print_config: bool,
    verbose: u8,
    messages: Vec<String>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .value_parser(|value: &str| value.parse::<Level>())
                .default_value("info"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .short('s')
                .value_name("STYLE")
                .value_parser(|value: &str| value.parse::<Style>()),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("TEMPLATE"),
        )
        .arg(Arg::new("bind").long("bind").action(ArgAction::SetTrue))
        .arg(
            Arg::new("field")
                .long("field")
                .value_name("KEY=VALUE")
                .value_parser(parse_field)
                .action(ArgAction::Append),
        )
        .arg(Arg::new("error").long("error").value_name("TEXT"))
        .arg(
            Arg::new("no-default")
                .long("no-default")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("messages")
                .value_name("MESSAGE")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

fn parse_field(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, field)) if !key.is_empty() => Ok((key.to_owned(), field.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got '{value}'")),
    }
}

fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let template = matches.remove_one::<String>("format");
    let style = match (matches.remove_one::<Style>("style"), &template) {
        (Some(style), _) => style,
        (None, Some(_)) => Style::Format,
        (None, None) => Style::Values,
    };

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        level: matches.remove_one::<Level>("level").unwrap_or(Level::Info),
        style,
        template,
        bind: matches.get_flag("bind"),
        fields: matches
            .remove_many::<(String, String)>("field")
            .map(|values| values.collect())
            .unwrap_or_default(),
        error: matches.remove_one::<String>("error"),
        no_default: matches.get_flag("no-default"),
        print_config: matches.get_flag("print-config"),
        verbose: matches.get_count("verbose"),
        messages: matches
            .remove_many::<String>("messages")
            .map(|values| values.collect())
            .unwrap_or_default(),
    })
}

fn render_help() -> String {
    HELP_TEXT.to_owned()
}

fn render_version() -> String {
    format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"))
}

/// Runs the probe with the supplied arguments and returns its exit status.
///
/// A fatal-level call does not return: the process exits with
/// [`ctxlog::FATAL_EXIT_CODE`].
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{PROGRAM_NAME}: {error}");
            EXIT_USAGE
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return write_or_fail(stdout, &render_help());
    }
    if parsed.show_version {
        return write_or_fail(stdout, &render_version());
    }

    let text = match render_text(&parsed) {
        Ok(text) => text,
        Err(error) => return usage_error(stderr, &error),
    };

    let config = match build_config(&parsed) {
        Ok(config) => config,
        Err(error) => return usage_error(stderr, &error),
    };
    if parsed.print_config {
        return match serde_json::to_string_pretty(&config) {
            Ok(json) => write_or_fail(stdout, &format!("{json}\n")),
            Err(error) => usage_error(stderr, &error),
        };
    }
    if let Err(error) = install(&config) {
        return usage_error(stderr, &error);
    }

    let ctx = build_context(&parsed);
    tracing::debug!(
        level = %parsed.level,
        style = %parsed.style,
        bound = parsed.bind,
        "probe dispatching"
    );

    let args: Vec<&dyn std::fmt::Display> = parsed
        .messages
        .iter()
        .map(|message| message as &dyn std::fmt::Display)
        .collect();
    let level = parsed.level;
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match (parsed.style, &text) {
        (Style::Format, Some(text)) => {
            global().log(&ctx, level, Message::Format(format_args!("{text}")));
        }
        (Style::Line, _) => global().log(&ctx, level, Message::Line(&args)),
        _ => global().log(&ctx, level, Message::Values(&args)),
    }));

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| payload.downcast_ref::<&str>().copied())
                .unwrap_or("panic");
            let _ = writeln!(stderr, "{PROGRAM_NAME}: panicked: {reason}");
            EXIT_PANIC
        }
    }
}

/// Renders the format-style text, if the format style was selected.
///
/// A template given alongside another explicit style is rejected rather than
/// ignored.
fn render_text(parsed: &ParsedArgs) -> Result<Option<String>, String> {
    match (parsed.style, parsed.template.as_deref()) {
        (Style::Format, Some(template)) => expand_template(template, &parsed.messages)
            .map(Some)
            .map_err(|error| error.to_string()),
        (Style::Format, None) => Err("--style format requires --format TEMPLATE".to_owned()),
        (style, Some(_)) => Err(format!("--format cannot be combined with --style {style}")),
        (_, None) => Ok(None),
    }
}

fn build_config(parsed: &ParsedArgs) -> Result<LogConfig, ConfigError> {
    let mut config = LogConfig::from_env()?;
    if parsed.verbose > 0 {
        config.filter = LogConfig::from_verbose_level(parsed.verbose).filter;
    }
    if parsed.no_default {
        config.default_logger = false;
    }
    Ok(config)
}

/// Installs the subscriber, tolerating one installed earlier in this process.
fn install(config: &LogConfig) -> Result<(), ConfigError> {
    match ctxlog::init_tracing(config) {
        Err(ConfigError::AlreadyInstalled(_)) => {
            config.apply_default(global());
            Ok(())
        }
        other => other,
    }
}

fn build_context(parsed: &ParsedArgs) -> Context {
    let mut ctx = Context::background();
    if parsed.bind {
        ctx = new_context(Some(&ctx), Arc::new(TracingLogger::new()));
    }

    if !parsed.fields.is_empty() {
        let fields: Fields = parsed
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), field_value(value)))
            .collect();
        if let Some(logger) = ctxlog::with_fields(&ctx, fields) {
            ctx = new_context(Some(&ctx), logger);
        }
    }

    if let Some(error) = &parsed.error {
        if let Some(logger) = ctxlog::with_error(&ctx, &ProbeError(error.clone())) {
            ctx = new_context(Some(&ctx), logger);
        }
    }
    ctx
}

/// Integers and booleans keep their type; everything else stays text.
fn field_value(raw: &str) -> FieldValue {
    if let Ok(number) = raw.parse::<i64>() {
        FieldValue::from(number)
    } else if let Ok(flag) = raw.parse::<bool>() {
        FieldValue::from(flag)
    } else {
        FieldValue::from(raw)
    }
}

fn write_or_fail<W: Write>(writer: &mut W, text: &str) -> i32 {
    if writer.write_all(text.as_bytes()).is_err() {
        EXIT_USAGE
    } else {
        EXIT_SUCCESS
    }
}

fn usage_error<W: Write>(stderr: &mut W, error: &dyn std::fmt::Display) -> i32 {
    let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
    EXIT_USAGE
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
