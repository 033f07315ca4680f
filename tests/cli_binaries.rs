use assert_cmd::Command;
use predicates::prelude::*;

fn probe() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ctxlog-probe"));
    command
        .env_remove("RUST_LOG")
        .env_remove("CTXLOG_FILTER")
        .env_remove("CTXLOG_DEFAULT_LOGGER");
    command
}

#[test]
fn help_lists_usage() {
    probe()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage: ctxlog-probe"));
}

#[test]
fn version_prints_program_name() {
    probe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ctxlog-probe "));
}

#[test]
fn unknown_flag_is_rejected() {
    probe()
        .arg("--definitely-not-a-flag")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ctxlog-probe:"));
}

#[test]
fn info_message_reaches_the_default_logger() {
    probe()
        .args(["--level", "info", "hello", " ", "world"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("hello world"))
        .stderr(predicate::str::contains("ctxlog"));
}

#[test]
fn line_style_joins_with_spaces() {
    probe()
        .args(["--style", "line", "disk", "almost", "full"])
        .assert()
        .success()
        .stderr(predicate::str::contains("disk almost full"));
}

#[test]
fn format_template_is_filled_from_operands() {
    probe()
        .args(["--format", "{} copied {} files", "alice", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("alice copied 3 files"));
}

#[test]
fn fields_and_error_are_attached() {
    probe()
        .args([
            "--level",
            "error",
            "--field",
            "user=alice",
            "--error",
            "timed out",
            "upload failed",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("upload failed"))
        .stderr(predicate::str::contains("user=alice"))
        .stderr(predicate::str::contains(r#"error=\"timed out\""#).or(
            predicate::str::contains(r#"error="timed out""#),
        ));
}

#[test]
fn filter_hides_levels_below_threshold() {
    probe()
        .args(["--level", "debug", "hidden"])
        .assert()
        .success()
        .stderr(predicate::str::contains("hidden").not());

    probe()
        .args(["-vv", "--level", "debug", "shown"])
        .assert()
        .success()
        .stderr(predicate::str::contains("shown"));
}

#[test]
fn environment_filter_is_honoured() {
    probe()
        .env("CTXLOG_FILTER", "error")
        .args(["--level", "warn", "quiet"])
        .assert()
        .success()
        .stderr(predicate::str::contains("quiet").not());
}

#[test]
fn disabled_default_logger_silences_unbound_calls() {
    probe()
        .args(["--no-default", "--level", "error", "nobody hears"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    probe()
        .env("CTXLOG_DEFAULT_LOGGER", "off")
        .args(["--level", "error", "nobody hears"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn bound_logger_ignores_disabled_default() {
    probe()
        .args(["--no-default", "--bind", "--level", "warn", "still", "logged"])
        .assert()
        .success()
        .stderr(predicate::str::contains("stilllogged"));
}

#[test]
fn invalid_default_logger_switch_is_a_usage_error() {
    probe()
        .env("CTXLOG_DEFAULT_LOGGER", "sometimes")
        .arg("x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CTXLOG_DEFAULT_LOGGER"));
}

#[test]
fn format_template_with_values_style_is_rejected() {
    probe()
        .args(["--style", "values", "--format", "{} copied", "alice"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--format cannot be combined"))
        .stderr(predicate::str::contains("alice").not());
}

#[test]
fn print_config_reflects_environment_as_json() {
    probe()
        .env("CTXLOG_FILTER", "ctxlog=trace")
        .args(["--print-config", "--no-default"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains(r#""filter": "ctxlog=trace""#))
        .stdout(predicate::str::contains(r#""default_logger": false"#));
}
