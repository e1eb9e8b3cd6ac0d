//! crates/cli/src/tests.rs
//! Replay and output routing tests for the demo driver.

use super::*;
use logging::ManualClock;
use logging_sink::{CaptureHandle, ColorMode};

fn replay_with(args: &[&str]) -> (i32, CaptureHandle) {
    let parsed = parse_args(std::iter::once("dbglog-demo").chain(args.iter().copied())).expect("valid arguments");
    let mut console = CaptureSink::new();
    let handle = console.handle();
    let status = execute(&parsed, ManualClock::new(), &mut console);
    (status, handle)
}

fn texts_without_tracing(handle: &CaptureHandle) -> Vec<String> {
    handle
        .texts()
        .into_iter()
        .filter(|text| !text.contains("forwarded from tracing"))
        .collect()
}

const HOST_SETTINGS: &[&str] = &["--enable", "--level", "info", "--no-emitters", "--labels"];

// ============================================================================
// Replay
// ============================================================================

#[test]
fn default_settings_print_banner_and_error_only() {
    let (status, handle) = replay_with(&[]);
    assert_eq!(status, 0);

    let texts = handle.texts();
    assert_eq!(texts.len(), 2, "{texts:?}");
    assert_eq!(texts[0], "0.000  log  app started");
    assert!(texts[1].starts_with("0.000  ERR  #AppController > ERROR \t\t\t"));
    assert!(texts[1].contains("scenario.rs:"));
}

#[test]
fn host_settings_reproduce_the_demo_console() {
    let (status, handle) = replay_with(HOST_SETTINGS);
    assert_eq!(status, 0);

    let texts = texts_without_tracing(&handle);
    assert_eq!(texts.len(), 5, "{texts:?}");
    assert_eq!(texts[0], "0.000  log  app started");
    assert_eq!(texts[1], "0.000  log  #appRun started 0");
    assert!(texts[2].starts_with("0.000  ERR  #AppController > ERROR"));
    assert_eq!(texts[3], "0.000  wrn  #AppController > Warning");
    assert_eq!(texts[4], "0.000  log  #AppController > LOG");
}

#[test]
fn labels_move_into_the_badge() {
    let (_, handle) = replay_with(&["--enable", "--level", "debug", "--no-emitters", "--labels"]);
    let texts = texts_without_tracing(&handle);
    assert_eq!(texts.last().map(String::as_str), Some("0.000  log #routes and states  what?"));
}

#[test]
fn trace_level_replays_every_call() {
    let (_, handle) = replay_with(&["--enable", "--level", "trace", "--no-emitters"]);
    let texts = texts_without_tracing(&handle);
    assert!(texts.contains(&"0.000  log  #appRun started 1 ".to_owned()));
    assert!(texts.contains(&"0.000  log  #appRun started 2".to_owned()));
    assert!(texts.contains(&"0.000  log  #AppController > TRACE".to_owned()));
    assert_eq!(texts.last().map(String::as_str), Some("0.000  log  #routes and states > what?"));
}

#[test]
fn category_switch_silences_rs() {
    let (_, handle) = replay_with(&["--enable", "--level", "debug", "--category", "rs=off"]);
    assert!(!handle.texts().iter().any(|text| text.contains("what?")));
}

#[test]
fn yell_adds_attention_block() {
    let (_, handle) = replay_with(&["--enable", "--yell"]);
    let texts = handle.texts();
    assert!(texts.iter().any(|text| text.starts_with(" ATTENTION HERE! ")));
    assert!(texts.iter().any(|text| text.contains("#AppController > yell")));
}

#[test]
fn yell_needs_enable() {
    let (_, handle) = replay_with(&["--yell"]);
    assert!(!handle.texts().iter().any(|text| text.contains("ATTENTION")));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn switches_override_settings_object() {
    let (_, handle) = replay_with(&[
        "--settings",
        r#"{"enable": true, "debugLevel": "trace", "labels": true}"#,
        "--level",
        "warn",
        "--print-settings",
    ]);

    let texts = handle.texts();
    assert_eq!(texts.len(), 1, "{texts:?}");
    let printed: serde_json::Value = serde_json::from_str(&texts[0]).expect("settings JSON");
    assert_eq!(printed["enabled"], true);
    assert_eq!(printed["level"], "warn");
    assert_eq!(printed["showLabels"], true);
}

#[test]
fn non_object_settings_warn_and_continue() {
    let (status, handle) = replay_with(&["--settings", "[1, 2]", "--print-settings"]);
    assert_eq!(status, 0);

    let lines = handle.drain();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].method(), ConsoleMethod::Warn);
    assert!(lines[0].text().contains("settings must be an object, found an array"));
}

#[test]
fn help_is_written_to_output() {
    let (status, handle) = replay_with(&["--help"]);
    assert_eq!(status, 0);
    let texts = handle.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("dbglog-demo "));
    assert!(texts[0].contains("--print-settings"));
}

// ============================================================================
// Routing and Exit Codes
// ============================================================================

#[test]
fn run_routes_diagnostics_to_stderr() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = run(
        ["dbglog-demo", "--enable", "--level", "info", "--color", "never"],
        &mut stdout,
        &mut stderr,
    );
    assert_eq!(status, 0);

    let out = String::from_utf8(stdout).expect("utf-8");
    let err = String::from_utf8(stderr).expect("utf-8");
    assert!(out.contains("app started"));
    assert!(out.contains("#AppController > LOG"));
    assert!(!out.contains("Warning"));
    assert!(err.contains("#AppController > ERROR"));
    assert!(err.contains("#AppController > Warning"));
    assert!(!err.contains("\x1b["));
}

#[test]
fn run_colors_on_request() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    run(["dbglog-demo", "--color", "always"], &mut stdout, &mut stderr);
    assert!(String::from_utf8(stderr).expect("utf-8").contains("\x1b["));
}

#[test]
fn auto_color_is_plain_for_buffers() {
    assert_eq!(ColorMode::default(), ColorMode::Auto);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    run(["dbglog-demo"], &mut stdout, &mut stderr);
    assert!(!String::from_utf8(stdout).expect("utf-8").contains("\x1b["));
}

#[test]
fn usage_errors_exit_with_one() {
    for args in [
        &["dbglog-demo", "--bogus"][..],
        &["dbglog-demo", "--level", "loud"][..],
        &["dbglog-demo", "--category", "rs"][..],
        &["dbglog-demo", "--settings", "{"][..],
        &["dbglog-demo", "--color", "rainbow"][..],
    ] {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run(args.iter().copied(), &mut stdout, &mut stderr);
        assert_eq!(status, 1, "{args:?}");
        assert!(stdout.is_empty(), "{args:?}");
        assert!(String::from_utf8(stderr).expect("utf-8").contains("error"), "{args:?}");
    }
}

#[test]
fn exit_codes_are_clamped() {
    let debug = |code: std::process::ExitCode| format!("{code:?}");
    assert_eq!(debug(exit_code_from(0)), debug(std::process::ExitCode::SUCCESS));
    assert_eq!(debug(exit_code_from(1)), debug(std::process::ExitCode::from(1)));
    assert_eq!(debug(exit_code_from(-3)), debug(std::process::ExitCode::SUCCESS));
    assert_eq!(debug(exit_code_from(4_000)), debug(std::process::ExitCode::from(u8::MAX)));
}
