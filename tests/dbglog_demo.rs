//! End-to-end tests for the `dbglog-demo` executable.

use assert_cmd::Command;
use predicates::prelude::*;

fn demo() -> Command {
    Command::cargo_bin("dbglog-demo").expect("binary is built")
}

// ============================================================================
// Help and Usage
// ============================================================================

/// Verifies --help writes usage to stdout and nothing to stderr.
#[test]
fn help_lists_usage() {
    demo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: dbglog-demo"))
        .stdout(predicate::str::contains("--category NAME=on|off"))
        .stderr(predicate::str::is_empty());
}

/// Verifies unknown switches fail with status 1.
#[test]
fn unknown_switch_is_rejected() {
    demo()
        .arg("--definitely-not-a-flag")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--definitely-not-a-flag"));
}

/// Verifies an unresolvable level fails with status 1.
#[test]
fn unknown_level_is_rejected() {
    demo()
        .args(["--level", "verbose"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognised level 'verbose'"));
}

// ============================================================================
// Replay
// ============================================================================

/// Verifies a run without switches prints the banner and the error only.
#[test]
fn default_run_prints_banner_and_error() {
    demo()
        .args(["--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.000  log  app started"))
        .stdout(predicate::str::contains("#appRun").not())
        .stderr(predicate::str::contains("ERR  #AppController > ERROR"))
        .stderr(predicate::str::contains("Warning").not());
}

/// Verifies the host application's settings produce its console output.
#[test]
fn host_settings_replay() {
    demo()
        .args([
            "--settings",
            r#"{"enable": true, "debugLevel": "info", "emitters": false, "labels": true}"#,
            "--color",
            "never",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("log  #appRun started 0"))
        .stdout(predicate::str::contains("#appRun started 1").not())
        .stdout(predicate::str::contains("#AppController > LOG"))
        .stderr(predicate::str::contains("wrn  #AppController > Warning\n"));
}

/// Verifies --yell adds the attention block once enabled.
#[test]
fn yell_prints_attention_block() {
    demo()
        .args(["--enable", "--yell", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ATTENTION HERE!"))
        .stdout(predicate::str::contains("#AppController > yell"));
}

/// Verifies --print-settings writes the merged settings as JSON.
#[test]
fn print_settings_emits_json() {
    let output = demo()
        .args(["--enable", "--level", "2", "--category", "rs=off", "--print-settings"])
        .output()
        .expect("binary runs");
    assert!(output.status.success());

    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(settings["enabled"], true);
    assert_eq!(settings["level"], "info");
    assert_eq!(settings["categories"]["rs"], false);
    assert_eq!(settings["categories"]["directives"], true);
}

/// Verifies --color always paints badges even when piped.
#[test]
fn forced_color_writes_ansi() {
    demo()
        .args(["--color", "always"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\u{1b}["));
}
