//! Integration tests for the per-thread default service and the `dbg_*!`
//! macros.
//!
//! Every test runs on its own thread, so each one installs a fresh capturing
//! service without affecting the others.

use logging::thread_local::{self, service_with_clock};
use logging::{
    ManualClock, SettingsPatch, Severity, dbg_dlog, dbg_error, dbg_info, dbg_log, dbg_log1, dbg_log2, dbg_rs,
    dbg_warn, dbg_yell,
};
use logging_sink::{CaptureHandle, CaptureSink, ConsoleMethod};

fn install_capture() -> CaptureHandle {
    let sink = CaptureSink::new();
    let handle = sink.handle();
    thread_local::install(service_with_clock(sink, ManualClock::new()));
    handle
}

fn enable_all() {
    thread_local::configure(SettingsPatch {
        enabled: Some(true),
        level: Some(Severity::Trace.into()),
        show_emitter_location: Some(false),
        ..SettingsPatch::default()
    });
}

// ============================================================================
// Macros
// ============================================================================

/// Verifies errors are written by a default-configured service.
#[test]
fn error_macro_writes_when_disabled() {
    let handle = install_capture();
    dbg_error!("#AppController > ERROR");
    dbg_warn!("hidden");

    let lines = handle.drain();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].method(), ConsoleMethod::Error);
    assert!(lines[0].text().starts_with("0.000  ERR  #AppController > ERROR \t\t\t"));
}

/// Verifies macros record the location of their invocation.
#[test]
fn macros_record_invocation_site() {
    let handle = install_capture();
    let line = line!() + 1;
    dbg_error!("where");

    let text = handle.texts().remove(0);
    assert!(text.contains("macros_thread_local.rs"), "{text}");
    assert!(text.contains(&format!(":{line}:")), "{text}");
}

/// Verifies every macro reaches its channel once enabled.
#[test]
fn every_macro_writes_when_enabled() {
    let handle = install_capture();
    enable_all();

    dbg_warn!("w");
    dbg_log!("#appRun started", 0);
    dbg_log1!("#appRun started", 1);
    dbg_log2!("#appRun started", 2);
    dbg_rs!("what?");
    dbg_dlog!("bound");

    assert_eq!(
        handle.texts(),
        [
            "0.000  wrn  w",
            "0.000  log  #appRun started  0",
            "0.000  log  #appRun started  1",
            "0.000  log  #appRun started  2",
            "0.000  log  #routes and states > what?",
            "0.000  log  #directive > bound",
        ]
    );
}

/// Verifies info and yell produce their multi-line layouts.
#[test]
fn info_and_yell_layouts() {
    let handle = install_capture();
    enable_all();

    dbg_info!("block");
    dbg_yell!("look");

    let lines = handle.drain();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].method(), ConsoleMethod::Info);
    assert!(lines[0].text().contains(" LOG"));
    assert!(lines[2].text().contains("ATTENTION HERE!"));
    assert!(lines[3].text().contains('^'));
}

/// Verifies a macro accepts structured and mixed arguments.
#[test]
fn macros_accept_mixed_arguments() {
    let handle = install_capture();
    enable_all();

    dbg_log!(serde_json::json!({"id": 1}), "user", true);
    assert_eq!(handle.texts(), [r#"0.000  log  {"id":1}  true  user"#]);
}

// ============================================================================
// Thread-Local Service
// ============================================================================

/// Verifies configure and snapshot act on this thread's service.
#[test]
fn configure_and_snapshot_round_trip() {
    install_capture();
    thread_local::configure(SettingsPatch {
        show_labels: Some(true),
        ..SettingsPatch::default()
    });

    let settings = thread_local::snapshot();
    assert!(settings.show_labels);
    assert!(!settings.enabled);
}

/// Verifies install returns the replaced service.
#[test]
fn install_returns_previous_service() {
    let first = install_capture();
    enable_all();
    let previous = thread_local::install(service_with_clock(CaptureSink::new(), ManualClock::new()));

    assert!(previous.settings().enabled);
    assert!(!thread_local::snapshot().enabled);
    dbg_warn!("not captured by the first sink");
    assert!(first.is_empty());
}

/// Verifies a macro used inside with_service is dropped instead of panicking.
#[test]
fn reentrant_macro_is_dropped() {
    let handle = install_capture();
    enable_all();
    thread_local::with_service(|service| {
        dbg_warn!("inside");
        service.warn(["outside"]);
    });

    let texts = handle.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("outside"));
}

/// Verifies other threads keep their own default service.
#[test]
fn services_are_per_thread() {
    install_capture();
    enable_all();

    let enabled_elsewhere = std::thread::spawn(|| thread_local::snapshot().enabled)
        .join()
        .expect("thread completes");
    assert!(!enabled_elsewhere);
}

/// Verifies init rebuilds the service from defaults before applying settings.
#[test]
fn init_resets_then_applies_settings() {
    let handle = install_capture();
    thread_local::configure(SettingsPatch {
        show_labels: Some(true),
        show_emitter_location: Some(false),
        categories: [("rs".to_owned(), false)].into_iter().collect(),
        ..SettingsPatch::default()
    });

    thread_local::init(&serde_json::json!({"enable": true, "debugLevel": "trace"}));

    let settings = thread_local::snapshot();
    assert!(settings.enabled);
    assert_eq!(settings.level, Severity::Trace);
    assert!(!settings.show_labels);
    assert!(settings.show_emitter_location);
    assert_eq!(settings.categories, logging::Settings::default().categories);
    assert!(handle.is_empty());
}
