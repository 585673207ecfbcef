use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_caps-run");

/// A display nobody is listening on.
const NO_DISPLAY: &str = ":9999";

#[test]
fn unreachable_display_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");

    let output = Command::new(BIN)
        .args(["--display", NO_DISPLAY, "touch"])
        .arg(&marker)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(caps_run::FATAL_EXIT_CODE.into()));
    assert!(!marker.exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot open display :9999"), "{stderr}");
}

#[test]
fn missing_command_is_a_usage_error() {
    let output = Command::new(BIN).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(!output.stderr.is_empty());
}
