//! Integration test: Verify binary prints correct version

use std::process::Command;

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_gitscope"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout.trim(), format!("gitscope {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_view_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_gitscope"))
        .args(["--view", "stats"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--view"), "{stderr}");
}
