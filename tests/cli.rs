//! Running the `traffic-policy` binary against the sample route file.

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("routes.example.toml")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_traffic-policy"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run traffic-policy")
}

fn sample() -> String {
    sample_path().display().to_string()
}

#[test]
fn test_compile_prints_document() {
    let output = run(&["compile", &sample()]);
    assert!(output.status.success());

    let document: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["enabled"], true);
    assert_eq!(
        document["inbound"][0]["expressions"][0],
        "req.URL.matches('admin/')"
    );
}

#[test]
fn test_quoted_base_domain_override_is_rejected() {
    let output = run(&["compile", &sample(), "--base-domain", "it's.example"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Validation failed: base_domain contains a single quote"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_overrides_reach_the_document() {
    let output = run(&[
        "compile",
        &sample(),
        "--base-domain",
        "app.example.com",
        "--disabled",
    ]);
    assert!(output.status.success());

    let document: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["enabled"], false);
    assert_eq!(
        document["inbound"][0]["expressions"][0],
        "req.URL.matches('app.example.com/admin/')"
    );
}

#[test]
fn test_route_file_load_is_logged() {
    let output = run(&["--log-level", "info", "routes", &sample()]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Route file loaded"), "stderr was: {}", stderr);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("inbound[0] \"deny-admin\" req.URL.matches('admin/') -> deny"));
}

#[test]
fn test_unknown_log_level_is_rejected() {
    let output = run(&["--log-level", "loud", "compile", &sample()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("`loud` is not a log level"), "stderr was: {}", stderr);
}
