//! CLI integration tests for bach-abi-cli
//!
//! Tests command parsing, output formatting, and config handling.

use std::path::Path;
use std::process::Command;

/// Helper to run the CLI with an isolated config file
fn run_with_config(config: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_bach-abi"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Helper to run the CLI against a config path that does not exist
fn run_abi(args: &[&str]) -> std::process::Output {
    let dir = tempfile::tempdir().unwrap();
    run_with_config(&dir.path().join("abi.toml"), args)
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Invalid JSON")
}

const DAVE: &str = "0x\
0000000000000000000000000000000000000000000000000000000000000045\
0000000000000000000000000000000000000000000000000000000000000040\
0000000000000000000000000000000000000000000000000000000000000004\
6461766500000000000000000000000000000000000000000000000000000000";

// ==================== Help & Version Tests ====================

#[test]
fn test_cli_help() {
    let output = run_abi(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("encode"));
    assert!(stdout.contains("decode"));
    assert!(stdout.contains("packed"));
    assert!(stdout.contains("signature"));
}

#[test]
fn test_cli_version() {
    let output = run_abi(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bach-abi"));
}

// ==================== Encode Tests ====================

#[test]
fn test_encode_uint_string() {
    let output = run_abi(&["encode", "--types", "uint256,string", r#"[69, "dave"]"#]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), DAVE);
}

#[test]
fn test_encode_json() {
    let output = run_abi(&["--json", "encode", "--types", "uint256[]", "[[1, 2, 3]]"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["length"], 32 * 5);
    assert!(json["encoded"].as_str().unwrap().starts_with("0x"));
}

#[test]
fn test_encode_from_abi_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let abi = dir.path().join("inputs.json");
    std::fs::write(
        &abi,
        r#"[{"name": "order", "type": "tuple", "components": [
            {"name": "id", "type": "uint256"},
            {"name": "memo", "type": "string"}
        ]}]"#,
    )
    .unwrap();

    let output = run_abi(&[
        "encode",
        "--abi-json",
        abi.to_str().unwrap(),
        r#"[{"id": 69, "memo": "dave"}]"#,
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Dynamic tuple: one offset word, then the tuple body
    assert!(stdout.trim().starts_with(
        "0x0000000000000000000000000000000000000000000000000000000000000020"
    ));
}

#[test]
fn test_encode_out_of_range() {
    let output = run_abi(&["encode", "--types", "uint8", "[256]"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Out of range"));
}

#[test]
fn test_encode_error_json() {
    let output = run_abi(&["--json", "encode", "--types", "uint8", "[256]"]);
    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("parameter 0"));
}

#[test]
fn test_encode_bad_type() {
    let output = run_abi(&["encode", "--types", "uint7", "[1]"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parse error"));
}

#[test]
fn test_encode_requires_types() {
    let output = run_abi(&["encode", "[1]"]);
    assert!(!output.status.success());
}

// ==================== Decode Tests ====================

#[test]
fn test_decode_json() {
    let output = run_abi(&["--json", "decode", "--types", "uint256,string", DAVE]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["types"], serde_json::json!(["uint256", "string"]));
    assert_eq!(json["values"], serde_json::json!([69, "dave"]));
}

#[test]
fn test_decode_text() {
    let output = run_abi(&["decode", "--types", "uint256,string", DAVE]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[0] uint256 = 69"));
    assert!(stdout.contains("[1] string = \"dave\""));
}

#[test]
fn test_decode_truncated() {
    let output = run_abi(&["decode", "--types", "uint256,string", &DAVE[..DAVE.len() - 64]]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed input"));
}

#[test]
fn test_decode_invalid_hex() {
    let output = run_abi(&["decode", "--types", "uint256", "0xnothex"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid hex"));
}

// ==================== Packed & Signature Tests ====================

#[test]
fn test_packed() {
    let output = run_abi(&["packed", "--types", "uint8,string", r#"[1, "ab"]"#]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "0x016162");
}

#[test]
fn test_packed_rejects_tuple() {
    let output = run_abi(&["packed", "--types", "(uint8,bool)", "[[1, true]]"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported operation"));
}

#[test]
fn test_signature() {
    let output = run_abi(&["signature", "baz", "--types", "uint32, bool"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "baz(uint32,bool)");
}

#[test]
fn test_signature_tuple_json() {
    let output = run_abi(&["--json", "signature", "f", "--types", "(uint256,bytes)[],address"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["signature"], "f((uint256,bytes)[],address)");
}

// ==================== Config Tests ====================

#[test]
fn test_config_show_defaults() {
    let output = run_abi(&["--json", "config", "--show"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["json_output"], false);
    assert_eq!(json["log_filter"], "warn");
    assert_eq!(json["hex_prefix"], true);
}

#[test]
fn test_config_set_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("abi.toml");

    let output = run_with_config(&path, &["config", "--set-json", "true", "--set-log-filter", "debug"]);
    assert!(output.status.success());
    assert!(path.exists());

    // json_output now applies without --json
    let output = run_with_config(&path, &["config", "--show"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["json_output"], true);
    assert_eq!(json["log_filter"], "debug");
}

#[test]
fn test_config_hex_prefix_off() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abi.toml");
    std::fs::write(&path, "hex_prefix = false\n").unwrap();

    let output = run_with_config(&path, &["packed", "--types", "uint8", "[1]"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "01");
}

#[test]
fn test_config_unparsable_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abi.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();

    let output = run_with_config(&path, &["signature", "g", "--types", ""]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "g()");
}
