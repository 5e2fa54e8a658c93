//! CLI integration tests for gasvote
//!
//! Tests command parsing, output formatting, and config handling.

use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Helper to run the CLI with an isolated home directory
fn run_gasvote(home: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_gasvote"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Class floors with individual overrides, as TOML
fn schedule_toml(overrides: &[(&str, u64)]) -> String {
    let mut values = vec![
        ("quick_step", 2u64),
        ("fastest_step", 3),
        ("fast_step", 5),
        ("mid_step", 8),
        ("slow_step", 10),
        ("ext_step", 20),
        ("sload", 500),
        ("sstore", 500),
        ("sha3", 30),
        ("create", 500),
        ("call", 500),
        ("jumpdest", 10),
        ("suicide", 0),
        ("balance", 20),
        ("extcodesize", 20),
        ("extcodecopy", 20),
    ];
    for (name, value) in overrides {
        if let Some(entry) = values.iter_mut().find(|(n, _)| n == name) {
            entry.1 = *value;
        }
    }
    values
        .iter()
        .map(|(name, value)| format!("{} = {}\n", name, value))
        .collect()
}

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ==================== Help & Version Tests ====================

#[test]
fn test_cli_help() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("gasvote"));
    assert!(out.contains("table"));
    assert!(out.contains("vote"));
    assert!(out.contains("words"));
    assert!(out.contains("check"));
}

#[test]
fn test_cli_version() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("gasvote"));
}

#[test]
fn test_cli_vote_help() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["vote", "--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("check"));
    assert!(out.contains("bounds"));
    assert!(out.contains("apply"));
}

// ==================== Words Tests ====================

#[test]
fn test_words() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["words", "33"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("33 bytes = 2 words"));
}

#[test]
fn test_words_json_hex() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["--json", "words", "0x40"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["bytes"], "64");
    assert_eq!(json["words"], "2");
}

#[test]
fn test_words_invalid() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["words", "lots"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error:"));

    let output = run_gasvote(home.path(), &["words", "_"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid number"));
}

// ==================== Table Tests ====================

#[test]
fn test_table_genesis() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["table"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("ADD"));
    assert!(out.contains("SLOAD"));
    assert!(out.contains("opcodes"));
}

#[test]
fn test_table_json_with_schedule() {
    let home = tempfile::tempdir().unwrap();
    let schedule = write_file(
        home.path(),
        "schedule.toml",
        &schedule_toml(&[("fastest_step", 6)]),
    );
    let output = run_gasvote(
        home.path(),
        &["--json", "table", "--schedule", schedule.to_str().unwrap()],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let add = json["opcodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["opcode"] == "ADD")
        .unwrap();
    assert_eq!(add["base_gas"], "6");
    assert_eq!(add["stack_pop"], 2);
    assert_eq!(add["stack_push"], 1);
}

// ==================== Check Tests ====================

#[test]
fn test_check_ok() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["--json", "check", "ADD", "--depth", "2"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["covered"], true);
    assert_eq!(json["charged"], "3");
    assert_eq!(json["depth_after"], 1);
}

#[test]
fn test_check_underflow() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["check", "ADD", "--depth", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("stack underflow: required 2, actual 1"));
}

#[test]
fn test_check_overflow_json() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["--json", "check", "PUSH1", "--depth", "1024"]);
    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("stack limit reached"));
}

#[test]
fn test_check_uncovered_opcode() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["--json", "check", "0xfe"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["covered"], false);
    assert_eq!(json["charged"], "0");
}

#[test]
fn test_check_invalid_opcode() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["check", "NOPE"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid opcode"));
}

// ==================== Vote Tests ====================

#[test]
fn test_vote_check_valid() {
    let home = tempfile::tempdir().unwrap();
    let proposed = write_file(
        home.path(),
        "proposed.toml",
        &schedule_toml(&[("fastest_step", 6)]),
    );
    let output = run_gasvote(
        home.path(),
        &["vote", "check", "--proposed", proposed.to_str().unwrap()],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("vote is valid, 1 classes changed"));
}

#[test]
fn test_vote_check_too_high() {
    let home = tempfile::tempdir().unwrap();
    let proposed = write_file(
        home.path(),
        "proposed.toml",
        &schedule_toml(&[("fastest_step", 7)]),
    );
    let output = run_gasvote(
        home.path(),
        &["vote", "check", "--proposed", proposed.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("gas vote too high for fastest_step: 7 > 6"));
}

#[test]
fn test_vote_check_below_half_of_active() {
    let home = tempfile::tempdir().unwrap();
    let active = write_file(home.path(), "active.toml", &schedule_toml(&[("sload", 2000)]));
    let proposed = write_file(home.path(), "proposed.toml", &schedule_toml(&[("sload", 999)]));
    let output = run_gasvote(
        home.path(),
        &[
            "vote",
            "check",
            "--proposed",
            proposed.to_str().unwrap(),
            "--active",
            active.to_str().unwrap(),
        ],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("gas vote too low for sload: 999 < 1000"));
}

#[test]
fn test_active_below_floor_rejected_by_check_and_apply() {
    let home = tempfile::tempdir().unwrap();
    let active = write_file(home.path(), "active.toml", &schedule_toml(&[("sload", 400)]));
    let proposed = write_file(home.path(), "proposed.toml", &schedule_toml(&[]));
    let active = active.to_str().unwrap();
    let proposed = proposed.to_str().unwrap();

    let check = run_gasvote(
        home.path(),
        &["vote", "check", "--proposed", proposed, "--active", active],
    );
    let apply = run_gasvote(
        home.path(),
        &[
            "vote", "apply", "--proposed", proposed, "--active", active, "--height", "64",
        ],
    );

    for output in [&check, &apply] {
        assert!(!output.status.success());
        let err = stderr(output);
        assert!(err.contains("active schedule"));
        assert!(err.contains("sload = 400 is below its floor 500"));
        assert!(!err.contains("invalid config"));
    }
}

#[test]
fn test_vote_bounds_json() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["--json", "vote", "bounds"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let bounds = json["bounds"].as_array().unwrap();
    assert_eq!(bounds.len(), 16);
    let sload = bounds.iter().find(|b| b["class"] == "sload").unwrap();
    assert_eq!(sload["min"], "500");
    assert_eq!(sload["max"], "1000");
    assert_eq!(sload["min_bound"], "floor");
}

#[test]
fn test_vote_apply_at_boundary() {
    let home = tempfile::tempdir().unwrap();
    let proposed = write_file(
        home.path(),
        "proposed.toml",
        &schedule_toml(&[("sstore", 1000)]),
    );
    let output = run_gasvote(
        home.path(),
        &[
            "--json",
            "vote",
            "apply",
            "--proposed",
            proposed.to_str().unwrap(),
            "--height",
            "64",
        ],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["epoch"], 1);
    assert_eq!(json["changes"][0]["class"], "sstore");
    assert_eq!(json["changes"][0]["new"], "1000");
}

#[test]
fn test_vote_apply_off_boundary() {
    let home = tempfile::tempdir().unwrap();
    let proposed = write_file(home.path(), "proposed.toml", &schedule_toml(&[]));
    let output = run_gasvote(
        home.path(),
        &[
            "vote",
            "apply",
            "--proposed",
            proposed.to_str().unwrap(),
            "--height",
            "65",
        ],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not an epoch boundary"));
}

// ==================== Config Tests ====================

#[test]
fn test_config_from_home() {
    let home = tempfile::tempdir().unwrap();
    std::fs::create_dir(home.path().join(".gasvote")).unwrap();
    write_file(
        &home.path().join(".gasvote"),
        "config.toml",
        "[protocol]\nepoch_length = 16\n",
    );

    let output = run_gasvote(home.path(), &["--json", "config"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["epoch_length"], 16);
    assert_eq!(json["stack_limit"], 1024);
}

#[test]
fn test_config_epoch_length_applies_to_votes() {
    let home = tempfile::tempdir().unwrap();
    let config = write_file(home.path(), "custom.toml", "[protocol]\nepoch_length = 16\n");
    let proposed = write_file(home.path(), "proposed.toml", &schedule_toml(&[]));
    let output = run_gasvote(
        home.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "--json",
            "vote",
            "apply",
            "--proposed",
            proposed.to_str().unwrap(),
            "--height",
            "32",
        ],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["epoch"], 2);
}

#[test]
fn test_config_missing_file() {
    let home = tempfile::tempdir().unwrap();
    let output = run_gasvote(home.path(), &["--config", "/nonexistent/gasvote.toml", "words", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Config error"));
}
