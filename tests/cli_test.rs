//! Integration tests for the command-line interface.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const VALID: &str = r#"
metadata:
  name: demo
  version: "1.0"
  description: Demo encoder
register_usage:
  - {name: rax, purpose: accumulator}
algorithms:
  - name: encode
    steps: [Load rax]
"#;

const UNDECLARED_REGISTER: &str = r#"
metadata: {name: demo, version: "1.0"}
register_usage:
  - {name: rax, purpose: accumulator}
algorithms:
  - name: encode
    implementation_requirements: [Copy rbx into rax]
"#;

const UNUSED_ERROR_TYPE: &str = r#"
metadata: {name: demo, version: "1.0"}
error_handling:
  error_types: [padding_error]
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn specforge(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("specforge"));
    cmd.current_dir(dir).env_remove("SPECFORGE_SETTINGS");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    specforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("forge"))
        .stdout(predicate::str::contains("check"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    specforge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn forge_prints_artifact_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", VALID);
    specforge(temp.path())
        .args(["forge", "spec.yml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== SPECIFICATION ===\nName: demo\nVersion: 1.0\nDescription: Demo encoder\n",
        ))
        .stdout(predicate::str::contains("=== CODE STYLE ==="));
    Ok(())
}

#[test]
fn forge_writes_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", VALID);
    specforge(temp.path())
        .args(["forge", "spec.yml", "-o", "artifact.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let artifact = fs::read_to_string(temp.path().join("artifact.txt"))?;
    assert!(artifact.contains("Register: rax"));
    Ok(())
}

#[test]
fn forge_is_byte_identical_across_runs() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", VALID);
    let first = specforge(temp.path()).args(["forge", "spec.yml"]).output()?;
    let second = specforge(temp.path()).args(["forge", "spec.yml"]).output()?;
    assert_eq!(first.stdout, second.stdout);
    assert!(!first.stdout.is_empty());
    Ok(())
}

#[test]
fn forge_refuses_document_with_errors() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", UNDECLARED_REGISTER);
    specforge(temp.path())
        .args(["forge", "spec.yml", "-o", "artifact.txt", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error[R1]"))
        .stderr(predicate::str::contains("rbx"));

    assert!(!temp.path().join("artifact.txt").exists());
    Ok(())
}

#[test]
fn forge_reports_missing_metadata() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", "register_usage: [rax]\n");
    specforge(temp.path())
        .args(["forge", "spec.yml"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("metadata"));
    Ok(())
}

#[test]
fn forge_renders_despite_warnings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", UNUSED_ERROR_TYPE);
    specforge(temp.path())
        .args(["forge", "spec.yml", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("padding_error:"))
        .stderr(predicate::str::contains("warning[R3]"));
    Ok(())
}

#[test]
fn forge_yaml_format_is_reloadable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", VALID);
    specforge(temp.path())
        .args(["forge", "spec.yml", "--format", "yaml", "-o", "canonical.yml"])
        .assert()
        .success();

    specforge(temp.path())
        .args(["check", "canonical.yml"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn forge_uses_border_marker_from_settings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", VALID);
    write(temp.path(), ".specforge.yml", "border_marker: \"###\"\n");
    specforge(temp.path())
        .args(["forge", "spec.yml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("### SPECIFICATION ###\n"));
    Ok(())
}

#[test]
fn explicit_settings_flag_wins() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", VALID);
    write(temp.path(), ".specforge.yml", "border_marker: \"###\"\n");
    write(temp.path(), "other.yml", "border_marker: \"---\"\n");
    specforge(temp.path())
        .args(["--settings", "other.yml", "forge", "spec.yml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--- SPECIFICATION ---\n"));
    Ok(())
}

#[test]
fn invalid_settings_fail() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", VALID);
    write(temp.path(), ".specforge.yml", "edge_case_similarity: 3\n");
    specforge(temp.path())
        .args(["forge", "spec.yml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("edge_case_similarity"));
    Ok(())
}

#[test]
fn check_passes_valid_documents() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "a.yml", VALID);
    write(temp.path(), "b.yml", VALID);
    specforge(temp.path())
        .args(["check", "a.yml", "b.yml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("2 document(s) valid"));
    Ok(())
}

#[test]
fn check_fails_batch_on_any_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "a.yml", VALID);
    write(temp.path(), "b.yml", UNDECLARED_REGISTER);
    specforge(temp.path())
        .args(["check", "a.yml", "b.yml", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error[R1]"))
        .stdout(predicate::str::contains("b.yml"));
    Ok(())
}

#[test]
fn check_strict_fails_on_warnings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "a.yml", UNUSED_ERROR_TYPE);
    specforge(temp.path())
        .args(["check", "a.yml"])
        .assert()
        .success();
    specforge(temp.path())
        .args(["check", "a.yml", "--strict"])
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn check_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "a.yml", UNDECLARED_REGISTER);
    let output = specforge(temp.path())
        .args(["check", "a.yml", "missing.yml", "--format", "json"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["valid"], false);
    assert_eq!(json["summary"]["documents"], 2);
    assert_eq!(json["summary"]["failures"], 1);
    assert_eq!(json["documents"][0]["diagnostics"][0]["rule_id"], "R1");
    assert_eq!(
        json["documents"][0]["diagnostics"][0]["kind"],
        "undeclared-register"
    );
    Ok(())
}

#[test]
fn check_sarif_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "a.yml", UNDECLARED_REGISTER);
    let output = specforge(temp.path())
        .args(["check", "a.yml", "--format", "sarif"])
        .output()?;

    let sarif: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(sarif["runs"][0]["tool"]["driver"]["name"], "specforge");
    assert_eq!(sarif["runs"][0]["results"][0]["ruleId"], "R1");
    Ok(())
}

#[test]
fn check_accepts_json_input() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(
        temp.path(),
        "spec.json",
        r#"{"metadata": {"name": "demo", "version": "1.0"}, "register_usage": ["rax"]}"#,
    );
    specforge(temp.path())
        .args(["check", "spec.json"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn check_demo_document() -> Result<(), Box<dyn std::error::Error>> {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/base64.specforge.yml");
    let temp = TempDir::new()?;
    specforge(temp.path())
        .arg("check")
        .arg(&demo)
        .arg("--strict")
        .assert()
        .success();
    Ok(())
}

#[test]
fn schema_prints_json_schema() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = specforge(temp.path()).arg("schema").output()?;
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(schema["$schema"], "http://json-schema.org/draft-07/schema#");
    assert!(schema["properties"]["metadata"].is_object());
    Ok(())
}

#[test]
fn debug_logs_go_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    write(temp.path(), "spec.yml", VALID);
    let output = specforge(temp.path())
        .args(["--debug", "forge", "spec.yml"])
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("=== SPECIFICATION ==="));
    assert!(String::from_utf8(output.stderr)?.contains("Validation finished"));
    Ok(())
}
