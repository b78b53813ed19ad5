use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn run_formcheck(args: &[&str], stdin: Option<&str>, config_home: &Path) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_formcheck"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn formcheck");

    if let Some(input) = stdin {
        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(input.as_bytes())
            .expect("write stdin");
    }

    child.wait_with_output().expect("wait for formcheck")
}

#[test]
fn cli_reports_invalid_form() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = dir.path().join("state.json");
    std::fs::write(&state, r#"{"name": "bob", "age": 15, "email": "bob@ross.art"}"#)
        .expect("write state");

    let output = run_formcheck(
        &["--schema", "person", state.to_str().expect("utf8 path")],
        None,
        dir.path(),
    );

    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "person: 2 invalid field(s)\n  name: Cannot be bob.\n  age: Must be 18.\n"
    );
}

#[test]
fn cli_json_report_from_stdin() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = run_formcheck(
        &["--schema", "person", "--format", "json", "-"],
        Some(r#"{"name": "jack", "age": 30, "email": "jack@example.com"}"#),
        dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["schema"], "person");
    assert_eq!(report["valid"], true);
}

#[test]
fn cli_validates_field_subset_from_schema_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let schema = dir.path().join("signup.form.toml");
    std::fs::write(
        &schema,
        r#"
name = "signup"

[fields]
user = [{ kind = "required", message = "User is required." }]
terms = [{ kind = "equals", value = true, message = "Terms must be accepted." }]
"#,
    )
    .expect("write schema");

    let output = run_formcheck(
        &[
            "--schema",
            schema.to_str().expect("utf8 path"),
            "--field",
            "user",
            "-",
        ],
        Some(r#"{"user": "al", "terms": false}"#),
        dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "signup: valid\n");
}

#[test]
fn cli_rejects_unknown_schema() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = run_formcheck(&["--schema", "nope", "-"], None, dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown schema 'nope'"), "stderr: {}", stderr);
}
