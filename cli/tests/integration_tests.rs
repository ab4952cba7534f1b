use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argv-schema"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("COLUMNS")
        .output()
        .expect("failed to run argv-schema")
}

fn editor() -> String {
    fixture("editor.yml").to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_json_result() {
    let schema = editor();
    let output = run(&[
        "parse", "--schema", &schema, "--", "-w", "--locale", "de", "file.txt",
    ]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["wait"], true);
    assert_eq!(value["locale"], "de");
    assert_eq!(value["_"], serde_json::json!(["file.txt"]));
}

#[test]
fn parse_nests_subcommand_result() {
    let schema = editor();
    let output = run(&[
        "parse", "--schema", &schema, "--", "--verbose", "tunnel", "--name", "box",
    ]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["_"], serde_json::json!([]));
    assert_eq!(value["tunnel"]["verbose"], true);
    assert_eq!(value["tunnel"]["name"], "box");
}

#[test]
fn parse_reports_diagnostics_on_stderr() {
    let schema = editor();
    let output = run(&[
        "parse", "--schema", &schema, "--", "--out", "/tmp/a", "--bogus",
    ]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Option 'out' is deprecated: Use output instead."));
    assert!(stderr.contains("Warning: 'bogus' is not in the list of known options."));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["output"], "/tmp/a");
}

#[test]
fn parse_passthrough_subcommand_hides_unknown_options() {
    let schema = editor();
    let output = run(&["parse", "--schema", &schema, "--strict", "--", "tunnel", "--x"]);

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("'x'"));
}

#[test]
fn parse_strict_exits_with_status_two() {
    let schema = editor();
    let output = run(&["parse", "--schema", &schema, "--strict", "--", "--bogus"]);

    assert_eq!(output.status.code(), Some(2));
    // The result is still printed.
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["_"], serde_json::json!([]));
}

#[test]
fn parse_text_format() {
    let schema = editor();
    let output = run(&[
        "parse", "--schema", &schema, "--format", "text", "--", "-d", "a", "-d", "b",
    ]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "diff = [\"a\", \"b\"]\n"
    );
}

#[test]
fn parse_missing_schema_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yml");
    let output = run(&["parse", "--schema", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: Failed to load"));
}

// ---------------------------------------------------------------------------
// help / version
// ---------------------------------------------------------------------------

#[test]
fn help_renders_categories_and_subcommands() {
    let schema = editor();
    let output = run(&["help", "--schema", &schema, "--no-pipe", "--columns", "80"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Editor 1.2.3\n\nUsage: edit [options] [paths...]\n\nOptions\n"));
    assert!(stdout.contains("  -d --diff <file> <file> Compare two files with each other.\n"));
    assert!(stdout.contains("\nTroubleshooting\n  --verbose    Print verbose output (implies --wait).\n"));
    assert!(stdout.contains("\nSubcommands\n  tunnel       "));
    assert!(!stdout.contains("--output"));
}

#[test]
fn help_respects_columns_env() {
    let schema = editor();
    let output = Command::new(env!("CARGO_BIN_EXE_argv-schema"))
        .args(["help", "--schema", schema.as_str(), "--no-pipe"])
        .env("COLUMNS", "40")
        .output()
        .expect("failed to run argv-schema");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  -d --diff <file> <file>\n      Compare two files with each other.\n"));
}

#[test]
fn help_chat_synopsis() {
    let schema = editor();
    let output = run(&["help", "--schema", &schema, "--chat"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: edit chat [options] [prompt]\n"));
    assert!(stdout.contains("edit chat <prompt> -')"));
}

#[test]
fn version_prints_three_lines() {
    let schema = editor();
    let output = run(&["version", "--schema", &schema]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "1.2.3");
    assert_eq!(lines[1], "abc123");
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_valid_documents() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("editor.json");
    fs::write(
        &json,
        r#"{
  "product_name": "Editor",
  "executable_name": "edit",
  "options": [ { "type": "boolean", "id": "wait", "alias": "w" } ]
}"#,
    )
    .unwrap();

    let output = run(&["validate", &editor(), json.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Validated 2 schema file(s).\n"
    );
}

#[test]
fn validate_reports_each_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.yml");
    fs::write(
        &bad,
        r#"
product_name: Broken
executable_name: broken
options:
  - { type: boolean, id: sandbox }
  - { type: boolean, id: no-sandbox, alias: sandbox }
  - { type: string, id: output, deprecates: [sandbox] }
"#,
    )
    .unwrap();

    let output = run(&["validate", &editor(), bad.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("alias 'sandbox' of option no-sandbox collides with a declared option id"));
    assert!(stderr.contains("deprecated id 'sandbox' of option output is declared in the same scope"));
    assert!(stderr.contains("error: 1 of 2 schema file(s) failed validation"));
}
