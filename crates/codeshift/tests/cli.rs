//! End-to-end tests for the codeshift binary.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

fn codeshift(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("codeshift").unwrap();
    cmd.current_dir(root).env_remove("CODESHIFT_LOG").env("NO_COLOR", "1");
    cmd
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn test_convert_detects_source_language() {
    let dir = TempDir::new().unwrap();
    write(&dir, "add.py", "def add(a, b):\n    return a + b\n");
    let output = codeshift(dir.path())
        .args(["convert", "add.py", "--to", "javascript"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "function add(a, b) {\n  return a + b;\n}\n");
    assert!(stderr(&output).contains("Converted python to javascript"));
}

#[test]
fn test_convert_from_stdin() {
    let dir = TempDir::new().unwrap();
    let output = codeshift(dir.path())
        .args(["convert", "-", "--from", "py", "--to", "go"])
        .write_stdin("def add(a, b):\n    return a + b\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("func add("));

    let output = codeshift(dir.path())
        .args(["convert", "-", "--to", "go"])
        .write_stdin("x = 1\n")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--from is required when reading from stdin"));
}

#[test]
fn test_convert_rejects_empty_input() {
    let dir = TempDir::new().unwrap();
    write(&dir, "empty.py", "");
    let output = codeshift(dir.path())
        .args(["--json", "convert", "empty.py", "--to", "rust"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "invalid input: source code is empty");
}

#[test]
fn test_convert_unsupported_target() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.py", "x = 1\n");
    let output = codeshift(dir.path())
        .args(["convert", "a.py", "--to", "cobol"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unsupported language: \"cobol\""));
}

#[test]
fn test_analyze_exit_status() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bad.py", "print(\"hi\n");
    write(&dir, "ok.py", "x = 1\n");

    let output = codeshift(dir.path()).args(["analyze", "bad.py"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("line 1: error: Unterminated string literal"));

    let output = codeshift(dir.path()).args(["analyze", "ok.py"]).output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("No issues found"));
}

#[test]
fn test_analyze_many_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bad.py", "print(\"hi\n");
    write(&dir, "ok.go", "x := 1\n");
    let output = codeshift(dir.path())
        .args(["--json", "analyze", "bad.py", "ok.go"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["path"], "bad.py");
    assert_eq!(files[0]["errors"].as_array().unwrap().len(), 1);
    assert_eq!(files[1]["errors"].as_array().unwrap().len(), 0);
}

#[test]
fn test_fix_writes_output_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "broken.py", "print(\"hi");
    let output = codeshift(dir.path())
        .args(["fix", "broken.py", "-o", "fixed.py"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    let fixed = std::fs::read_to_string(dir.path().join("fixed.py")).unwrap();
    assert_eq!(fixed, "print(\"hi\")");
    assert_eq!(
        stdout(&output).trim_end(),
        "line 1: Closed unterminated string and added ')' on line 1"
    );
}

#[test]
fn test_metrics_json() {
    let dir = TempDir::new().unwrap();
    write(&dir, "m.rs", "// entry\nfn main() {\n    let x = 1;\n}\n");
    let output = codeshift(dir.path())
        .args(["--json", "metrics", "m.rs"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["lines_of_code"], 3);
    assert_eq!(json["functions"], 1);
    assert_eq!(json["comment_lines"], 1);
    assert_eq!(json["readability"], "Excellent");
}

#[test]
fn test_config_thresholds() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join(".codeshift")).unwrap();
    write(
        &dir,
        ".codeshift/config.toml",
        "[readability]\nline_length = 2.0\ncomment_ratio = 0.9\nnesting_depth = 0.0\n",
    );
    write(&dir, "m.rs", "// entry\nfn main() {\n    let x = 1;\n}\n");
    let output = codeshift(dir.path())
        .args(["--json", "metrics", "m.rs"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["readability"], "Poor");
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join(".codeshift")).unwrap();
    write(&dir, ".codeshift/config.toml", "[readability\n");
    write(&dir, "a.py", "x = 1\n");
    let output = codeshift(dir.path()).args(["metrics", "a.py"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: invalid config"));
}

#[test]
fn test_languages() {
    let dir = TempDir::new().unwrap();
    let output = codeshift(dir.path()).arg("languages").output().unwrap();
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 6);
    assert!(text.lines().any(|l| l.starts_with("rust ")));
}

#[test]
fn test_schema_flag() {
    let dir = TempDir::new().unwrap();
    let output = codeshift(dir.path()).arg("--schema").output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["config_path"], ".codeshift/config.toml");
    assert_eq!(json["format"], "toml");
    assert!(json["schema"]["properties"]["readability"].is_object());
}
