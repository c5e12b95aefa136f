use assert_cmd::Command;
use std::fs;

fn cmd() -> Command {
  Command::cargo_bin("sandbox-js").unwrap()
}

#[test]
fn runs_a_script_file() {
  let dir = tempfile::tempdir().unwrap();
  let script = dir.path().join("main.js");
  fs::write(&script, "console.log('sum', 1 + 2);\n").unwrap();

  cmd()
    .arg(&script)
    .env("HOME", dir.path())
    .assert()
    .success()
    .stdout("sum 3\n");
}

#[test]
fn prints_the_final_statement_value() {
  let dir = tempfile::tempdir().unwrap();
  let script = dir.path().join("expr.js");
  fs::write(&script, "let x = 40;\nx + 2\n").unwrap();

  cmd()
    .arg(&script)
    .env("HOME", dir.path())
    .assert()
    .success()
    .stdout("42\n");
}

#[test]
fn undefined_results_print_nothing() {
  let dir = tempfile::tempdir().unwrap();
  let script = dir.path().join("decl.js");
  fs::write(&script, "let x = 1;\n").unwrap();

  cmd()
    .arg(&script)
    .env("HOME", dir.path())
    .assert()
    .success()
    .stdout("");
}

#[test]
fn script_fault_exits_nonzero_with_diagnostic() {
  let dir = tempfile::tempdir().unwrap();
  let script = dir.path().join("bad.js");
  fs::write(&script, "let a = 1;\nmissingName;\n").unwrap();

  let assert = cmd().arg(&script).env("HOME", dir.path()).assert().failure();
  let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
  assert!(stderr.contains("ReferenceError"));
  assert!(stderr.contains("missingName"));
  assert!(stderr.contains("2 | missingName;"));
}

#[test]
fn missing_file_fails() {
  let dir = tempfile::tempdir().unwrap();
  cmd()
    .arg(dir.path().join("nope.js"))
    .env("HOME", dir.path())
    .assert()
    .failure();
}

#[test]
fn repl_evaluates_and_exits() {
  let dir = tempfile::tempdir().unwrap();
  let assert = cmd()
    .env("HOME", dir.path())
    .write_stdin("1 + 2\n.exit\n")
    .assert()
    .success();
  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  assert!(stdout.contains("3"));
}

#[test]
fn repl_state_persists_across_lines() {
  let dir = tempfile::tempdir().unwrap();
  let assert = cmd()
    .env("HOME", dir.path())
    .write_stdin("let x = 20\nfunction f(n) { return n + x }\nf(22)\n.exit\n")
    .assert()
    .success();
  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  assert!(stdout.contains("42"));
}

#[test]
fn repl_reports_errors_and_continues() {
  let dir = tempfile::tempdir().unwrap();
  let assert = cmd()
    .env("HOME", dir.path())
    .write_stdin("missing\n'still' + ' alive'\n.exit\n")
    .assert()
    .success();
  let output = assert.get_output();
  let stdout = String::from_utf8(output.stdout.clone()).unwrap();
  let stderr = String::from_utf8(output.stderr.clone()).unwrap();
  assert!(stderr.contains("ReferenceError"));
  assert!(stdout.contains("'still alive'"));
}

#[test]
fn repl_writes_history_dedup_adjacent() {
  let dir = tempfile::tempdir().unwrap();
  cmd()
    .env("HOME", dir.path())
    .write_stdin("1 + 1\n1 + 1\n2 + 2\n.exit\n")
    .assert()
    .success();

  let history_path = dir.path().join(".sandbox-js").join("history.json");
  let entries: Vec<String> =
    serde_json::from_str(&fs::read_to_string(&history_path).unwrap()).unwrap();
  assert_eq!(entries, ["1 + 1", "2 + 2"]);
}

#[test]
fn repl_appends_to_existing_history() {
  let dir = tempfile::tempdir().unwrap();
  let app_dir = dir.path().join(".sandbox-js");
  fs::create_dir_all(&app_dir).unwrap();
  fs::write(app_dir.join("history.json"), r#"["old"]"#).unwrap();

  cmd()
    .env("HOME", dir.path())
    .write_stdin("fresh\n.exit\n")
    .assert()
    .success();

  let entries: Vec<String> =
    serde_json::from_str(&fs::read_to_string(app_dir.join("history.json")).unwrap()).unwrap();
  assert_eq!(entries, ["old", "fresh"]);
}
