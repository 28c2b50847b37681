//! CLI behavior tests: exit codes, output formats, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const EASY: &str = "**Hook:** Wow!\n**Bridge:** So then.\n**Nugget:** Do this now.\n**WTA:** Try it.\n";
const HARD: &str = "**Hook:** Comprehensive organizational infrastructure modernization necessitates considerable interdepartmental collaboration.\n";

fn scriptgrade_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scriptgrade"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Temp project with a .git marker so cache and history stay inside it
fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

fn script(dir: &TempDir, name: &str) -> std::path::PathBuf {
    dir.path().join(name)
}

#[test]
fn no_args_returns_error_not_panic() {
    scriptgrade_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PATH").or(predicate::str::contains("path")));
}

#[test]
fn easy_script_exit_0() {
    let dir = project(&[("hook.script.md", EASY)]);
    scriptgrade_cmd()
        .arg(script(&dir, "hook.script.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Hook"))
        .stdout(predicate::str::contains("1.0"));
}

#[test]
fn hard_script_without_max_grade_exit_0() {
    let dir = project(&[("hard.script.md", HARD)]);
    scriptgrade_cmd()
        .arg(script(&dir, "hard.script.md"))
        .assert()
        .success();
}

#[test]
fn above_max_grade_exit_1() {
    let dir = project(&[("hard.script.md", HARD)]);
    scriptgrade_cmd()
        .arg(script(&dir, "hard.script.md"))
        .arg("--max-grade")
        .arg("3.5")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("above maximum"));
}

#[test]
fn max_grade_at_exact_average_passes() {
    let dir = project(&[("hard.script.md", HARD)]);
    scriptgrade_cmd()
        .arg(script(&dir, "hard.script.md"))
        .arg("--max-grade")
        .arg("12")
        .assert()
        .success();
}

#[test]
fn config_max_grade_is_used() {
    let dir = project(&[
        ("hard.script.md", HARD),
        (".scriptgraderc.json", r#"{ "maxGrade": 3.5 }"#),
    ]);
    scriptgrade_cmd()
        .arg(script(&dir, "hard.script.md"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn config_override_relaxes_max_grade() {
    let dir = project(&[
        ("longform/hard.script.md", HARD),
        (
            ".scriptgraderc.json",
            r#"{ "maxGrade": 3.5, "overrides": [ { "files": ["**/longform/**"], "maxGrade": 12 } ] }"#,
        ),
    ]);
    scriptgrade_cmd().arg(dir.path()).assert().success();
}

#[test]
fn json_output_valid() {
    let dir = project(&[("hook.script.md", EASY)]);
    let output = scriptgrade_cmd()
        .arg(script(&dir, "hook.script.md"))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(parsed["averageGradeLevel"], "1.0");
    assert_eq!(parsed["passesThirdGradeTest"], true);
    assert_eq!(parsed["components"].as_array().unwrap().len(), 4);
    assert_eq!(parsed["components"][0]["heading"], "Hook");
    assert!(parsed.get("filePath").is_some());
}

#[test]
fn json_directory_has_summary() {
    let dir = project(&[("a.script.md", EASY), ("b.script.md", HARD)]);
    let output = scriptgrade_cmd().arg(dir.path()).arg("--json").output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["summary"]["filesAnalyzed"], 2);
    assert_eq!(parsed["summary"]["passingFiles"], 1);
    assert_eq!(parsed["summary"]["averageGradeLevel"], "6.5");
}

#[test]
fn stdin_dash_reads_script() {
    scriptgrade_cmd()
        .arg("-")
        .arg("--json")
        .write_stdin("**Hook:** Go. **WTA:** Try it.")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"filePath\": \"-\""))
        .stdout(predicate::str::contains("\"averageGradeLevel\": \"1.0\""));
}

#[test]
fn stdin_above_max_grade_exit_1() {
    scriptgrade_cmd()
        .arg("-")
        .arg("--max-grade")
        .arg("3.5")
        .arg("--quiet")
        .write_stdin(HARD)
        .assert()
        .failure()
        .code(1);
}

#[test]
fn quiet_prints_one_line_per_script() {
    let dir = project(&[("a.script.md", EASY), ("b.script.md", HARD)]);
    let output = scriptgrade_cmd().arg(dir.path()).arg("--quiet").output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = s.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("a.script.md") && lines[0].contains("PASS"));
    assert!(lines[1].contains("b.script.md") && lines[1].contains("FAIL"));
}

#[test]
fn quiet_second_run_shows_history_delta() {
    let dir = project(&[("a.script.md", EASY)]);
    scriptgrade_cmd().arg(dir.path()).arg("--quiet").assert().success();
    scriptgrade_cmd()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged at 1.0"));
    assert!(dir.path().join(".scriptgrade-history.json").exists());
}

#[test]
fn cache_written_and_skippable() {
    let dir = project(&[("a.script.md", EASY)]);
    scriptgrade_cmd().arg(dir.path()).assert().success();
    assert!(dir.path().join(".scriptgrade-cache.json").exists());

    let fresh = project(&[("a.script.md", EASY)]);
    scriptgrade_cmd().arg(fresh.path()).arg("--no-cache").assert().success();
    assert!(!fresh.path().join(".scriptgrade-cache.json").exists());
}

#[test]
fn file_not_found_exit_2() {
    scriptgrade_cmd()
        .arg("nonexistent.script.md")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nonexistent"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = project(&[("notes.md", "not a script")]);
    scriptgrade_cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No script files found"));
}

#[test]
fn ignored_directories_are_skipped() {
    let dir = project(&[
        ("a.script.md", EASY),
        ("drafts/b.script.md", HARD),
        (".scriptgraderc.json", r#"{ "maxGrade": 3.5, "ignore": ["**/drafts/**"] }"#),
    ]);
    scriptgrade_cmd().arg(dir.path()).assert().success();
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join(".scriptgraderc.json");
    scriptgrade_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();
    assert!(config_path.exists(), ".scriptgraderc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["maxGrade"], 3.5);
}

#[test]
fn init_with_max_grade_option() {
    let dir = TempDir::new().unwrap();
    scriptgrade_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .arg("--max-grade")
        .arg("5")
        .assert()
        .success();
    let content = fs::read_to_string(dir.path().join(".scriptgraderc.json")).unwrap();
    assert!(content.contains("\"maxGrade\": 5.0"));
}

#[test]
fn init_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join(".scriptgraderc.json");
    fs::write(&config_path, r#"{ "maxGrade": 9 }"#).unwrap();
    scriptgrade_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(Path::new(&config_path)).unwrap(),
        r#"{ "maxGrade": 9 }"#
    );
}

#[test]
fn verbose_shows_recommendations() {
    let dir = project(&[("hard.script.md", HARD)]);
    scriptgrade_cmd()
        .arg(script(&dir, "hard.script.md"))
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("→"));
}
