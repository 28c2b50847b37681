//! Integration tests for the watcher public API.
//! Exercises script file matching and that watch() can be created for temp paths.

use scriptgrade::config::{is_script_file, DEFAULT_SCRIPT_PATTERNS};
use scriptgrade::watcher::ScriptWatcher;
use std::path::Path;

#[test]
fn script_file_accepts_script_suffixes() {
    assert!(is_script_file(Path::new("hook.script.md"), DEFAULT_SCRIPT_PATTERNS));
    assert!(is_script_file(Path::new("hook.script.txt"), DEFAULT_SCRIPT_PATTERNS));
    assert!(is_script_file(Path::new("hook.script"), DEFAULT_SCRIPT_PATTERNS));
    assert!(is_script_file(Path::new("week1/promo.script.md"), DEFAULT_SCRIPT_PATTERNS));
}

#[test]
fn script_file_rejects_other_files() {
    assert!(!is_script_file(Path::new("README.md"), DEFAULT_SCRIPT_PATTERNS));
    assert!(!is_script_file(Path::new("script.rs"), DEFAULT_SCRIPT_PATTERNS));
    assert!(!is_script_file(Path::new("notes.txt"), DEFAULT_SCRIPT_PATTERNS));
}

#[test]
fn script_file_rejects_node_modules() {
    assert!(!is_script_file(
        Path::new("node_modules/hook.script.md"),
        DEFAULT_SCRIPT_PATTERNS
    ));
    assert!(!is_script_file(
        Path::new("packages/a/node_modules/b.script.md"),
        DEFAULT_SCRIPT_PATTERNS
    ));
}

#[test]
fn watch_temp_dir_succeeds() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = ScriptWatcher::watch(dir.path(), DEFAULT_SCRIPT_PATTERNS);
    assert!(
        result.is_ok(),
        "watch on temp dir should succeed: {:?}",
        result.err()
    );
}

#[test]
fn watch_single_script_succeeds() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("hook.script.md");
    std::fs::write(&file, "**Hook:** Go.").unwrap();
    assert!(ScriptWatcher::watch(&file, &[".script.md"]).is_ok());
}
