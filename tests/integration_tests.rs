//! Integration tests for the `reanalyze` CLI.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn reanalyze_cmd() -> Command {
    Command::cargo_bin("reanalyze").expect("binary built")
}

/// A translation unit with two functions: `helper` (changed) and `caller`
/// (unchanged, calls `helper`). `caller` should end up needing
/// reanalysis once the change propagates.
fn write_basic_tu(dir: &TempDir) -> std::path::PathBuf {
    let tu = serde_json::json!({
        "main_file": "a.cpp",
        "has_parse_error": false,
        "decls": [
            {
                "id": 1,
                "kind": "function",
                "name": "helper",
                "file": "a.cpp",
                "range": { "start_line": 1, "end_line": 3 },
                "is_definition": true,
                "has_external_linkage": true,
                "arity": 0,
                "body": []
            },
            {
                "id": 2,
                "kind": "function",
                "name": "caller",
                "file": "a.cpp",
                "range": { "start_line": 5, "end_line": 8 },
                "is_definition": true,
                "has_external_linkage": true,
                "arity": 0,
                "body": [
                    { "kind": "call", "callee": { "kind": "direct", "value": 1 } }
                ]
            }
        ]
    });
    let path = dir.path().join("tu.json");
    fs::write(&path, serde_json::to_string_pretty(&tu).unwrap()).unwrap();
    path
}

fn write_diff(dir: &TempDir) -> std::path::PathBuf {
    let diff = serde_json::json!({ "a.cpp": [[1, 3]] });
    let path = dir.path().join("diff.json");
    fs::write(&path, serde_json::to_string_pretty(&diff).unwrap()).unwrap();
    path
}

#[test]
fn reanalyze_list_includes_transitive_caller() {
    let dir = TempDir::new().unwrap();
    let tu_path = write_basic_tu(&dir);
    let diff_path = write_diff(&dir);

    reanalyze_cmd()
        .current_dir(dir.path())
        .arg("--diff")
        .arg(&diff_path)
        .arg(&tu_path)
        .assert()
        .success();

    let rf = fs::read_to_string(dir.path().join("a.cpp.rf")).expect(".rf file written");
    assert!(rf.contains("helper"));
    assert!(rf.contains("caller"));
}

#[test]
fn no_change_emits_only_empty_summary() {
    let dir = TempDir::new().unwrap();
    let tu_path = write_basic_tu(&dir);
    // diff document with no entry at all for a.cpp => no change
    let diff = serde_json::json!({});
    let diff_path = dir.path().join("diff.json");
    fs::write(&diff_path, serde_json::to_string(&diff).unwrap()).unwrap();

    reanalyze_cmd()
        .current_dir(dir.path())
        .arg("--diff")
        .arg(&diff_path)
        .arg(&tu_path)
        .assert()
        .success();

    assert!(!dir.path().join("a.cpp.rf").exists());
    let ics = fs::read_to_string(dir.path().join("a.cpp.ics")).unwrap();
    assert!(ics.trim().is_empty());
}

#[test]
fn new_file_summary_is_reported() {
    let dir = TempDir::new().unwrap();
    let tu_path = write_basic_tu(&dir);
    let diff = serde_json::json!({ "a.cpp": 1 });
    let diff_path = dir.path().join("diff.json");
    fs::write(&diff_path, serde_json::to_string(&diff).unwrap()).unwrap();

    reanalyze_cmd()
        .current_dir(dir.path())
        .arg("--diff")
        .arg(&diff_path)
        .arg(&tu_path)
        .assert()
        .success();

    let ics = fs::read_to_string(dir.path().join("a.cpp.ics")).unwrap();
    assert_eq!(ics.trim(), "new file");
}

#[test]
fn missing_positional_argument_is_a_usage_error() {
    reanalyze_cmd().assert().failure().code(1);
}

#[test]
fn unreadable_ast_document_is_skipped_without_failing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.json");

    reanalyze_cmd().current_dir(dir.path()).arg(&missing).assert().success();
}

#[test]
fn dump_cg_writes_call_graph_file() {
    let dir = TempDir::new().unwrap();
    let tu_path = write_basic_tu(&dir);
    let diff_path = write_diff(&dir);

    reanalyze_cmd()
        .current_dir(dir.path())
        .arg("--diff")
        .arg(&diff_path)
        .arg("--dump-cg")
        .arg(&tu_path)
        .assert()
        .success();

    let cg = fs::read_to_string(dir.path().join("a.cpp.cg")).expect(".cg file written");
    assert!(cg.contains("helper"));
    assert!(cg.contains("caller"));
}
