//! Tests for outline files

use std::fs;

use tempfile::TempDir;

use treenum::application::RenumberEngine;
use treenum::domain::{LevelPolicy, NumberingStyle, ScopeId};
use treenum::infrastructure::outline::{load_outline, render_outline, write_outline};
use treenum::infrastructure::{InfraError, MemoryTree, TreeAdapter};

#[test]
fn given_outline_file_when_renumbered_and_written_then_file_has_labels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("backlog.outline");
    fs::write(
        &path,
        "# sprint backlog\nLogin\n  Form | 4\n  Validation\nReports\n",
    )
    .unwrap();
    let mut tree = MemoryTree::new(ScopeId(1), "Backlog");

    let count = load_outline(&path, &tree, "Rank").unwrap();
    let field = tree.resolve_field("Rank").unwrap();
    RenumberEngine::new(LevelPolicy::all(), NumberingStyle::Hierarchical)
        .renumber(&mut tree, &field)
        .unwrap();
    write_outline(&path, &tree, "Rank").unwrap();

    assert_eq!(count, 4);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Login | 1\n  Form | 1.1\n  Validation | 1.2\nReports | 2\n"
    );
}

#[test]
fn given_missing_file_when_loading_then_io_error() {
    let dir = TempDir::new().unwrap();
    let tree = MemoryTree::new(ScopeId(1), "Backlog");

    let err = load_outline(&dir.path().join("nope.outline"), &tree, "Rank").unwrap_err();

    assert!(matches!(err, InfraError::Io { .. }));
}

#[test]
fn given_malformed_file_when_loading_then_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.outline");
    fs::write(&path, "Login\n     Form\n").unwrap();
    let tree = MemoryTree::new(ScopeId(1), "Backlog");

    let err = load_outline(&path, &tree, "Rank").unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid outline at line 2: odd indentation of 5 spaces"
    );
    assert!(tree.is_empty());
}

#[test]
fn given_empty_tree_when_rendering_then_single_newline() {
    let tree = MemoryTree::new(ScopeId(1), "Backlog");
    assert_eq!(render_outline(&tree, "Rank"), "\n");
}

#[test]
fn given_pipe_in_title_when_renumbered_and_written_then_title_survives() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bugs.outline");
    fs::write(&path, "Fix a|b parser\n  Cover x|y | 9\n").unwrap();
    let mut tree = MemoryTree::new(ScopeId(1), "Backlog");

    load_outline(&path, &tree, "Rank").unwrap();
    let field = tree.resolve_field("Rank").unwrap();
    RenumberEngine::new(LevelPolicy::all(), NumberingStyle::Hierarchical)
        .renumber(&mut tree, &field)
        .unwrap();
    write_outline(&path, &tree, "Rank").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Fix a|b parser | 1\n  Cover x|y | 1.1\n"
    );
}

#[test]
fn given_comments_before_depth_jump_when_loading_then_reports_file_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orphan.outline");
    fs::write(&path, "# header\n\n  Orphan\n").unwrap();
    let tree = MemoryTree::new(ScopeId(1), "Backlog");

    let err = load_outline(&path, &tree, "Rank").unwrap_err();

    assert!(err.to_string().contains("line 3"), "{err}");
}
