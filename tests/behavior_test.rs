//! Tests for NumberingBehavior and BehaviorSet

use treenum::application::services::{BehaviorSet, NumberingBehavior};
use treenum::application::{ApplicationError, CoalescerState};
use treenum::domain::{
    BehaviorConfig, BehaviorOptions, ScopeId, StructuralChange, TreeKind,
};
use treenum::infrastructure::outline::populate;
use treenum::infrastructure::{MemoryTree, MemoryWorkspace, TreeAdapter, Workspace};
use treenum::util::testing::init_test_setup;

const RANK: &str = "Rank";

fn config(project: &str, buffered: bool) -> BehaviorConfig {
    BehaviorConfig::parse(&BehaviorOptions {
        project: project.into(),
        numbering_style: "Hierarchical".into(),
        buffered_events: buffered,
        ..BehaviorOptions::default()
    })
    .expect("valid options")
}

/// Workspace with project "Galaxy" whose backlog is root → [B, C], B → [D, E].
fn workspace() -> (MemoryWorkspace, MemoryTree) {
    init_test_setup();
    let mut ws = MemoryWorkspace::new();
    let trees = ws.add_project("Galaxy", &[RANK]);
    let entries = treenum::domain::parse_outline("B\n  D\n  E\nC\n").unwrap();
    populate(&trees.backlog, &entries, RANK).unwrap();
    (ws, trees.backlog)
}

fn label(tree: &MemoryTree, title: &str) -> String {
    tree.label_of(tree.find(title).unwrap(), RANK).unwrap()
}

#[test]
fn given_valid_target_when_initializing_then_runs_first_pass() {
    let (ws, tree) = workspace();

    let behavior = NumberingBehavior::initialize(&ws, config("Galaxy", true)).unwrap();

    assert_eq!(behavior.passes(), 1);
    assert_eq!(behavior.scope(), tree.scope());
    assert_eq!(label(&tree, "D"), "1.1");
    assert_eq!(label(&tree, "C"), "2");
}

#[test]
fn given_unknown_project_when_initializing_then_fails_without_writes() {
    let (ws, tree) = workspace();

    let result = NumberingBehavior::initialize(&ws, config("Andromeda", true));

    assert!(matches!(result, Err(ApplicationError::ProjectNotFound(ref p)) if p == "Andromeda"));
    assert_eq!(tree.label_writes(), 0);
}

#[test]
fn given_unknown_column_when_initializing_then_fails_without_writes() {
    let (ws, tree) = workspace();
    let mut config = config("Galaxy", true);
    config.column = "WBS".into();

    let result = NumberingBehavior::initialize(&ws, config);

    match result {
        Err(e) => {
            assert!(e.is_config());
            assert_eq!(e.to_string(), "could not find custom column: WBS");
        }
        Ok(_) => panic!("activation should fail"),
    }
    assert_eq!(tree.label_writes(), 0);
}

#[test]
fn given_scheduled_view_when_initializing_then_numbers_schedule() {
    let (ws, backlog) = workspace();
    let schedule = ws.open_view("Galaxy", TreeKind::Schedule).unwrap();
    schedule.insert_child(schedule.root_node(), "Sprint").unwrap();
    let mut config = config("Galaxy", true);
    config.view = "Scheduled".parse().unwrap();

    NumberingBehavior::initialize(&ws, config).unwrap();

    assert_eq!(label(&schedule, "Sprint"), "1");
    assert_eq!(label(&backlog, "B"), "");
}

#[test]
fn given_buffered_delivery_when_many_changes_then_one_pass_at_batch_end() {
    let (ws, tree) = workspace();
    let mut behavior = NumberingBehavior::initialize(&ws, config("Galaxy", true)).unwrap();
    let scope = tree.scope();

    behavior.on_batch_begin();
    for i in 0..5 {
        tree.insert_child(tree.root_node(), &format!("import {i}")).unwrap();
        assert_eq!(behavior.on_item_created(scope).unwrap(), None);
    }
    let b = tree.find("B").unwrap();
    tree.move_node(b, tree.root_node(), usize::MAX).unwrap();
    assert_eq!(behavior.on_item_moved(scope).unwrap(), None);
    assert_eq!(behavior.state(), CoalescerState::Dirty);
    assert_eq!(behavior.passes(), 1);
    assert_eq!(label(&tree, "import 0"), "");

    let report = behavior.on_batch_end().unwrap();

    assert!(report.is_some());
    assert_eq!(behavior.passes(), 2);
    assert_eq!(behavior.state(), CoalescerState::Idle);
    assert_eq!(label(&tree, "C"), "1");
    assert_eq!(label(&tree, "import 0"), "2");
    assert_eq!(label(&tree, "B"), "7");
    assert_eq!(label(&tree, "E"), "7.2");
}

#[test]
fn given_buffered_batch_without_relevant_change_when_ending_then_no_pass() {
    let (ws, _tree) = workspace();
    let mut behavior = NumberingBehavior::initialize(&ws, config("Galaxy", true)).unwrap();

    behavior.on_batch_begin();
    behavior.on_item_created(ScopeId(999)).unwrap();
    behavior.on_item_moved(ScopeId(999)).unwrap();

    assert_eq!(behavior.on_batch_end().unwrap(), None);
    assert_eq!(behavior.passes(), 1);
}

#[test]
fn given_immediate_delivery_when_each_change_then_pass_per_change() {
    let (ws, tree) = workspace();
    let mut behavior = NumberingBehavior::initialize(&ws, config("Galaxy", false)).unwrap();
    let scope = tree.scope();

    tree.insert_child(tree.root_node(), "F").unwrap();
    assert!(behavior.on_item_created(scope).unwrap().is_some());
    assert_eq!(label(&tree, "F"), "3");

    let f = tree.find("F").unwrap();
    tree.remove(f).unwrap();
    assert!(behavior.on_item_deleted(scope).unwrap().is_some());
    let c = tree.find("C").unwrap();
    tree.move_node(c, tree.root_node(), 0).unwrap();
    assert!(behavior.on_item_moved(scope).unwrap().is_some());

    assert_eq!(behavior.passes(), 4);
    assert_eq!(label(&tree, "C"), "1");
    assert_eq!(label(&tree, "D"), "2.1");
}

#[test]
fn given_immediate_delivery_when_foreign_creation_then_ignored() {
    let (ws, tree) = workspace();
    let mut behavior = NumberingBehavior::initialize(&ws, config("Galaxy", false)).unwrap();

    let other_scope = ws.open_view("Galaxy", TreeKind::Schedule).unwrap().scope();
    assert_ne!(other_scope, tree.scope());

    assert_eq!(behavior.on_item_created(other_scope).unwrap(), None);
    assert_eq!(behavior.on_item_moved(other_scope).unwrap(), None);
    assert_eq!(behavior.passes(), 1);
}

#[test]
fn given_foreign_deletion_when_delivered_then_still_triggers_pass() {
    let (ws, _tree) = workspace();
    let mut immediate = NumberingBehavior::initialize(&ws, config("Galaxy", false)).unwrap();
    let mut buffered = NumberingBehavior::initialize(&ws, config("Galaxy", true)).unwrap();

    assert!(immediate.on_item_deleted(ScopeId(999)).unwrap().is_some());

    buffered.on_batch_begin();
    buffered.on_item_deleted(ScopeId(999)).unwrap();
    assert!(buffered.on_batch_end().unwrap().is_some());
}

#[test]
fn given_two_targets_when_one_tree_changes_then_only_its_behavior_renumbers() {
    let (mut ws, galaxy) = workspace();
    let andromeda = ws.add_project("Andromeda", &[RANK]).backlog;
    andromeda.insert_child(andromeda.root_node(), "X").unwrap();
    let mut set = BehaviorSet::initialize(
        &ws,
        vec![config("Galaxy", true), config("Andromeda", true)],
    )
    .unwrap();
    assert_eq!(set.len(), 2);

    set.on_batch_begin();
    galaxy.insert_child(galaxy.root_node(), "new").unwrap();
    set.handle(StructuralChange::created(galaxy.scope())).unwrap();
    let reports = set.on_batch_end().unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(set.behaviors()[0].passes(), 2);
    assert_eq!(set.behaviors()[1].passes(), 1);
    assert_eq!(label(&galaxy, "new"), "3");
    assert_eq!(label(&andromeda, "X"), "1");
}

#[test]
fn given_one_bad_target_when_initializing_set_then_nothing_activates() {
    let (ws, tree) = workspace();

    let result = BehaviorSet::initialize(&ws, vec![config("Galaxy", true), config("Nope", true)]);

    assert!(matches!(result, Err(ApplicationError::ProjectNotFound(_))));
    assert_eq!(tree.label_writes(), 0);
    assert_eq!(tree.label_of(tree.find("D").unwrap(), RANK).unwrap(), "");
}
