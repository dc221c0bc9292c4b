//! In-memory task trees.
//!
//! `MemoryTree` is a cheap-to-clone handle onto an arena-backed tree. Every
//! clone sees the same nodes, which lets a workspace hand out views while
//! callers keep editing and inspecting the tree.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::rc::Rc;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::{ScopeId, TreeKind};
use crate::infrastructure::traits::{TreeAdapter, Workspace};

/// Task stored in the arena.
#[derive(Debug)]
struct TaskNode {
    title: String,
    /// Index of parent node in the arena, None for the root
    parent: Option<Index>,
    /// Children in sibling order
    children: Vec<Index>,
    /// Label column values by column name; absent means empty
    labels: BTreeMap<String, String>,
}

#[derive(Debug)]
struct TaskArena {
    arena: Arena<TaskNode>,
    root: Index,
    fields: BTreeSet<String>,
    label_writes: usize,
}

impl TaskArena {
    fn node(&self, idx: Index) -> io::Result<&TaskNode> {
        self.arena.get(idx).ok_or_else(|| stale(idx))
    }

    fn node_mut(&mut self, idx: Index) -> io::Result<&mut TaskNode> {
        self.arena.get_mut(idx).ok_or_else(|| stale(idx))
    }

    fn is_ancestor(&self, ancestor: Index, mut node: Index) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.arena.get(node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, idx: Index) -> io::Result<()> {
        if let Some(parent) = self.node(idx)?.parent {
            self.node_mut(parent)?.children.retain(|&c| c != idx);
        }
        Ok(())
    }

    fn attach(&mut self, idx: Index, parent: Index, position: Option<usize>) -> io::Result<()> {
        let siblings = &mut self.node_mut(parent)?.children;
        let position = position.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(position, idx);
        self.node_mut(idx)?.parent = Some(parent);
        Ok(())
    }
}

fn stale(idx: Index) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no task node {idx:?}"))
}

/// Resolved label column of a [`MemoryTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelField(String);

impl LabelField {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Shared handle onto an in-memory task tree.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    scope: ScopeId,
    inner: Rc<RefCell<TaskArena>>,
}

impl MemoryTree {
    pub fn new(scope: ScopeId, root_title: &str) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TaskNode {
            title: root_title.to_string(),
            parent: None,
            children: Vec::new(),
            labels: BTreeMap::new(),
        });
        Self {
            scope,
            inner: Rc::new(RefCell::new(TaskArena {
                arena,
                root,
                fields: BTreeSet::new(),
                label_writes: 0,
            })),
        }
    }

    /// Declare a label column.
    pub fn with_field(self, name: &str) -> Self {
        self.add_field(name);
        self
    }

    pub fn add_field(&self, name: &str) {
        self.inner.borrow_mut().fields.insert(name.to_string());
    }

    pub fn root_node(&self) -> Index {
        self.inner.borrow().root
    }

    /// Append a new child under `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&self, parent: Index, title: &str) -> io::Result<Index> {
        self.insert_child_at(parent, usize::MAX, title)
    }

    /// Insert a new child under `parent` at sibling `position` (clamped).
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child_at(&self, parent: Index, position: usize, title: &str) -> io::Result<Index> {
        let mut inner = self.inner.borrow_mut();
        inner.node(parent)?;
        let idx = inner.arena.insert(TaskNode {
            title: title.to_string(),
            parent: None,
            children: Vec::new(),
            labels: BTreeMap::new(),
        });
        inner.attach(idx, parent, Some(position))?;
        Ok(idx)
    }

    /// Remove `node` and its whole subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&self, node: Index) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        if node == inner.root {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot remove the tree root",
            ));
        }
        inner.detach(node)?;
        let mut stack = vec![node];
        while let Some(idx) = stack.pop() {
            if let Some(removed) = inner.arena.remove(idx) {
                stack.extend(removed.children);
            }
        }
        Ok(())
    }

    /// Move `node` under `new_parent` at sibling `position` (clamped).
    #[instrument(level = "trace", skip(self))]
    pub fn move_node(&self, node: Index, new_parent: Index, position: usize) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.node(node)?;
        inner.node(new_parent)?;
        if node == inner.root || inner.is_ancestor(node, new_parent) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot move a task below itself",
            ));
        }
        inner.detach(node)?;
        inner.attach(node, new_parent, Some(position))
    }

    pub fn title(&self, node: Index) -> Option<String> {
        self.inner.borrow().arena.get(node).map(|n| n.title.clone())
    }

    /// Label value stored in column `field`, None if the node is gone.
    pub fn label_of(&self, node: Index, field: &str) -> Option<String> {
        self.inner
            .borrow()
            .arena
            .get(node)
            .map(|n| n.labels.get(field).cloned().unwrap_or_default())
    }

    /// Set a label as the host would, without counting it as a label write.
    pub fn store_label(&self, node: Index, field: &str, value: &str) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner
            .node_mut(node)?
            .labels
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    /// First node in pre-order whose title equals `title`.
    pub fn find(&self, title: &str) -> Option<Index> {
        self.preorder()
            .into_iter()
            .map(|(_, idx)| idx)
            .find(|&idx| self.title(idx).as_deref() == Some(title))
    }

    /// All non-root nodes in pre-order with their 1-based depth.
    pub fn preorder(&self) -> Vec<(usize, Index)> {
        let inner = self.inner.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<(usize, Index)> = inner
            .arena
            .get(inner.root)
            .map(|root| root.children.iter().rev().map(|&c| (1, c)).collect())
            .unwrap_or_default();
        while let Some((depth, idx)) = stack.pop() {
            if let Some(node) = inner.arena.get(idx) {
                out.push((depth, idx));
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    stack.push((depth + 1, child));
                }
            }
        }
        out
    }

    /// Number of non-root nodes.
    pub fn len(&self) -> usize {
        self.inner.borrow().arena.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label writes performed through [`TreeAdapter::set_label`].
    pub fn label_writes(&self) -> usize {
        self.inner.borrow().label_writes
    }

    pub fn reset_label_writes(&self) {
        self.inner.borrow_mut().label_writes = 0;
    }
}

impl TreeAdapter for MemoryTree {
    type Node = Index;
    type Field = LabelField;

    fn scope(&self) -> ScopeId {
        self.scope
    }

    fn root(&self) -> Index {
        self.root_node()
    }

    fn resolve_field(&self, name: &str) -> Option<LabelField> {
        self.inner
            .borrow()
            .fields
            .contains(name)
            .then(|| LabelField(name.to_string()))
    }

    fn children(&self, node: Index) -> io::Result<Vec<Index>> {
        Ok(self.inner.borrow().node(node)?.children.clone())
    }

    fn label(&self, node: Index, field: &LabelField) -> io::Result<String> {
        let inner = self.inner.borrow();
        Ok(inner
            .node(node)?
            .labels
            .get(field.name())
            .cloned()
            .unwrap_or_default())
    }

    #[instrument(level = "trace", skip(self))]
    fn set_label(&mut self, node: Index, field: &LabelField, value: &str) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        let labels = &mut inner.node_mut(node)?.labels;
        if value.is_empty() {
            labels.remove(field.name());
        } else {
            labels.insert(field.name().to_string(), value.to_string());
        }
        inner.label_writes += 1;
        Ok(())
    }
}

/// The two trees of one project.
#[derive(Debug, Clone)]
pub struct ProjectTrees {
    pub schedule: MemoryTree,
    pub backlog: MemoryTree,
}

impl ProjectTrees {
    pub fn get(&self, kind: TreeKind) -> &MemoryTree {
        match kind {
            TreeKind::Schedule => &self.schedule,
            TreeKind::ProductBacklog => &self.backlog,
        }
    }
}

/// Named projects, each with a schedule and a product backlog.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    projects: BTreeMap<String, ProjectTrees>,
    next_scope: u64,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or return) a project. New trees get fresh scopes and the
    /// given label columns.
    pub fn add_project(&mut self, name: &str, fields: &[&str]) -> ProjectTrees {
        if let Some(existing) = self.projects.get(name) {
            return existing.clone();
        }
        let schedule = MemoryTree::new(self.allocate_scope(), "Schedule");
        let backlog = MemoryTree::new(self.allocate_scope(), "Product backlog");
        for field in fields {
            schedule.add_field(field);
            backlog.add_field(field);
        }
        let trees = ProjectTrees { schedule, backlog };
        self.projects.insert(name.to_string(), trees.clone());
        trees
    }

    pub fn project(&self, name: &str) -> Option<&ProjectTrees> {
        self.projects.get(name)
    }

    fn allocate_scope(&mut self) -> ScopeId {
        self.next_scope += 1;
        ScopeId(self.next_scope)
    }
}

impl Workspace for MemoryWorkspace {
    type Tree = MemoryTree;

    fn open_view(&self, project: &str, kind: TreeKind) -> Option<MemoryTree> {
        self.projects.get(project).map(|p| p.get(kind).clone())
    }
}
