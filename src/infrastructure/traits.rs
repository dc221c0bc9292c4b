//! Host boundary traits for testability
//!
//! These traits abstract the externally owned task tree, allowing the
//! numbering services to be tested against in-memory implementations.
//! The engine is single-threaded, so no `Send`/`Sync` bounds are required.

use std::fmt;
use std::io;

use crate::domain::{ScopeId, TreeKind};

/// Access to one task tree and its label column.
pub trait TreeAdapter {
    /// Handle of a node in the tree.
    type Node: Copy + Eq + fmt::Debug;
    /// Handle of a resolved label column.
    type Field: Clone + fmt::Debug;

    /// Scope reported by structural change notifications for this tree.
    fn scope(&self) -> ScopeId;

    /// The tree root. It is never labeled itself; its children are depth 1.
    fn root(&self) -> Self::Node;

    /// Look up a label column by name.
    fn resolve_field(&self, name: &str) -> Option<Self::Field>;

    /// Children of `node` in the host's sibling order.
    fn children(&self, node: Self::Node) -> io::Result<Vec<Self::Node>>;

    /// Current label value of `node`; unset labels read as empty text.
    fn label(&self, node: Self::Node, field: &Self::Field) -> io::Result<String>;

    /// Store a label value on `node`.
    fn set_label(&mut self, node: Self::Node, field: &Self::Field, value: &str) -> io::Result<()>;
}

/// Lookup of trees by project name.
pub trait Workspace {
    type Tree: TreeAdapter;

    /// Open the tree of `kind` inside `project`, None if the project is unknown.
    fn open_view(&self, project: &str, kind: TreeKind) -> Option<Self::Tree>;
}
