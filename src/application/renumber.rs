//! Rank label recomputation.
//!
//! One pass walks the whole tree depth-first from the root and brings every
//! label in line with the current sibling order. Labels are only written
//! when the stored value differs, because each write is itself a change the
//! host reports back to us.

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::application::error_ext::IoResultExt;
use crate::application::ApplicationResult;
use crate::domain::{child_path, LevelPolicy, NumberingStyle};
use crate::infrastructure::traits::TreeAdapter;

/// Counters of one renumber pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenumberReport {
    /// Nodes whose label was checked (the root is not counted)
    pub nodes_visited: usize,
    /// Labels set to a new rank
    pub labels_written: usize,
    /// Labels cleared on non-label levels
    pub labels_cleared: usize,
}

impl RenumberReport {
    pub fn writes(&self) -> usize {
        self.labels_written + self.labels_cleared
    }
}

impl fmt::Display for RenumberReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tasks checked, {} labels written, {} cleared",
            self.nodes_visited, self.labels_written, self.labels_cleared
        )
    }
}

/// Pending node: its children sit at `depth` and inherit `path`.
struct Frame<N> {
    node: N,
    depth: usize,
    path: String,
}

/// Writes rank labels according to a level policy and numbering style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenumberEngine {
    policy: LevelPolicy,
    style: NumberingStyle,
}

impl RenumberEngine {
    pub fn new(policy: LevelPolicy, style: NumberingStyle) -> Self {
        Self { policy, style }
    }

    pub fn policy(&self) -> &LevelPolicy {
        &self.policy
    }

    pub fn style(&self) -> NumberingStyle {
        self.style
    }

    /// Run one full pass over `tree`, labels stored in `field`.
    ///
    /// Tree access errors abort the pass and are returned as is; labels
    /// written before the failure stay written.
    #[instrument(level = "debug", skip(self, tree, field), fields(scope = %tree.scope()))]
    pub fn renumber<T: TreeAdapter>(
        &self,
        tree: &mut T,
        field: &T::Field,
    ) -> ApplicationResult<RenumberReport> {
        let mut report = RenumberReport::default();
        let mut stack = vec![Frame {
            node: tree.root(),
            depth: 1,
            path: String::new(),
        }];

        while let Some(Frame { node, depth, path }) = stack.pop() {
            let children = tree
                .children(node)
                .with_node_context("read children", &node)?;
            if children.is_empty() {
                continue;
            }
            let label_level = self.policy.is_label_level(depth);
            trace!(?node, depth, label_level, "numbering children");

            for (i, &child) in children.iter().enumerate() {
                let rank = i + 1;
                let wanted = if label_level {
                    self.style.rank_label(&path, rank)
                } else {
                    String::new()
                };
                let current = tree
                    .label(child, field)
                    .with_node_context("read label", &child)?;
                report.nodes_visited += 1;
                if current == wanted {
                    continue;
                }
                tree.set_label(child, field, &wanted)
                    .with_node_context("write label", &child)?;
                if wanted.is_empty() {
                    report.labels_cleared += 1;
                } else {
                    report.labels_written += 1;
                }
            }

            // Reverse push keeps the walk in sibling order. Paths are tracked
            // on every level so deeper label levels get the full prefix.
            for (i, &child) in children.iter().enumerate().rev() {
                stack.push(Frame {
                    node: child,
                    depth: depth + 1,
                    path: child_path(&path, i + 1),
                });
            }
        }

        debug!(%report, "renumber pass complete");
        Ok(report)
    }
}
