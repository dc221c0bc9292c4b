//! Outline files: loading into and rendering from a [`MemoryTree`].

use std::path::Path;

use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::{format_entry, parse_outline, DomainError, OutlineEntry};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::memory::MemoryTree;

/// Read an outline file and append its entries below the root of `tree`,
/// storing existing labels in column `column`.
#[instrument(level = "debug", skip(tree))]
pub fn load_outline(path: &Path, tree: &MemoryTree, column: &str) -> InfraResult<usize> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| InfraError::io(format!("read outline {}", path.display()), e))?;
    let entries = parse_outline(&content).map_err(ApplicationError::from)?;
    populate(tree, &entries, column)?;
    debug!("loaded {} tasks from {}", entries.len(), path.display());
    Ok(entries.len())
}

/// Append parsed entries below the root of `tree`.
pub fn populate(tree: &MemoryTree, entries: &[OutlineEntry], column: &str) -> InfraResult<()> {
    tree.add_field(column);
    // parents[d] is the most recent node at depth d; depth 0 is the root
    let mut parents = vec![tree.root_node()];
    for entry in entries {
        parents.truncate(entry.depth);
        let parent = entry
            .depth
            .checked_sub(1)
            .and_then(|d| parents.get(d).copied())
            .ok_or_else(|| {
                ApplicationError::from(DomainError::InvalidOutline {
                    line: entry.line,
                    message: format!("depth {} has no parent", entry.depth),
                })
            })?;
        let node = tree
            .insert_child(parent, &entry.title)
            .map_err(|e| InfraError::io(format!("insert {}", entry.title), e))?;
        if !entry.label.is_empty() {
            tree.store_label(node, column, &entry.label)
                .map_err(|e| InfraError::io(format!("label {}", entry.title), e))?;
        }
        parents.push(node);
    }
    Ok(())
}

/// Outline text for `tree`, labels taken from `column`.
pub fn render_outline(tree: &MemoryTree, column: &str) -> String {
    let mut text = tree
        .preorder()
        .into_iter()
        .map(|(depth, idx)| {
            let title = tree.title(idx).unwrap_or_default();
            let label = tree.label_of(idx, column).unwrap_or_default();
            format_entry(depth, &title, &label)
        })
        .join("\n");
    text.push('\n');
    text
}

/// Write the outline for `tree` to `path`.
pub fn write_outline(path: &Path, tree: &MemoryTree, column: &str) -> InfraResult<()> {
    std::fs::write(path, render_outline(tree, column))
        .map_err(|e| InfraError::io(format!("write outline {}", path.display()), e))
}

/// Terminal tree display, each task shown as `label title`.
pub fn to_tree_string(tree: &MemoryTree, column: &str, root_title: &str) -> Tree<String> {
    // Stack of open subtrees; index d holds the current node at depth d.
    let mut open: Vec<Tree<String>> = vec![Tree::new(root_title.to_string())];
    for (depth, idx) in tree.preorder() {
        while open.len() > depth {
            close_last(&mut open);
        }
        let title = tree.title(idx).unwrap_or_default();
        let text = match tree.label_of(idx, column).unwrap_or_default() {
            label if label.is_empty() => title,
            label => format!("{label} {title}"),
        };
        open.push(Tree::new(text));
    }
    while open.len() > 1 {
        close_last(&mut open);
    }
    open.pop().unwrap_or_else(|| Tree::new(root_title.to_string()))
}

fn close_last(open: &mut Vec<Tree<String>>) {
    if let Some(done) = open.pop() {
        if let Some(parent) = open.last_mut() {
            parent.push(done);
        }
    }
}
