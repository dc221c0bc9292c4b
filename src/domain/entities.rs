//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::options::VIEW;

/// Identifier of one tree (view) inside the host.
///
/// Structural change notifications carry the scope they originated from,
/// which is compared against the scope of the configured target tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u64);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// View named in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Agile,
    Scheduled,
    Bugs,
    Backlog,
}

impl ViewKind {
    /// The tree a view is backed by. Only the backlog view has its own tree,
    /// every other view numbers the project schedule.
    pub fn tree_kind(self) -> TreeKind {
        match self {
            ViewKind::Backlog => TreeKind::ProductBacklog,
            ViewKind::Agile | ViewKind::Scheduled | ViewKind::Bugs => TreeKind::Schedule,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Agile => "Agile",
            ViewKind::Scheduled => "Scheduled",
            ViewKind::Bugs => "Bugs",
            ViewKind::Backlog => "Backlog",
        }
    }
}

impl FromStr for ViewKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Agile" => Ok(ViewKind::Agile),
            "Scheduled" => Ok(ViewKind::Scheduled),
            "Bugs" => Ok(ViewKind::Bugs),
            "Backlog" => Ok(ViewKind::Backlog),
            other => Err(DomainError::UnsupportedValue {
                option: VIEW,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tree inside a project that carries the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    Schedule,
    ProductBacklog,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::Schedule => f.write_str("schedule"),
            TreeKind::ProductBacklog => f.write_str("product backlog"),
        }
    }
}

/// Kind of structural edit reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Moved,
    Deleted,
}

/// A structural change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructuralChange {
    pub kind: ChangeKind,
    pub scope: ScopeId,
}

impl StructuralChange {
    pub fn created(scope: ScopeId) -> Self {
        Self {
            kind: ChangeKind::Created,
            scope,
        }
    }

    pub fn moved(scope: ScopeId) -> Self {
        Self {
            kind: ChangeKind::Moved,
            scope,
        }
    }

    pub fn deleted(scope: ScopeId) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            scope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_backlog_view_when_mapping_then_uses_product_backlog() {
        assert_eq!(ViewKind::Backlog.tree_kind(), TreeKind::ProductBacklog);
        assert_eq!(ViewKind::Agile.tree_kind(), TreeKind::Schedule);
        assert_eq!(ViewKind::Bugs.tree_kind(), TreeKind::Schedule);
    }

    #[test]
    fn given_unknown_view_when_parsing_then_names_option() {
        let err = "Kanban".parse::<ViewKind>().unwrap_err();
        assert_eq!(err.to_string(), "View: unsupported value 'Kanban'");
    }
}
