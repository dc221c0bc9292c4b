//! Domain layer: entities and numbering rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod level_policy;
pub mod numbering;
pub mod options;
pub mod outline;

pub use entities::{ChangeKind, ScopeId, StructuralChange, TreeKind, ViewKind};
pub use error::{DomainError, DomainResult};
pub use level_policy::{
    build_level_array, parse_level_list, LevelConfig, LevelPolicy, MAX_LEVEL,
};
pub use numbering::{child_path, NumberingStyle, PATH_SEPARATOR};
pub use options::{BehaviorConfig, BehaviorOptions};
pub use outline::{format_entry, parse_outline, OutlineEntry};
