//! Infrastructure layer: host boundary traits and in-memory implementations
//!
//! This layer implements the tree boundary and reads/writes outline files.

pub mod error;
pub mod memory;
pub mod outline;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use memory::{LabelField, MemoryTree, MemoryWorkspace, ProjectTrees};
pub use traits::{TreeAdapter, Workspace};
