//! Error conversion helpers for tree access
//!
//! Provides extension traits for cleaner error handling with node context.

use std::fmt::Debug;
use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add node context to a tree access error.
    ///
    /// # Example
    /// ```ignore
    /// tree.children(node)
    ///     .with_node_context("read children", &node)?;
    /// ```
    fn with_node_context(self, action: &str, node: &dyn Debug) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_node_context(self, action: &str, node: &dyn Debug) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {:?}", action, node),
            source: Box::new(e),
        })
    }
}
