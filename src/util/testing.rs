//! Test setup shared by unit and integration tests.

use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{parse_outline, ScopeId};
use crate::infrastructure::outline::populate;
use crate::infrastructure::MemoryTree;

static TEST_SETUP: Once = Once::new();

/// Install the global logging subscriber once per test binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    // RUST_LOG wins, otherwise everything from this crate
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treenum=debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Build a tree with label column `column` from outline text.
///
/// Panics on malformed outlines; meant for tests only.
pub fn tree_from_outline(scope: ScopeId, column: &str, outline: &str) -> MemoryTree {
    let tree = MemoryTree::new(scope, "root").with_field(column);
    let entries = parse_outline(outline).expect("valid test outline");
    populate(&tree, &entries, column).expect("populate test outline");
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_outline_when_building_test_tree_then_has_all_tasks() {
        let tree = tree_from_outline(ScopeId(9), "Rank", "A\n  A1\nB\n");
        assert_eq!(tree.len(), 3);
    }
}
