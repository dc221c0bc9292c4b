//! Rank labels for hierarchical task trees.
//!
//! A [`application::services::NumberingBehavior`] keeps one label column of
//! a host tree in line with the tree's structure: every task on a label
//! level carries its rank among its siblings, flat (`"3"`) or as a path
//! (`"1.2.3"`), and tasks on other levels carry an empty label.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
