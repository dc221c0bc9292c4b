//! Application services
//!
//! Concrete services that wire the renumber engine and coalescer to a
//! host tree. Services depend on the host boundary traits but are
//! themselves concrete structs, not traits.

mod behavior_set;
mod numbering;

pub use behavior_set::BehaviorSet;
pub use numbering::NumberingBehavior;
