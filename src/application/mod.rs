//! Application layer: renumbering, event coalescing and behaviors
//!
//! This layer orchestrates domain logic and depends on host boundary traits.

pub mod coalescer;
pub mod error;
pub mod error_ext;
pub mod renumber;
pub mod services;

pub use coalescer::{CoalescerState, Decision, Delivery, EventCoalescer};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use renumber::{RenumberEngine, RenumberReport};
