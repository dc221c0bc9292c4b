//! Batching of structural change notifications.
//!
//! Hosts either deliver notifications one by one, or wrap bursts of them
//! in batch begin/end markers. In the buffered case any number of relevant
//! changes inside one batch collapse into a single renumber pass at the end.

use tracing::{debug, trace};

use crate::domain::{ChangeKind, ScopeId, StructuralChange};

/// Whether the host wraps notifications in batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Immediate,
    Buffered,
}

impl Delivery {
    pub fn from_buffered(buffered: bool) -> Self {
        if buffered {
            Delivery::Buffered
        } else {
            Delivery::Immediate
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoalescerState {
    /// No relevant change since the batch began
    #[default]
    Idle,
    /// At least one relevant change is waiting for the batch end
    Dirty,
}

/// What the caller has to do after feeding an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run a full renumber pass now.
    Renumber,
    /// Remembered for the batch end.
    Defer,
    /// Nothing to do.
    Ignore,
}

/// Per-target gate in front of the renumber engine.
#[derive(Debug, Clone)]
pub struct EventCoalescer {
    target: ScopeId,
    delivery: Delivery,
    state: CoalescerState,
}

impl EventCoalescer {
    pub fn new(target: ScopeId, delivery: Delivery) -> Self {
        Self {
            target,
            delivery,
            state: CoalescerState::Idle,
        }
    }

    pub fn state(&self) -> CoalescerState {
        self.state
    }

    pub fn delivery(&self) -> Delivery {
        self.delivery
    }

    pub fn target(&self) -> ScopeId {
        self.target
    }

    pub fn on_batch_begin(&mut self) {
        self.state = CoalescerState::Idle;
    }

    /// Created and moved notifications only count for the target scope.
    /// Deletions count wherever they happen.
    pub fn on_change(&mut self, change: StructuralChange) -> Decision {
        let relevant = match change.kind {
            ChangeKind::Created | ChangeKind::Moved => change.scope == self.target,
            ChangeKind::Deleted => true,
        };
        if !relevant {
            trace!(?change, target = %self.target, "change outside target scope");
            return Decision::Ignore;
        }
        match self.delivery {
            Delivery::Immediate => {
                self.state = CoalescerState::Idle;
                Decision::Renumber
            }
            Delivery::Buffered => {
                if self.state == CoalescerState::Idle {
                    debug!(?change, "target marked dirty");
                }
                self.state = CoalescerState::Dirty;
                Decision::Defer
            }
        }
    }

    pub fn on_batch_end(&mut self) -> Decision {
        match std::mem::take(&mut self.state) {
            CoalescerState::Dirty => Decision::Renumber,
            CoalescerState::Idle => Decision::Ignore,
        }
    }
}
