//! Numbering behavior: one configured target tree kept labeled.

use tracing::{debug, info, instrument};

use crate::application::coalescer::{CoalescerState, Decision, Delivery, EventCoalescer};
use crate::application::renumber::{RenumberEngine, RenumberReport};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{BehaviorConfig, ScopeId, StructuralChange};
use crate::infrastructure::traits::{TreeAdapter, Workspace};

/// Keeps the label column of one tree in line with its structure.
///
/// The host calls the `on_*` methods serially from one thread. A behavior
/// owns its coalescer, so several behaviors never share dirty state.
pub struct NumberingBehavior<T: TreeAdapter> {
    title: String,
    config: BehaviorConfig,
    tree: T,
    field: T::Field,
    engine: RenumberEngine,
    coalescer: EventCoalescer,
    passes: usize,
}

impl<T: TreeAdapter> NumberingBehavior<T> {
    /// Resolve the target tree and label column and run the first pass.
    ///
    /// An unknown project or column fails activation before anything is
    /// written.
    #[instrument(level = "debug", skip(workspace, config), fields(title = %config.title()))]
    pub fn initialize<W>(workspace: &W, config: BehaviorConfig) -> ApplicationResult<Self>
    where
        W: Workspace<Tree = T>,
    {
        let mut behavior = Self::attach(workspace, config)?;
        behavior.activate()?;
        Ok(behavior)
    }

    /// First pass after [`attach`](Self::attach).
    pub fn activate(&mut self) -> ApplicationResult<RenumberReport> {
        let report = self.renumber()?;
        info!("{} activated: {}", self.title, report);
        Ok(report)
    }

    /// Resolve the target without running a pass.
    pub fn attach<W>(workspace: &W, config: BehaviorConfig) -> ApplicationResult<Self>
    where
        W: Workspace<Tree = T>,
    {
        let tree = workspace
            .open_view(&config.project, config.view.tree_kind())
            .ok_or_else(|| ApplicationError::ProjectNotFound(config.project.clone()))?;
        let field = tree
            .resolve_field(&config.column)
            .ok_or_else(|| ApplicationError::ColumnNotFound(config.column.clone()))?;
        let engine = RenumberEngine::new(config.policy()?, config.style);
        let coalescer = EventCoalescer::new(
            tree.scope(),
            Delivery::from_buffered(config.buffered_events),
        );
        debug!(
            "attached to {} of {} (scope {})",
            config.view.tree_kind(),
            config.project,
            tree.scope()
        );

        Ok(Self {
            title: config.title(),
            config,
            tree,
            field,
            engine,
            coalescer,
            passes: 0,
        })
    }

    /// Run one full renumber pass now.
    pub fn renumber(&mut self) -> ApplicationResult<RenumberReport> {
        self.passes += 1;
        self.engine.renumber(&mut self.tree, &self.field)
    }

    pub fn on_item_created(&mut self, scope: ScopeId) -> ApplicationResult<Option<RenumberReport>> {
        self.handle(StructuralChange::created(scope))
    }

    pub fn on_item_moved(&mut self, scope: ScopeId) -> ApplicationResult<Option<RenumberReport>> {
        self.handle(StructuralChange::moved(scope))
    }

    pub fn on_item_deleted(&mut self, scope: ScopeId) -> ApplicationResult<Option<RenumberReport>> {
        self.handle(StructuralChange::deleted(scope))
    }

    /// Feed one structural change. Returns the report if a pass ran.
    #[instrument(level = "trace", skip(self), fields(title = %self.title))]
    pub fn handle(&mut self, change: StructuralChange) -> ApplicationResult<Option<RenumberReport>> {
        let decision = self.coalescer.on_change(change);
        self.apply(decision)
    }

    pub fn on_batch_begin(&mut self) {
        self.coalescer.on_batch_begin();
    }

    #[instrument(level = "trace", skip(self), fields(title = %self.title))]
    pub fn on_batch_end(&mut self) -> ApplicationResult<Option<RenumberReport>> {
        let decision = self.coalescer.on_batch_end();
        self.apply(decision)
    }

    fn apply(&mut self, decision: Decision) -> ApplicationResult<Option<RenumberReport>> {
        match decision {
            Decision::Renumber => self.renumber().map(Some),
            Decision::Defer | Decision::Ignore => Ok(None),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn scope(&self) -> ScopeId {
        self.coalescer.target()
    }

    pub fn state(&self) -> CoalescerState {
        self.coalescer.state()
    }

    /// Passes started since activation, the initial one included.
    pub fn passes(&self) -> usize {
        self.passes
    }
}
