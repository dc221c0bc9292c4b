//! All configured behaviors of one host.

use tracing::{instrument, warn};

use crate::application::renumber::RenumberReport;
use crate::application::services::NumberingBehavior;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{BehaviorConfig, StructuralChange};
use crate::infrastructure::traits::{TreeAdapter, Workspace};

/// Broadcasts host notifications to every behavior.
///
/// Each behavior decides on its own whether a notification concerns its
/// tree. When a pass fails the remaining behaviors are still notified and
/// the first failure is returned.
pub struct BehaviorSet<T: TreeAdapter> {
    behaviors: Vec<NumberingBehavior<T>>,
}

impl<T: TreeAdapter> BehaviorSet<T> {
    /// Activate every configuration. Every target is resolved before any
    /// tree is written, so an unknown project or column leaves all trees
    /// untouched.
    #[instrument(level = "debug", skip_all, fields(count = configs.len()))]
    pub fn initialize<W>(workspace: &W, configs: Vec<BehaviorConfig>) -> ApplicationResult<Self>
    where
        W: Workspace<Tree = T>,
    {
        let mut behaviors = configs
            .into_iter()
            .map(|config| NumberingBehavior::attach(workspace, config))
            .collect::<ApplicationResult<Vec<_>>>()?;
        for behavior in &mut behaviors {
            behavior.activate()?;
        }
        Ok(Self { behaviors })
    }

    pub fn behaviors(&self) -> &[NumberingBehavior<T>] {
        &self.behaviors
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn on_batch_begin(&mut self) {
        for behavior in &mut self.behaviors {
            behavior.on_batch_begin();
        }
    }

    pub fn handle(&mut self, change: StructuralChange) -> ApplicationResult<Vec<RenumberReport>> {
        self.each(|behavior| behavior.handle(change))
    }

    pub fn on_batch_end(&mut self) -> ApplicationResult<Vec<RenumberReport>> {
        self.each(|behavior| behavior.on_batch_end())
    }

    fn each<F>(&mut self, mut f: F) -> ApplicationResult<Vec<RenumberReport>>
    where
        F: FnMut(&mut NumberingBehavior<T>) -> ApplicationResult<Option<RenumberReport>>,
    {
        let mut reports = Vec::new();
        let mut first_error: Option<ApplicationError> = None;
        for behavior in &mut self.behaviors {
            match f(behavior) {
                Ok(Some(report)) => reports.push(report),
                Ok(None) => {}
                Err(e) => {
                    warn!("{} failed: {}", behavior.title(), e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(reports),
        }
    }
}
