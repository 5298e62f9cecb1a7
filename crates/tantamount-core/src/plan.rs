//! The ordered list of steps driving every comparison
//!
//! One process-wide plan exists behind `global_plan`; validators snapshot
//! it at construction, so mutating the plan never disturbs validations
//! already in flight. Mutation is a test- or program-setup activity: the
//! caller is responsible for not racing it against other plan mutations,
//! and for calling `reset_global_plan` afterwards.

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use crate::errors::{EngineError, Result};
use crate::steps::{
    EquivalencyStep, MapEquivalencyStep, RecordEquivalencyStep, ReferenceEqualityStep,
    SeqEquivalencyStep, SimpleEqualityStep, UnitEquivalencyStep, UserComparerStep,
};

/// Ordered steps consulted for every pair
pub struct EquivalencyPlan {
    steps: Vec<Arc<dyn EquivalencyStep>>,
}

impl EquivalencyPlan {
    /// Plan with the built-in steps in their canonical order
    pub fn default_plan() -> Self {
        Self {
            steps: vec![
                Arc::new(UserComparerStep),
                Arc::new(ReferenceEqualityStep),
                Arc::new(UnitEquivalencyStep),
                Arc::new(SeqEquivalencyStep),
                Arc::new(MapEquivalencyStep),
                Arc::new(RecordEquivalencyStep),
                Arc::new(SimpleEqualityStep),
            ],
        }
    }

    /// Plan with no steps at all
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// The steps in consultation order
    pub fn steps(&self) -> &[Arc<dyn EquivalencyStep>] {
        &self.steps
    }

    /// Clone of the step list, cheap to hold across a validation
    pub fn snapshot(&self) -> Vec<Arc<dyn EquivalencyStep>> {
        self.steps.clone()
    }

    /// Step names in consultation order
    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step, keeping the terminal fallback last when it is last
    pub fn add(&mut self, step: Arc<dyn EquivalencyStep>) {
        match self.steps.last() {
            Some(last) if last.name() == SimpleEqualityStep::NAME => {
                self.steps.insert(self.steps.len() - 1, step);
            }
            _ => self.steps.push(step),
        }
    }

    /// Put a step in front of every other step
    pub fn insert(&mut self, step: Arc<dyn EquivalencyStep>) {
        self.steps.insert(0, step);
    }

    /// Insert a step immediately before the named one
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StepNotFound`] when no step carries the name.
    pub fn insert_before(&mut self, anchor: &str, step: Arc<dyn EquivalencyStep>) -> Result<()> {
        let position = self.position(anchor)?;
        self.steps.insert(position, step);
        Ok(())
    }

    /// Insert a step immediately after the named one
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StepNotFound`] when no step carries the name.
    pub fn add_after(&mut self, anchor: &str, step: Arc<dyn EquivalencyStep>) -> Result<()> {
        let position = self.position(anchor)?;
        self.steps.insert(position + 1, step);
        Ok(())
    }

    /// Remove every step with the given name; absent names are a no-op
    pub fn remove(&mut self, name: &str) {
        self.steps.retain(|step| step.name() != name);
    }

    /// Remove every step
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Restore the built-in order
    pub fn reset(&mut self) {
        *self = Self::default_plan();
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.steps
            .iter()
            .position(|step| step.name() == name)
            .ok_or_else(|| EngineError::StepNotFound {
                name: name.to_string(),
            })
    }
}

impl Default for EquivalencyPlan {
    fn default() -> Self {
        Self::default_plan()
    }
}

impl fmt::Debug for EquivalencyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

static GLOBAL_PLAN: OnceLock<RwLock<EquivalencyPlan>> = OnceLock::new();

fn global_plan() -> &'static RwLock<EquivalencyPlan> {
    GLOBAL_PLAN.get_or_init(|| RwLock::new(EquivalencyPlan::default_plan()))
}

/// Run a mutation against the process-wide plan
pub fn modify_global_plan<R>(mutate: impl FnOnce(&mut EquivalencyPlan) -> R) -> R {
    let mut plan = global_plan()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    mutate(&mut plan)
}

/// Snapshot the process-wide plan's current steps
pub fn global_plan_snapshot() -> Vec<Arc<dyn EquivalencyStep>> {
    global_plan()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .snapshot()
}

/// Restore the process-wide plan to the built-in order
pub fn reset_global_plan() {
    modify_global_plan(EquivalencyPlan::reset);
}
