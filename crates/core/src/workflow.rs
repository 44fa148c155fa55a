//! Bike-resale workflow step engine.
//!
//! A retrospec bike moves through `BikeSpec -> Build -> Creation -> Checkout`.
//! The server stores one [`WorkflowStep`] per step; this module derives the
//! current step and gates transitions over those records. It performs no
//! I/O: callers persist each transition through the API and then apply it
//! here.
//!
//! A `Reservation` step still exists in older workflows. It is not part of
//! the visible sequence and is auto-completed on load (see
//! [`WorkflowSteps::pending_auto_completions`]).

use serde::Serialize;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::detail::RepairDetail;
use crate::models::workflow_step::{StepName, WorkflowStep};
use crate::types::Timestamp;

/// Visible steps in canonical order.
pub const VISIBLE_STEPS: [StepName; 4] = [
    StepName::BikeSpec,
    StepName::Build,
    StepName::Creation,
    StepName::Checkout,
];

/// Position of a step in the visible sequence, `None` for hidden steps.
pub fn visible_position(name: StepName) -> Option<usize> {
    VISIBLE_STEPS.iter().position(|s| *s == name)
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Outbound notification a transition should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTrigger {
    /// The build is done and the bike awaits its safety inspection.
    ReadyForInspection,
    /// The safety inspection has been signed off.
    InspectionComplete,
}

/// Result of applying one mutation to a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTransition {
    pub step_id: Uuid,
    pub step: StepName,
    /// `true` for a completion, `false` for a revert.
    pub completed: bool,
    pub previous_current: Option<StepName>,
    pub current: Option<StepName>,
}

impl StepTransition {
    pub fn notification_trigger(&self) -> Option<NotificationTrigger> {
        if !self.completed {
            return None;
        }
        match self.step {
            StepName::Build => Some(NotificationTrigger::ReadyForInspection),
            StepName::Creation => Some(NotificationTrigger::InspectionComplete),
            _ => None,
        }
    }
}

/// Progress over the visible steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub total_steps: usize,
    pub completed_steps: usize,
    pub percentage: u8,
    pub current: Option<StepName>,
}

/// Compute a completion percentage; 0 when there are no steps.
pub fn compute_progress_pct(total: usize, completed: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed as f64 / total as f64 * 100.0).round() as u8;
    pct.min(100)
}

// ---------------------------------------------------------------------------
// WorkflowSteps
// ---------------------------------------------------------------------------

/// The steps of one transaction's workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSteps {
    steps: Vec<WorkflowStep>,
}

impl WorkflowSteps {
    /// Wrap server records, ordering them by canonical position (hidden
    /// steps last) and then by `step_order`.
    pub fn new(mut steps: Vec<WorkflowStep>) -> Self {
        steps.sort_by_key(|s| {
            (
                visible_position(s.step_name).unwrap_or(VISIBLE_STEPS.len()),
                s.step_order,
            )
        });
        Self { steps }
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Visible steps in canonical order.
    pub fn visible(&self) -> impl Iterator<Item = &WorkflowStep> {
        self.steps
            .iter()
            .filter(|s| visible_position(s.step_name).is_some())
    }

    pub fn find(&self, step_id: Uuid) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }

    pub fn find_by_name(&self, name: StepName) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.step_name == name)
    }

    /// Incomplete `Reservation` steps that should be completed on load.
    pub fn pending_auto_completions(&self) -> Vec<Uuid> {
        self.steps
            .iter()
            .filter(|s| s.step_name == StepName::Reservation && !s.is_completed)
            .map(|s| s.step_id)
            .collect()
    }

    /// The first incomplete visible step, or the last visible step once all
    /// are complete.
    pub fn current_step(&self) -> Option<&WorkflowStep> {
        self.visible()
            .find(|s| !s.is_completed)
            .or_else(|| self.visible().last())
    }

    fn current_name(&self) -> Option<StepName> {
        self.current_step().map(|s| s.step_name)
    }

    /// Whether every visible step is complete.
    pub fn is_finished(&self) -> bool {
        let mut visible = self.visible().peekable();
        visible.peek().is_some() && visible.all(|s| s.is_completed)
    }

    /// Whether work may proceed to `target`: every visible step before it
    /// must be complete. Hidden steps are never a target.
    pub fn can_proceed_to(&self, target: StepName) -> bool {
        let Some(position) = visible_position(target) else {
            return false;
        };
        if self.find_by_name(target).is_none() {
            return false;
        }
        self.visible()
            .filter(|s| visible_position(s.step_name).is_some_and(|p| p < position))
            .all(|s| s.is_completed)
    }

    fn index_of(&self, step_id: Uuid) -> Result<usize, CoreError> {
        self.steps
            .iter()
            .position(|s| s.step_id == step_id)
            .ok_or_else(|| CoreError::Validation(format!("Unknown workflow step {step_id}")))
    }

    /// Check that `step_id` may be completed now, without changing anything.
    pub fn can_complete(&self, step_id: Uuid) -> Result<(), CoreError> {
        let step = &self.steps[self.index_of(step_id)?];
        if step.is_completed {
            return Err(CoreError::Conflict(format!(
                "Step {} is already complete",
                step.step_name
            )));
        }
        if step.step_name == StepName::Reservation || self.can_proceed_to(step.step_name) {
            return Ok(());
        }
        Err(CoreError::Validation(format!(
            "Cannot complete {} before the steps ahead of it",
            step.step_name
        )))
    }

    /// Mark a step complete. Steps must be completed in order.
    pub fn mark_complete(
        &mut self,
        step_id: Uuid,
        completed_by: Uuid,
        at: Timestamp,
    ) -> Result<StepTransition, CoreError> {
        self.can_complete(step_id)?;
        let previous_current = self.current_name();
        let idx = self.index_of(step_id)?;
        let step = &mut self.steps[idx];
        step.is_completed = true;
        step.completed_by = Some(completed_by);
        step.completed_at = Some(at);
        step.updated_at = at;
        let step_name = step.step_name;
        Ok(StepTransition {
            step_id,
            step: step_name,
            completed: true,
            previous_current,
            current: self.current_name(),
        })
    }

    /// Mark a step incomplete. Any completed step may be reverted, which
    /// moves the current step back to it.
    pub fn mark_incomplete(
        &mut self,
        step_id: Uuid,
        at: Timestamp,
    ) -> Result<StepTransition, CoreError> {
        let idx = self.index_of(step_id)?;
        if !self.steps[idx].is_completed {
            return Err(CoreError::Conflict(format!(
                "Step {} is not complete",
                self.steps[idx].step_name
            )));
        }
        let previous_current = self.current_name();
        let step = &mut self.steps[idx];
        step.is_completed = false;
        step.completed_by = None;
        step.completed_at = None;
        step.updated_at = at;
        let step_name = step.step_name;
        Ok(StepTransition {
            step_id,
            step: step_name,
            completed: false,
            previous_current,
            current: self.current_name(),
        })
    }

    /// Replace a step with the server's copy of it.
    pub fn replace_step(&mut self, updated: WorkflowStep) -> Result<(), CoreError> {
        let idx = self.index_of(updated.step_id)?;
        self.steps[idx] = updated;
        Ok(())
    }

    pub fn progress(&self) -> ProgressSummary {
        let total_steps = self.visible().count();
        let completed_steps = self.visible().filter(|s| s.is_completed).count();
        ProgressSummary {
            total_steps,
            completed_steps,
            percentage: compute_progress_pct(total_steps, completed_steps),
            current: self.current_name(),
        }
    }
}

/// Whether the build checklist (the transaction's repair lines) is done.
///
/// An empty checklist is not considered complete.
pub fn build_checklist_complete(checklist: &[RepairDetail]) -> bool {
    !checklist.is_empty() && checklist.iter().all(|d| d.completed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
