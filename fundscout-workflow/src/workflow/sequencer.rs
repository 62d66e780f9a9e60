//! Step sequencer: ordered, one-at-a-time execution of workflow steps

use fundscout_core::{
    config_error, sleep_or_cancelled, validation_error, CancelToken, FundscoutResult,
};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

use super::types::{StepState, WorkflowStep};

/// Outcome of one sequencer advance
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// The next step ran its simulated duration and completed
    Completed(WorkflowStep),
    /// Cancellation was observed at the suspension point
    Cancelled,
    /// Every step has already completed
    Exhausted,
}

/// Owns the ordered step list and advances it one step at a time.
///
/// Steps are visited in declared order, exactly once each, with at most one
/// Active step at any instant. State transitions are strictly forward.
#[derive(Debug)]
pub struct StepSequencer {
    steps: Vec<WorkflowStep>,
    states: Vec<StepState>,
    cursor: usize,
}

impl StepSequencer {
    /// Create a sequencer, validating the step list. A malformed list
    /// (empty or duplicate ids) is a configuration error, fatal to
    /// starting a run.
    pub fn new(steps: Vec<WorkflowStep>) -> FundscoutResult<Self> {
        if steps.is_empty() {
            return Err(config_error!("Workflow step list is empty", "sequencer"));
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(validation_error!(
                    format!("Duplicate workflow step id: {}", step.id),
                    "id",
                    "sequencer"
                ));
            }
        }

        let states = vec![StepState::Pending; steps.len()];
        Ok(Self {
            steps,
            states,
            cursor: 0,
        })
    }

    /// Take the next Pending step, mark it Active, suspend for its simulated
    /// duration, mark it Completed and return it. On cancellation the step
    /// never reaches Completed and the sequencer stops advancing.
    pub async fn advance(&mut self, token: &CancelToken) -> StepOutcome {
        if self.is_done() {
            return StepOutcome::Exhausted;
        }

        let index = self.cursor;
        self.states[index] = StepState::Active;
        let step = self.steps[index].clone();
        debug!(step_id = %step.id, duration_ms = step.duration_ms, "Step active");

        if !sleep_or_cancelled(Duration::from_millis(step.duration_ms), token).await {
            info!(step_id = %step.id, "Step cancelled mid-flight");
            return StepOutcome::Cancelled;
        }

        self.states[index] = StepState::Completed;
        self.cursor += 1;
        info!(step_id = %step.id, "Step completed");
        StepOutcome::Completed(step)
    }

    /// Whether a Pending step remains
    pub fn has_next(&self) -> bool {
        self.cursor < self.steps.len()
    }

    /// Whether every step has completed
    pub fn is_done(&self) -> bool {
        !self.has_next()
    }

    /// The next step that would run, without advancing
    pub fn peek_next(&self) -> Option<&WorkflowStep> {
        self.steps.get(self.cursor)
    }

    /// Current per-step states, in declared order
    pub fn states(&self) -> &[StepState] {
        &self.states
    }

    /// The declared step list
    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }
}
