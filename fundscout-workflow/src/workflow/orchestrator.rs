//! Workflow orchestrator: drives the step sequencer to completion and
//! archives the finished run

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{info, warn};

use fundscout_core::{sleep_or_cancelled, CancelToken, ProjectMetadata, ResearchDatasets};

use super::render;
use super::sequencer::{StepOutcome, StepSequencer};
use super::types::{
    FinishedResearch, ResultTab, RunOutcome, WorkflowPhase, WorkflowUpdate,
};
use crate::history::HistoryStore;
use crate::tabs::{DetailTabController, ResultsTabController};
use crate::{WorkflowError, WorkflowResult};

/// Top-level driver for one workflow run.
///
/// `NotStarted -> Running -> Finished`; a run executes exactly once. The
/// orchestrator is a single sequential task that suspends at each step
/// boundary; the controllers it feeds stay independently usable the whole
/// time, so user commands are never blocked by a running orchestration.
pub struct WorkflowOrchestrator {
    sequencer: StepSequencer,
    project: ProjectMetadata,
    datasets: ResearchDatasets,
    settle_delay: Duration,
    phase: WorkflowPhase,
    tabs: Arc<ResultsTabController>,
    history: Arc<HistoryStore>,
    detail: Arc<DetailTabController>,
    updates: broadcast::Sender<WorkflowUpdate>,
}

impl WorkflowOrchestrator {
    pub fn new(
        sequencer: StepSequencer,
        project: ProjectMetadata,
        datasets: ResearchDatasets,
        settle_delay: Duration,
        tabs: Arc<ResultsTabController>,
        history: Arc<HistoryStore>,
        detail: Arc<DetailTabController>,
        updates: broadcast::Sender<WorkflowUpdate>,
    ) -> Self {
        Self {
            sequencer,
            project,
            datasets,
            settle_delay,
            phase: WorkflowPhase::NotStarted,
            tabs,
            history,
            detail,
            updates,
        }
    }

    /// Current phase of the run state machine
    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// Run the workflow to completion: advance every step in order, render
    /// and register tab-worthy results, settle, then archive the run as a
    /// finished-research record and select it.
    ///
    /// Simulated steps always succeed; the only early exit is cancellation,
    /// which leaves no partial history record behind.
    pub async fn run(&mut self, token: &CancelToken) -> WorkflowResult<RunOutcome> {
        if self.phase != WorkflowPhase::NotStarted {
            return Err(WorkflowError::workflow(
                "Workflow has already run; re-invocation is not supported",
            ));
        }
        self.phase = WorkflowPhase::Running;
        info!(
            project = %self.project.title,
            steps = self.sequencer.steps().len(),
            "Starting workflow run"
        );

        while self.sequencer.has_next() {
            if let Some(next) = self.sequencer.peek_next() {
                self.emit(WorkflowUpdate::StepStarted {
                    step_id: next.id.clone(),
                    name: next.name.clone(),
                });
            }

            match self.sequencer.advance(token).await {
                StepOutcome::Completed(step) => {
                    self.emit(WorkflowUpdate::StepCompleted {
                        step_id: step.id.clone(),
                    });

                    if step.tab_worthy {
                        let fragment = step.payload.render();
                        self.tabs
                            .register(ResultTab {
                                step_id: step.id.clone(),
                                label: step.name.clone(),
                                fragment,
                            })
                            .await;
                        self.emit(WorkflowUpdate::TabRegistered { step_id: step.id });
                    }
                }
                StepOutcome::Cancelled => {
                    return self.finish_cancelled();
                }
                StepOutcome::Exhausted => break,
            }
        }

        // Cosmetic pause before the workflow panel hands over to history
        if !sleep_or_cancelled(self.settle_delay, token).await {
            return self.finish_cancelled();
        }

        let record = self.history.insert(self.build_record()).await;
        self.history.select(record.id).await;
        self.detail.select(record.id).await;

        self.phase = WorkflowPhase::Finished;
        self.emit(WorkflowUpdate::Finished {
            record_id: record.id,
        });
        info!(record_id = record.id, "Workflow run archived");

        Ok(RunOutcome::Finished {
            record_id: record.id,
        })
    }

    fn finish_cancelled(&mut self) -> WorkflowResult<RunOutcome> {
        let step_id = self.sequencer.peek_next().map(|s| s.id.clone());
        warn!(step_id = ?step_id, "Workflow run cancelled");
        self.phase = WorkflowPhase::Finished;
        self.emit(WorkflowUpdate::Cancelled { step_id });
        Ok(RunOutcome::Cancelled)
    }

    /// Build the immutable finished-research record from the run's data and
    /// the project metadata. The facet fragments are re-rendered from the
    /// same payloads the steps displayed; render functions are pure, so the
    /// facets match the tabs exactly.
    fn build_record(&self) -> FinishedResearch {
        FinishedResearch {
            id: chrono::Utc::now().timestamp_millis(),
            title: self.project.title.clone(),
            summary: self.project.summary.clone(),
            date: self.project.created_at,
            opportunities_count: self.datasets.opportunities.len(),
            context_fragment: render::render_context_items(&self.datasets.context_items),
            opportunities_fragment: render::render_opportunities(&self.datasets.opportunities),
            report_fragment: render::render_report_link(&self.datasets.report),
        }
    }

    fn emit(&self, update: WorkflowUpdate) {
        // No subscribers is fine; updates are advisory
        let _ = self.updates.send(update);
    }
}
