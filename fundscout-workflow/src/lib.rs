//! Fundscout Workflow - staged research pipeline orchestration
//!
//! This crate implements the application layer on top of fundscout-core:
//!
//! - A staged workflow orchestrator that advances named steps in order,
//!   each producing a distinct artifact
//! - Result tabs that accumulate as steps complete
//! - A history of finished research records with a tabbed detail view
//!
//! ## Architecture
//!
//! The core never depends on a specific event system. The display surface
//! drives it through explicit command methods on [`ResearchWorkbench`]
//! (`select_research`, `show_detail_tab`, ...) and observes progress via a
//! broadcast update stream. Actual pixel rendering, event wiring, and
//! styling live outside this crate.

pub mod history;
pub mod tabs;
pub mod workflow;

pub use history::HistoryStore;
pub use tabs::{DetailPanel, DetailTab, DetailTabController, ResultsTabController};
pub use workflow::{
    FinishedResearch, Fragment, FragmentKind, ResultTab, RunOutcome, StepOutcome, StepPayload,
    StepSequencer, StepState, WorkflowOrchestrator, WorkflowPhase, WorkflowStep, WorkflowUpdate,
};

use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use fundscout_core::{CancelToken, FundscoutConfig, ProjectMetadata, ResearchDatasets};

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Core error: {0}")]
    Core(#[from] fundscout_core::FundscoutError),

    #[error("Workflow error: {message}")]
    Workflow { message: String },
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl WorkflowError {
    /// Create a workflow error
    pub fn workflow<S: Into<String>>(message: S) -> Self {
        Self::Workflow {
            message: message.into(),
        }
    }
}

/// Main research workbench service: owns the orchestrator, the history
/// store, and both tab controllers for one page session.
///
/// All mutated state lives behind this facade and is reached through
/// explicit commands; there are no ambient globals. User commands touch
/// only controller state, which the orchestrator never holds exclusive
/// access to, so they may arrive at any time, including mid-run.
pub struct ResearchWorkbench {
    project: ProjectMetadata,
    history: Arc<HistoryStore>,
    results_tabs: Arc<ResultsTabController>,
    detail_tabs: Arc<DetailTabController>,
    orchestrator: Mutex<WorkflowOrchestrator>,
    updates: broadcast::Sender<WorkflowUpdate>,
}

/// Builder for [`ResearchWorkbench`] to simplify initialization
pub struct ResearchWorkbenchBuilder {
    config: FundscoutConfig,
    project: ProjectMetadata,
    datasets: ResearchDatasets,
    custom_steps: Option<Vec<WorkflowStep>>,
}

impl ResearchWorkbenchBuilder {
    /// Create a builder from the two collaborator inputs: project metadata
    /// and the per-step datasets
    pub fn new(project: ProjectMetadata, datasets: ResearchDatasets) -> Self {
        Self {
            config: FundscoutConfig::default(),
            project,
            datasets,
            custom_steps: None,
        }
    }

    /// Use a custom configuration
    pub fn with_config(mut self, config: FundscoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the standard four-step pipeline with a custom step list
    pub fn with_steps(mut self, steps: Vec<WorkflowStep>) -> Self {
        self.custom_steps = Some(steps);
        self
    }

    /// Build the workbench, validating the step list
    pub fn build(self) -> WorkflowResult<ResearchWorkbench> {
        let steps = self.custom_steps.unwrap_or_else(|| {
            WorkflowStep::standard_pipeline(&self.datasets, &self.config.workflow)
        });
        let sequencer = StepSequencer::new(steps)?;

        let history = Arc::new(HistoryStore::new());
        let results_tabs = Arc::new(ResultsTabController::new());
        let detail_tabs = Arc::new(DetailTabController::new(history.clone()));
        let (updates, _) = broadcast::channel(1000);

        let orchestrator = WorkflowOrchestrator::new(
            sequencer,
            self.project.clone(),
            self.datasets,
            std::time::Duration::from_millis(self.config.workflow.settle_delay_ms),
            results_tabs.clone(),
            history.clone(),
            detail_tabs.clone(),
            updates.clone(),
        );

        Ok(ResearchWorkbench {
            project: self.project,
            history,
            results_tabs,
            detail_tabs,
            orchestrator: Mutex::new(orchestrator),
            updates,
        })
    }
}

impl ResearchWorkbench {
    /// Create a workbench with the standard pipeline and default config
    pub fn new(
        project: ProjectMetadata,
        datasets: ResearchDatasets,
    ) -> WorkflowResult<Self> {
        ResearchWorkbenchBuilder::new(project, datasets).build()
    }

    /// Create a builder for more advanced configuration
    pub fn builder(
        project: ProjectMetadata,
        datasets: ResearchDatasets,
    ) -> ResearchWorkbenchBuilder {
        ResearchWorkbenchBuilder::new(project, datasets)
    }

    /// The project metadata read at load
    pub fn project(&self) -> &ProjectMetadata {
        &self.project
    }

    // ========================================
    // Workflow API
    // ========================================

    /// Run the workflow to completion. Executes at most once per workbench;
    /// a second invocation returns a workflow error.
    pub async fn run_workflow(&self, token: &CancelToken) -> WorkflowResult<RunOutcome> {
        let mut orchestrator = self.orchestrator.lock().await;
        orchestrator.run(token).await
    }

    /// Subscribe to workflow progress updates
    pub fn subscribe_updates(&self) -> broadcast::Receiver<WorkflowUpdate> {
        self.updates.subscribe()
    }

    // ========================================
    // Command API for the display surface
    // ========================================

    /// Select a history record: sets the history selection and renders the
    /// record's facets with the context tab active. Unknown ids are a
    /// no-op.
    pub async fn select_research(&self, record_id: i64) {
        self.history.select(record_id).await;
        self.detail_tabs.select(record_id).await;
    }

    /// Activate one detail facet of a history record
    pub async fn show_detail_tab(&self, record_id: i64, tab: DetailTab) {
        self.detail_tabs.show(record_id, tab).await;
    }

    /// Make one registered result tab visible
    pub async fn show_result_tab(&self, step_id: &str) {
        self.results_tabs.show(step_id).await;
    }

    // ========================================
    // Query API
    // ========================================

    /// All finished research records, most recent first
    pub async fn research_history(&self) -> Vec<FinishedResearch> {
        self.history.records().await
    }

    /// The currently selected research record, if any
    pub async fn selected_research(&self) -> Option<FinishedResearch> {
        self.history.selected_record().await
    }

    /// Current detail panel contents
    pub async fn detail_panel(&self) -> Option<DetailPanel> {
        self.detail_tabs.panel().await
    }

    /// All registered result tabs, in completion order
    pub async fn result_tabs(&self) -> Vec<ResultTab> {
        self.results_tabs.tabs().await
    }

    /// Step id of the visible result tab
    pub async fn visible_result_tab(&self) -> Option<String> {
        self.results_tabs.visible_step().await
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::{
        DetailTab, FinishedResearch, ResearchWorkbench, ResearchWorkbenchBuilder, RunOutcome,
        WorkflowError, WorkflowResult, WorkflowUpdate,
    };
    pub use fundscout_core::{
        CancelToken, FundscoutConfig, ProjectMetadata, ResearchDatasets,
    };
}
