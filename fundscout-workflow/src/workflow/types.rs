//! Types for the staged workflow system

use fundscout_core::{ContextItem, Opportunity, ReportReference, ResearchDatasets, WorkflowTimings};
use serde::{Deserialize, Serialize};

use super::render;

/// One stage of the simulated pipeline, immutable for the run's lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Unique step identifier
    pub id: String,
    /// Display name for the step
    pub name: String,
    /// Simulated latency before the step completes
    pub duration_ms: u64,
    /// Whether this step's result earns a tab in the results panel
    pub tab_worthy: bool,
    /// Input data for the step's render function
    pub payload: StepPayload,
}

/// Per-step input data, variant by step kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepPayload {
    /// Fixed narrative shown while a step has no artifact of its own
    Status(String),
    /// Context items found by the search stage
    ContextItems(Vec<ContextItem>),
    /// Identified funding opportunities
    Opportunities(Vec<Opportunity>),
    /// Reference to the generated report
    Report(ReportReference),
}

impl StepPayload {
    /// Render this payload to a display fragment. Pure: the same payload
    /// always yields the same fragment, safe to re-invoke for history replay.
    pub fn render(&self) -> Fragment {
        match self {
            StepPayload::Status(text) => render::render_status(text),
            StepPayload::ContextItems(items) => render::render_context_items(items),
            StepPayload::Opportunities(opportunities) => {
                render::render_opportunities(opportunities)
            }
            StepPayload::Report(report) => render::render_report_link(report),
        }
    }
}

/// Visual state of a step, transitions strictly forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepState {
    Pending,
    Active,
    Completed,
}

/// A renderable representation of a step's or record's data, opaque to the
/// orchestration core beyond being produced and consumed as a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// What kind of artifact this fragment displays
    pub kind: FragmentKind,
    /// Rendered body, ready for the display surface
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FragmentKind {
    Status,
    ContextItems,
    Opportunities,
    Report,
}

/// A result tab accumulated in the results panel as steps complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTab {
    pub step_id: String,
    pub label: String,
    pub fragment: Fragment,
}

/// The immutable record produced by one completed workflow run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedResearch {
    /// Unique, time-derived identifier
    pub id: i64,
    /// Full project title
    pub title: String,
    /// Concise summary for the history card
    pub summary: String,
    /// Date shown on the history card
    pub date: chrono::DateTime<chrono::Utc>,
    /// Number of opportunities identified by the run
    pub opportunities_count: usize,
    /// Context facet, pre-rendered at completion
    pub context_fragment: Fragment,
    /// Opportunities facet, pre-rendered at completion
    pub opportunities_fragment: Fragment,
    /// Report facet, pre-rendered at completion
    pub report_fragment: Fragment,
}

/// Overall orchestrator state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    NotStarted,
    Running,
    Finished,
}

/// Outcome of a workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run completed and was archived under this history record
    Finished { record_id: i64 },
    /// The run was cancelled before completion; nothing was archived
    Cancelled,
}

/// Progress updates broadcast to the display surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkflowUpdate {
    StepStarted { step_id: String, name: String },
    StepCompleted { step_id: String },
    TabRegistered { step_id: String },
    Finished { record_id: i64 },
    Cancelled { step_id: Option<String> },
}

impl WorkflowStep {
    /// The standard four-step research pipeline: query generation, search,
    /// opportunity identification, report generation. Only the first step
    /// is excluded from the results tabs.
    pub fn standard_pipeline(
        datasets: &ResearchDatasets,
        timings: &WorkflowTimings,
    ) -> Vec<WorkflowStep> {
        vec![
            WorkflowStep {
                id: "queries".to_string(),
                name: "Queries".to_string(),
                duration_ms: timings.queries_ms,
                tab_worthy: false,
                payload: StepPayload::Status(
                    "Generating smart queries from the project objective...".to_string(),
                ),
            },
            WorkflowStep {
                id: "search".to_string(),
                name: "Results".to_string(),
                duration_ms: timings.search_ms,
                tab_worthy: true,
                payload: StepPayload::ContextItems(datasets.context_items.clone()),
            },
            WorkflowStep {
                id: "identification".to_string(),
                name: "Opportunities".to_string(),
                duration_ms: timings.identification_ms,
                tab_worthy: true,
                payload: StepPayload::Opportunities(datasets.opportunities.clone()),
            },
            WorkflowStep {
                id: "report".to_string(),
                name: "Report".to_string(),
                duration_ms: timings.report_ms,
                tab_worthy: true,
                payload: StepPayload::Report(datasets.report.clone()),
            },
        ]
    }
}
