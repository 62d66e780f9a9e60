//! Core data type definitions
//!
//! The input data supplied by the excluded collaborators: project metadata
//! from the metadata provider and the per-step datasets from the dataset
//! provider. These are read once at load and stay immutable for a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project metadata, read once at load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Full project title
    pub title: String,
    /// Long-form description
    pub description: String,
    /// Concise summary used on history cards
    pub summary: String,
    /// Keyword tags
    pub keywords: Vec<String>,
    /// Project creation date
    pub created_at: DateTime<Utc>,
}

/// A single context item found during the search stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// An identified funding opportunity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Originating program or institution
    pub origin: String,
    pub description: String,
    /// Type of financing offered (grant, national funding, ...)
    pub financing_type: String,
    /// Application deadline as published by the source
    pub application_deadline: String,
}

/// Reference to a generated report artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportReference {
    /// Location of the report artifact
    pub url: String,
    /// Display name of the report file
    pub file_name: String,
}

/// The three per-step datasets supplied by the dataset provider,
/// static for the duration of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchDatasets {
    pub context_items: Vec<ContextItem>,
    pub opportunities: Vec<Opportunity>,
    pub report: ReportReference,
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundscoutConfig {
    pub workflow: WorkflowTimings,
    pub logging: crate::logging::LoggingConfig,
}

/// Simulated latency configuration for the staged workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTimings {
    /// Simulated duration of the query-generation step
    pub queries_ms: u64,
    /// Simulated duration of the search step
    pub search_ms: u64,
    /// Simulated duration of the opportunity-identification step
    pub identification_ms: u64,
    /// Simulated duration of the report-generation step
    pub report_ms: u64,
    /// Cosmetic pause between the last step and archiving the run
    pub settle_delay_ms: u64,
}
