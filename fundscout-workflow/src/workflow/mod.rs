//! Staged workflow system
//!
//! This module drives the simulated multi-stage research pipeline:
//! - Advance a fixed sequence of named steps, one at a time
//! - Render each step's result data into a display fragment
//! - Accumulate result tabs as steps complete
//! - Archive the finished run into the history store

pub mod orchestrator;
pub mod render;
pub mod sequencer;
pub mod types;

pub use orchestrator::WorkflowOrchestrator;
pub use sequencer::{StepOutcome, StepSequencer};
pub use types::*;
