//! Tab controllers for the results panel and the history detail view
//!
//! Both controllers own their state behind async locks so the display
//! surface can issue commands at any time, including while a workflow run
//! is suspended, without blocking the orchestrator.

pub mod detail;
pub mod results;

pub use detail::{DetailPanel, DetailTab, DetailTabController};
pub use results::ResultsTabController;
