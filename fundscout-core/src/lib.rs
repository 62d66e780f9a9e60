//! Fundscout Core - Core data structures and shared infrastructure
//!
//! This module defines the foundational abstractions for the fundscout
//! system: error handling, logging, configuration, cancellation utilities,
//! and the input data types supplied by external collaborators.

pub mod async_utils;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use async_utils::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tokio;
pub use tracing;
