//! Shared utilities for the upload gateway backend services

// Re-export common dependencies
pub use thiserror;
pub use tracing;

pub mod observability;
