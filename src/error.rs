//! Error handling for kvma-jobs
//!
//! Defines the domain error kinds callers may want to match on and
//! establishes a unified Result type using anyhow for context chaining.

use thiserror::Error;

/// Core error types for a scraping run
#[derive(Error, Debug)]
pub enum JobsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing credential: {0} must be set")]
    MissingCredential(&'static str),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scraping operations
pub type Result<T> = anyhow::Result<T>;
