//! Error types for the RuleChef coordination core
//!
//! This module provides error handling using thiserror for structured error
//! definitions and anyhow for propagation out of external collaborators.

use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for RuleChef operations
#[derive(Error, Debug)]
pub enum RuleChefError {
    /// Operation exists only to show the interface shape
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The external rule synthesizer failed
    #[error("Rule synthesis failed: {0}")]
    Synthesis(String),

    /// The external span extractor failed
    #[error("Span extraction failed: {0}")]
    Extraction(String),

    /// A collaborator did not answer in time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl RuleChefError {
    /// Shorthand for the placeholder coordinator's failure
    pub fn not_implemented(what: impl Into<String>) -> Self {
        RuleChefError::NotImplemented(what.into())
    }

    /// True for the `NotImplemented` kind
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, RuleChefError::NotImplemented(_))
    }
}

/// Result type alias for RuleChef operations
pub type Result<T> = std::result::Result<T, RuleChefError>;

/// Convert anyhow::Error to RuleChefError
impl From<anyhow::Error> for RuleChefError {
    fn from(err: anyhow::Error) -> Self {
        RuleChefError::Other(err.to_string())
    }
}
