//! Error handling for the Flow Canvas editor
//!
//! Live editing never fails: invalid pointer gestures and unknown ids are
//! absorbed as no-ops by the graph store and the interaction controller.
//! The types here cover the remaining fallible surfaces: configuration and
//! document IO, blueprint validation and graph import.

use thiserror::Error;

use crate::blueprint::BlueprintError;
use crate::graph::GraphError;

/// Main error type for Flow Canvas operations
#[derive(Error, Debug)]
pub enum FlowCanvasError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// A blueprint failed validation or could not be parsed
    #[error("Blueprint error: {0}")]
    Blueprint(#[from] BlueprintError),

    /// An imported graph violated a graph invariant
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FlowCanvasError>,
    },
}

impl FlowCanvasError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FlowCanvasError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for FlowCanvasError {
    fn from(err: serde_json::Error) -> Self {
        FlowCanvasError::Serialization(err.to_string())
    }
}

/// Result type alias for Flow Canvas operations
pub type Result<T> = std::result::Result<T, FlowCanvasError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<FlowCanvasError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Into::<FlowCanvasError>::into(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Into::<FlowCanvasError>::into(e).with_context(f()))
    }
}
