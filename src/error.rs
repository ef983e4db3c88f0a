//! Error types for the glossary, history and selector

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the core. None of them are transient; each one
/// points at bad static data or bad persisted state.
#[derive(Debug, Error)]
pub enum ConceptError {
    /// Glossary source missing, malformed or missing required fields
    #[error("failed to load glossary from {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    /// Persisted history unreadable or not a date -> concept object
    #[error("failed to load history from {path}: {reason}")]
    HistoryLoad { path: PathBuf, reason: String },

    /// Persisted history could not be written back
    #[error("failed to save history to {path}: {reason}")]
    HistorySave { path: PathBuf, reason: String },

    /// Concept name absent from the glossary
    #[error("concept not found: {0}")]
    NotFound(String),

    /// History refers to a concept the glossary no longer contains
    #[error("history entry for {date} refers to unknown concept '{concept}'")]
    InconsistentState { date: String, concept: String },
}

impl ConceptError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DataLoad { path: path.into(), reason: reason.to_string() }
    }

    pub(crate) fn history_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::HistoryLoad { path: path.into(), reason: reason.to_string() }
    }

    pub(crate) fn history_save(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::HistorySave { path: path.into(), reason: reason.to_string() }
    }

    /// Whether the caller asked for something that does not exist, as
    /// opposed to a server-side fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ConceptError>;
