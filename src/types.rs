//! Shared types used across modules
//!
//! This module contains types that are used by the glossary, the selector
//! and the server to avoid circular dependencies.

use serde::{Deserialize, Serialize};

/// A single glossary entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConceptEntry {
    /// Unique title of the concept, used as the history key
    pub concept: String,
    /// Human-readable definition
    pub definition: String,
}

impl ConceptEntry {
    pub fn new(concept: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            definition: definition.into(),
        }
    }
}

impl std::fmt::Display for ConceptEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.concept, self.definition)
    }
}
