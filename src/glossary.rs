//! Glossary store - immutable, ordered collection of concepts
//!
//! Loaded once at startup from a CSV file with `Concept` and `Definition`
//! columns. Source order is preserved and concept names are unique.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ConceptError, Result};
use crate::types::ConceptEntry;

const CONCEPT_COLUMN: &str = "Concept";
const DEFINITION_COLUMN: &str = "Definition";

/// One CSV row; extra columns are ignored
#[derive(Debug, Deserialize)]
struct GlossaryRow {
    #[serde(rename = "Concept")]
    concept: String,
    #[serde(rename = "Definition")]
    definition: String,
}

/// Read-only glossary, indexed by position and by concept name
#[derive(Debug, Clone)]
pub struct GlossaryStore {
    entries: Vec<ConceptEntry>,
    index: HashMap<String, usize>,
}

impl GlossaryStore {
    /// Load the glossary from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| ConceptError::data_load(path, e))?;
        let store = Self::from_reader(file, path)?;
        info!("Loaded {} concepts from {}", store.size(), path.display());
        Ok(store)
    }

    /// Parse CSV from any reader; `origin` is only used in error messages
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| ConceptError::data_load(origin, e))?;
        for column in [CONCEPT_COLUMN, DEFINITION_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(ConceptError::data_load(
                    origin,
                    format!("missing required column '{}'", column),
                ));
            }
        }

        let mut entries = Vec::new();
        for (i, row) in csv_reader.deserialize::<GlossaryRow>().enumerate() {
            let row = row.map_err(|e| ConceptError::data_load(origin, format!("row {}: {}", i + 1, e)))?;
            if row.concept.is_empty() {
                return Err(ConceptError::data_load(origin, format!("row {}: empty concept name", i + 1)));
            }
            entries.push(ConceptEntry::new(row.concept, row.definition));
        }

        Self::build(entries).map_err(|reason| ConceptError::data_load(origin, reason))
    }

    /// Build a store from already-parsed entries
    pub fn from_entries(entries: Vec<ConceptEntry>) -> Result<Self> {
        Self::build(entries).map_err(|reason| ConceptError::data_load("<memory>", reason))
    }

    fn build(entries: Vec<ConceptEntry>) -> std::result::Result<Self, String> {
        if entries.is_empty() {
            return Err("glossary contains no concepts".to_string());
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if let Some(first) = index.insert(entry.concept.clone(), pos) {
                return Err(format!(
                    "duplicate concept '{}' in rows {} and {}",
                    entry.concept,
                    first + 1,
                    pos + 1
                ));
            }
        }

        debug!("Indexed {} glossary entries", entries.len());
        Ok(Self { entries, index })
    }

    /// Number of concepts
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// All entries in source order
    pub fn all(&self) -> &[ConceptEntry] {
        &self.entries
    }

    /// Look up a concept by exact name
    pub fn find(&self, concept: &str) -> Result<&ConceptEntry> {
        self.index
            .get(concept)
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| ConceptError::NotFound(concept.to_string()))
    }

    pub fn contains(&self, concept: &str) -> bool {
        self.index.contains_key(concept)
    }

    /// Case-insensitive substring match on concept titles, in source order.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&ConceptEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.concept.to_lowercase().contains(&needle))
            .collect()
    }
}
