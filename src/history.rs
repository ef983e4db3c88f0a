//! Shown-concept history - the only durable state
//!
//! A JSON object mapping ISO-8601 dates (`YYYY-MM-DD`) to concept names,
//! read fully and rewritten fully on every mutation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ConceptError, Result};

/// Date -> concept assignments, ordered by date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecord(BTreeMap<String, String>);

impl HistoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concept recorded for a date, if any
    pub fn get(&self, date: &str) -> Option<&str> {
        self.0.get(date).map(String::as_str)
    }

    pub fn insert(&mut self, date: impl Into<String>, concept: impl Into<String>) {
        self.0.insert(date.into(), concept.into());
    }

    /// Distinct concept names appearing as values
    pub fn shown_concepts(&self) -> HashSet<&str> {
        self.0.values().map(String::as_str).collect()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// (date, concept) pairs, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(d, c)| (d.as_str(), c.as_str()))
    }
}

impl<D: Into<String>, C: Into<String>> FromIterator<(D, C)> for HistoryRecord {
    fn from_iter<I: IntoIterator<Item = (D, C)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(d, c)| (d.into(), c.into())).collect())
    }
}

/// Durable storage for the history record
pub trait HistoryRepository: Send + Sync {
    /// Read the record. Absent storage is an empty record; unreadable or
    /// malformed storage is `HistoryLoad`.
    fn load(&self) -> Result<HistoryRecord>;

    /// Replace the stored record
    fn save(&self, record: &HistoryRecord) -> Result<()>;

    /// Where the record lives, for logs
    fn location(&self) -> String;
}

/// History kept in a JSON file, rewritten atomically
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl HistoryRepository for JsonFileHistory {
    fn load(&self) -> Result<HistoryRecord> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history at {}, starting empty", self.path.display());
                return Ok(HistoryRecord::new());
            }
            Err(e) => return Err(ConceptError::history_load(&self.path, e)),
        };

        serde_json::from_str(&contents).map_err(|e| ConceptError::history_load(&self.path, e))
    }

    fn save(&self, record: &HistoryRecord) -> Result<()> {
        let parent = self.parent_dir();
        std::fs::create_dir_all(parent).map_err(|e| ConceptError::history_save(&self.path, e))?;

        let temp_file = NamedTempFile::new_in(parent).map_err(|e| ConceptError::history_save(&self.path, e))?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, record)
                .map_err(|e| ConceptError::history_save(&self.path, e))?;
            writer.flush().map_err(|e| ConceptError::history_save(&self.path, e))?;
        }
        temp_file
            .persist(&self.path)
            .map_err(|e| ConceptError::history_save(&self.path, e.error))?;

        debug!("Saved {} history entries to {}", record.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process history, lost on exit. Counts writes.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    record: Mutex<HistoryRecord>,
    writes: AtomicUsize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: HistoryRecord) -> Self {
        Self {
            record: Mutex::new(record),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl HistoryRepository for MemoryHistory {
    fn load(&self) -> Result<HistoryRecord> {
        self.record
            .lock()
            .map(|r| r.clone())
            .map_err(|e| ConceptError::history_load("<memory>", e))
    }

    fn save(&self, record: &HistoryRecord) -> Result<()> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e| ConceptError::history_save("<memory>", e))?;
        *guard = record.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_shown_concepts() {
        let record: HistoryRecord = [("2025-01-01", "A"), ("2025-01-02", "B"), ("2025-01-03", "A")]
            .into_iter()
            .collect();
        assert_eq!(record.len(), 3);
        let shown = record.shown_concepts();
        assert_eq!(shown.len(), 2);
        assert!(shown.contains("A") && shown.contains("B"));
        assert_eq!(record.get("2025-01-02"), Some("B"));
        assert_eq!(record.get("2025-01-04"), None);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileHistory::new(dir.path().join("shown_history.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("shown_history.json");
        let repo = JsonFileHistory::new(&path);

        let mut record = HistoryRecord::new();
        record.insert("2025-03-01", "Roadmap");
        record.insert("2025-03-02", "Backlog");
        repo.save(&record).unwrap();

        assert_eq!(repo.load().unwrap(), record);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  \"2025-03-01\": \"Roadmap\""), "unexpected layout: {}", raw);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileHistory::new(dir.path().join("h.json"));

        let mut record = HistoryRecord::new();
        record.insert("2025-03-01", "Roadmap");
        repo.save(&record).unwrap();
        repo.save(&HistoryRecord::new()).unwrap();

        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h.json");
        let repo = JsonFileHistory::new(&path);

        for bad in ["[\"A\", \"B\"]", "{\"2025-01-01\": 3}", "not json", ""] {
            std::fs::write(&path, bad).unwrap();
            let err = repo.load().unwrap_err();
            assert!(matches!(err, ConceptError::HistoryLoad { .. }), "{:?} for {:?}", err, bad);
        }
    }

    #[test]
    fn test_existing_python_style_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, "{\n  \"2024-11-05\": \"North Star Metric\"\n}").unwrap();
        let record = JsonFileHistory::new(&path).load().unwrap();
        assert_eq!(record.get("2024-11-05"), Some("North Star Metric"));
    }

    #[test]
    fn test_memory_history_counts_writes() {
        let repo = MemoryHistory::new();
        assert_eq!(repo.write_count(), 0);
        let mut record = repo.load().unwrap();
        record.insert("2025-01-01", "A");
        repo.save(&record).unwrap();
        assert_eq!(repo.write_count(), 1);
        assert_eq!(repo.load().unwrap().get("2025-01-01"), Some("A"));
    }
}
