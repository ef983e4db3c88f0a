//! Daily selector - picks today's concept without repeats
//!
//! Each calendar day gets one concept. A concept is not shown again until
//! every concept in the glossary has had its day; then the history resets
//! and a new cycle begins.
//!
//! The reset check runs before the same-day lookup on every call. A day
//! recorded in a cycle that has since been exhausted is therefore dropped
//! and re-picked on its next visit.

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info, warn};

use crate::error::{ConceptError, Result};
use crate::glossary::GlossaryStore;
use crate::history::{HistoryRecord, HistoryRepository};
use crate::types::ConceptEntry;

/// Date format used for history keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct DailySelector {
    store: Arc<GlossaryStore>,
    history: Arc<dyn HistoryRepository>,
    /// Held for the whole load-mutate-persist cycle, so two first visits
    /// of the same day cannot both pick and save.
    rng: Mutex<StdRng>,
}

impl DailySelector {
    /// Create a selector with an OS-seeded random source
    pub fn new(store: Arc<GlossaryStore>, history: Arc<dyn HistoryRepository>) -> Self {
        Self::with_rng(store, history, StdRng::from_os_rng())
    }

    /// Create a selector with a caller-supplied random source
    pub fn with_rng(store: Arc<GlossaryStore>, history: Arc<dyn HistoryRepository>, rng: StdRng) -> Self {
        Self {
            store,
            history,
            rng: Mutex::new(rng),
        }
    }

    /// Today's concept by the process-local calendar
    pub fn today_concept_now(&self) -> Result<ConceptEntry> {
        self.today_concept(Local::now().date_naive())
    }

    /// Concept for `today`, picking and recording one on the first visit
    pub fn today_concept(&self, today: NaiveDate) -> Result<ConceptEntry> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let date = today.format(DATE_FORMAT).to_string();

        let mut history = self.history.load().inspect_err(|e| {
            error!("Refusing to select a concept for {}: {}", date, e);
        })?;

        let shown_count = history.shown_concepts().len();
        if shown_count >= self.store.size() {
            info!(
                "All {} concepts shown across {} days, starting a new cycle",
                self.store.size(),
                history.len()
            );
            history.clear();
        }

        if let Some(concept) = history.get(&date) {
            debug!("Concept for {} already recorded: {}", date, concept);
            return self.store.find(concept).cloned().map_err(|_| {
                error!("History for {} names '{}', which is not in the glossary", date, concept);
                ConceptError::InconsistentState {
                    date: date.clone(),
                    concept: concept.to_string(),
                }
            });
        }

        let picked = self.pick_unshown(&history, &mut rng).ok_or_else(|| ConceptError::InconsistentState {
            date: date.clone(),
            concept: "<none available>".to_string(),
        })?;

        history.insert(date.as_str(), picked.concept.as_str());
        self.history.save(&history)?;

        info!(
            "Selected '{}' for {} ({} of {} in this cycle)",
            picked.concept,
            date,
            history.shown_concepts().len(),
            self.store.size()
        );
        Ok(picked)
    }

    /// Uniform pick among glossary entries not yet shown in this cycle.
    /// Names in history that the glossary no longer has still count as
    /// shown, so the pool is never empty after the reset check.
    fn pick_unshown(&self, history: &HistoryRecord, rng: &mut StdRng) -> Option<ConceptEntry> {
        let shown = history.shown_concepts();
        let stale = shown.iter().filter(|c| !self.store.contains(c)).count();
        if stale > 0 {
            warn!("{} concept(s) in history at {} are not in the glossary", stale, self.history.location());
        }

        let available: Vec<&ConceptEntry> = self
            .store
            .all()
            .iter()
            .filter(|e| !shown.contains(e.concept.as_str()))
            .collect();

        available.choose(rng).map(|e| (*e).clone())
    }

    /// Every concept in source order. No history access.
    pub fn list_all(&self) -> &[ConceptEntry] {
        self.store.all()
    }

    pub fn find(&self, concept: &str) -> Result<&ConceptEntry> {
        self.store.find(concept)
    }

    pub fn store(&self) -> &GlossaryStore {
        &self.store
    }

    /// Current persisted history, as stored (no reset applied)
    pub fn history_snapshot(&self) -> Result<HistoryRecord> {
        let _guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.history.load()
    }

    /// Concepts already shown in the current cycle
    pub fn shown_in_cycle(&self) -> Result<HashSet<String>> {
        let record = self.history_snapshot()?;
        let shown: HashSet<String> = record.shown_concepts().into_iter().map(str::to_string).collect();
        if shown.len() >= self.store.size() {
            return Ok(HashSet::new());
        }
        Ok(shown)
    }
}
