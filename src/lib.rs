//! Daily Concept - glossary concept of the day
//!
//! A small service with:
//! - A read-only glossary loaded from CSV
//! - A daily selector that never repeats a concept until all have been shown
//! - A JSON file recording which concept was shown on which day
//! - An HTTP surface with a daily page, a library page and a JSON API
//!
//! # Example
//!
//! ```ignore
//! use daily_concept::{DailySelector, GlossaryStore, JsonFileHistory};
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(GlossaryStore::load("PM_Glossary_Fixed.csv")?);
//!     let history = Arc::new(JsonFileHistory::new("shown_history.json"));
//!     let selector = DailySelector::new(store, history);
//!     println!("{}", selector.today_concept_now()?);
//!     Ok(())
//! }
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod types;
pub mod error;
pub mod glossary;
pub mod history;
pub mod selector;

// Application modules
pub mod config;
pub mod server;
pub mod cli;

// Re-export commonly used types for convenience
pub use types::ConceptEntry;
pub use error::{ConceptError, Result};
pub use glossary::GlossaryStore;
pub use history::{HistoryRecord, HistoryRepository, JsonFileHistory, MemoryHistory};
pub use selector::DailySelector;
pub use config::Config;
pub use server::{ServerState, router, start as start_server};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Glossary concept of the day", NAME, VERSION)
}
