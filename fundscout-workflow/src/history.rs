//! History of finished research records
//!
//! An in-memory, prepend-ordered collection: most recent run first. Records
//! are immutable once inserted and never removed, so the selection can never
//! dangle. Selecting an unknown id is a silent no-op; UI selection errors
//! are non-fatal by design.

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::workflow::types::FinishedResearch;

#[derive(Debug, Default)]
struct HistoryState {
    /// Reverse insertion order: index 0 is the most recent run
    records: Vec<FinishedResearch>,
    /// At most one record is selected at any time
    selected: Option<i64>,
}

/// Append-only store of finished research records with single selection
#[derive(Debug, Default)]
pub struct HistoryStore {
    inner: RwLock<HistoryState>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record and return it. Time-derived ids can collide when
    /// runs archive within the same millisecond, so the id is bumped until
    /// unique before insertion.
    pub async fn insert(&self, mut record: FinishedResearch) -> FinishedResearch {
        let mut state = self.inner.write().await;
        while state.records.iter().any(|r| r.id == record.id) {
            record.id += 1;
        }
        info!(record_id = record.id, title = %record.title, "Archiving finished research");
        state.records.insert(0, record.clone());
        record
    }

    /// Look up a record by id
    pub async fn find(&self, id: i64) -> Option<FinishedResearch> {
        let state = self.inner.read().await;
        state.records.iter().find(|r| r.id == id).cloned()
    }

    /// Select a record; selecting one deselects all others. Unknown ids
    /// leave the current selection unchanged.
    pub async fn select(&self, id: i64) {
        let mut state = self.inner.write().await;
        if state.records.iter().any(|r| r.id == id) {
            debug!(record_id = id, "History record selected");
            state.selected = Some(id);
        } else {
            debug!(record_id = id, "Ignoring selection of unknown history record");
        }
    }

    /// Id of the currently selected record, if any
    pub async fn selected(&self) -> Option<i64> {
        self.inner.read().await.selected
    }

    /// The currently selected record, if any
    pub async fn selected_record(&self) -> Option<FinishedResearch> {
        let state = self.inner.read().await;
        state
            .selected
            .and_then(|id| state.records.iter().find(|r| r.id == id).cloned())
    }

    /// All records, most recent first
    pub async fn records(&self) -> Vec<FinishedResearch> {
        self.inner.read().await.records.clone()
    }
}
