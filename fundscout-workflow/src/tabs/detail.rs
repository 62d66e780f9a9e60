//! Detail tabs for the currently selected history record

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::history::HistoryStore;
use crate::workflow::types::Fragment;

/// One of the three fixed facets shown for a selected history record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Context,
    Opportunities,
    Report,
}

/// The three facet slots rendered for the selected record, plus which
/// facet's button is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub record_id: i64,
    pub context: Fragment,
    pub opportunities: Fragment,
    pub report: Fragment,
    pub active_tab: DetailTab,
}

/// Owns which detail tab is shown for the currently selected history record
#[derive(Debug)]
pub struct DetailTabController {
    history: Arc<HistoryStore>,
    panel: RwLock<Option<DetailPanel>>,
}

impl DetailTabController {
    pub fn new(history: Arc<HistoryStore>) -> Self {
        Self {
            history,
            panel: RwLock::new(None),
        }
    }

    /// Render the three facets of `record_id` into the panel slots and
    /// activate `tab`. If the record cannot be resolved the call is a
    /// no-op: no partial render, prior panel content stays untouched.
    ///
    /// Switching tabs on the already-shown record is a pure visibility
    /// change; the record's fragments are not fetched again.
    pub async fn show(&self, record_id: i64, tab: DetailTab) {
        {
            let mut panel = self.panel.write().await;
            if let Some(current) = panel.as_mut() {
                if current.record_id == record_id {
                    current.active_tab = tab;
                    return;
                }
            }
        }

        let Some(record) = self.history.find(record_id).await else {
            debug!(record_id, "Ignoring detail view of unknown history record");
            return;
        };

        let mut panel = self.panel.write().await;
        *panel = Some(DetailPanel {
            record_id,
            context: record.context_fragment,
            opportunities: record.opportunities_fragment,
            report: record.report_fragment,
            active_tab: tab,
        });
    }

    /// Show `record_id` with the default facet; selection changes always
    /// land on the context tab first
    pub async fn select(&self, record_id: i64) {
        self.show(record_id, DetailTab::Context).await;
    }

    /// Current panel contents, if any record has been shown
    pub async fn panel(&self) -> Option<DetailPanel> {
        self.panel.read().await.clone()
    }

    /// Currently active facet, if a record is shown
    pub async fn active_tab(&self) -> Option<DetailTab> {
        self.panel.read().await.as_ref().map(|p| p.active_tab)
    }
}
