//! Results panel tabs accumulated during a workflow run

use tokio::sync::RwLock;
use tracing::debug;

use crate::workflow::types::ResultTab;

#[derive(Debug, Default)]
struct ResultsState {
    /// Registration order equals completion order equals sequence order
    tabs: Vec<ResultTab>,
    visible: Option<String>,
}

/// Owns the set of result tabs and which one is currently visible.
///
/// Visibility is single-selection over the currently registered set. A newly
/// registered tab becomes the visible one (last-registered-wins), even if
/// the user is viewing an earlier tab; this steal-focus behavior matches the
/// reference design and is preserved as documented.
#[derive(Debug, Default)]
pub struct ResultsTabController {
    inner: RwLock<ResultsState>,
}

impl ResultsTabController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab and make it the visible one
    pub async fn register(&self, tab: ResultTab) {
        let mut state = self.inner.write().await;
        debug!(step_id = %tab.step_id, label = %tab.label, "Result tab registered");
        state.visible = Some(tab.step_id.clone());
        state.tabs.push(tab);
    }

    /// Make exactly one registered tab visible. Unknown step ids leave the
    /// current visibility unchanged.
    pub async fn show(&self, step_id: &str) {
        let mut state = self.inner.write().await;
        if state.tabs.iter().any(|t| t.step_id == step_id) {
            state.visible = Some(step_id.to_string());
        } else {
            debug!(step_id, "Ignoring show of unregistered result tab");
        }
    }

    /// Step id of the visible tab, if any tab is registered
    pub async fn visible_step(&self) -> Option<String> {
        self.inner.read().await.visible.clone()
    }

    /// All registered tabs, in registration order
    pub async fn tabs(&self) -> Vec<ResultTab> {
        self.inner.read().await.tabs.clone()
    }
}
