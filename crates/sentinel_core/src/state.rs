use std::collections::HashMap;

use crate::{HistoryList, ManifestRecord, Settings, TabId, TabStateStore};

/// Shared coordinator state: the durable history, the ephemeral per-tab
/// cache, the active settings, and each tab's current page URL.
///
/// All mutation flows through [`crate::update`], so every read-modify-write
/// of the history is serialized on the single message queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorState {
    history: HistoryList,
    tabs: TabStateStore,
    settings: Settings,
    current_urls: HashMap<TabId, String>,
}

impl Default for CoordinatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatorState {
    pub fn new() -> Self {
        Self::restore(Vec::new(), Settings::default())
    }

    /// Rebuilds the state from persisted history and settings.
    pub fn restore(history: Vec<ManifestRecord>, settings: Settings) -> Self {
        let settings = settings.clamped();
        Self {
            history: HistoryList::from_records(history, settings.history_count),
            tabs: TabStateStore::default(),
            settings,
            current_urls: HashMap::new(),
        }
    }

    /// Answers the `get-tab-data` query.
    pub fn tab_data(&self, tab_id: TabId) -> Option<&ManifestRecord> {
        self.tabs.get(tab_id)
    }

    pub fn history(&self) -> &HistoryList {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn history_mut(&mut self) -> &mut HistoryList {
        &mut self.history
    }

    pub(crate) fn tabs(&self) -> &TabStateStore {
        &self.tabs
    }

    pub(crate) fn tabs_mut(&mut self) -> &mut TabStateStore {
        &mut self.tabs
    }

    pub(crate) fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub(crate) fn set_current_url(&mut self, tab_id: TabId, page_url: String) {
        self.current_urls.insert(tab_id, page_url);
    }

    pub(crate) fn current_url(&self, tab_id: TabId) -> Option<&str> {
        self.current_urls.get(&tab_id).map(String::as_str)
    }

    pub(crate) fn remove_tab(&mut self, tab_id: TabId) {
        self.tabs.clear(tab_id);
        self.current_urls.remove(&tab_id);
    }
}
