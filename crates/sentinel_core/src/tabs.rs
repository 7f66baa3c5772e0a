use std::collections::HashMap;

use crate::ManifestRecord;

pub type TabId = u64;

/// Ephemeral per-tab cache of the manifest currently believed to match the
/// page loaded in that tab. Entries live only while the owning tab is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabStateStore {
    entries: HashMap<TabId, ManifestRecord>,
}

impl TabStateStore {
    pub fn set(&mut self, tab_id: TabId, record: ManifestRecord) {
        self.entries.insert(tab_id, record);
    }

    pub fn get(&self, tab_id: TabId) -> Option<&ManifestRecord> {
        self.entries.get(&tab_id)
    }

    pub fn clear(&mut self, tab_id: TabId) {
        self.entries.remove(&tab_id);
    }
}
