use crate::{ManifestRecord, TabId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the candidate manifest URL and report back via
    /// `Msg::FetchCompleted`.
    FetchCandidate {
        tab_id: TabId,
        page_url: String,
        candidate_url: String,
    },
    /// Apply the found/not-found icon set to the tab's action button.
    SetIcon { tab_id: TabId, found: bool },
    /// Write the given history snapshot to durable storage.
    PersistHistory(Vec<ManifestRecord>),
}
