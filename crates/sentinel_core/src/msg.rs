use crate::{Classification, Settings, TabId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A page finished loading in a tab.
    NavigationCompleted { tab_id: TabId, page_url: String },
    /// The user switched to a tab; never triggers a re-fetch.
    TabActivated { tab_id: TabId, page_url: String },
    /// A tab was closed.
    TabRemoved { tab_id: TabId },
    /// A candidate fetch issued by `Effect::FetchCandidate` resolved.
    FetchCompleted {
        tab_id: TabId,
        /// Page URL the detection was started for; results for a superseded
        /// navigation are discarded.
        page_url: String,
        candidate_url: String,
        classification: Classification,
    },
    /// Settings were saved by the configuration collaborator.
    SettingsChanged(Settings),
    /// The user asked for the history to be emptied.
    HistoryCleared,
}
