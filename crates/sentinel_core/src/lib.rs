//! Sentinel core: pure detection state machine and cache stores.
mod classify;
mod effect;
mod history;
mod msg;
mod resolve;
mod settings;
mod state;
mod tabs;
mod update;

pub use classify::{classify, Classification};
pub use effect::Effect;
pub use history::{HistoryList, ManifestRecord};
pub use msg::Msg;
pub use resolve::{candidate_manifest_url, domain};
pub use settings::{Settings, HISTORY_COUNT_MAX, HISTORY_COUNT_MIN};
pub use state::CoordinatorState;
pub use tabs::{TabId, TabStateStore};
pub use update::update;
