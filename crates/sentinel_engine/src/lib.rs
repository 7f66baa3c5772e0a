//! Sentinel engine: candidate fetches and durable-state persistence primitives.
mod engine;
mod fetch;
mod persist;
mod types;

pub use engine::EngineHandle;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, FailureKind, FetchError, FetchedResponse, TabId};
