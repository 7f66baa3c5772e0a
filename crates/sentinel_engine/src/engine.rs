use std::sync::{mpsc, Arc};
use std::thread;

use sentinel_logging::{sentinel_debug, sentinel_error};

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineEvent, TabId};

enum EngineCommand {
    Detect {
        tab_id: TabId,
        page_url: String,
        candidate_url: String,
    },
}

/// Handle to the detection engine: a dedicated thread owning a tokio runtime
/// that runs candidate fetches and reports each completion as an
/// [`EngineEvent`] on the returned receiver.
///
/// In-flight detections are never cancelled; a superseding navigation simply
/// starts a new one and the coordinator discards the stale result.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> (Self, mpsc::Receiver<EngineEvent>) {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    /// Builds the engine around an injected fetcher. Tests use this to avoid
    /// real network traffic.
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    sentinel_error!("failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn detect(
        &self,
        tab_id: TabId,
        page_url: impl Into<String>,
        candidate_url: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Detect {
            tab_id,
            page_url: page_url.into(),
            candidate_url: candidate_url.into(),
        });
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Detect {
            tab_id,
            page_url,
            candidate_url,
        } => {
            sentinel_debug!("detect tab={} candidate={}", tab_id, candidate_url);
            let result = fetcher.fetch(&candidate_url).await;
            let _ = event_tx.send(EngineEvent::DetectionCompleted {
                tab_id,
                page_url,
                candidate_url,
                result,
            });
        }
    }
}
