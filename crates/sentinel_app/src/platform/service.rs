//! The host service: owns the coordinator state, pumps events through the
//! pure update function, and executes the resulting effects.
//!
//! Events arrive on one mpsc queue from three producers (the stdin shim, the
//! engine pump, and protocol commands), so every history read-modify-write is
//! serialized through a single consumer thread.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use sentinel_core::{classify, update, Classification, CoordinatorState, Effect, Msg, Settings};
use sentinel_engine::{EngineEvent, EngineHandle, FetchSettings};
use sentinel_logging::{sentinel_info, sentinel_warn};
use serde::Deserialize;

use super::icons::{IconPresenter, StdioIconPresenter};
use super::logging::{self, LogDestination};
use super::persistence::StateStore;
use crate::protocol::{
    HistoryEntryDto, Request, Response, SettingsDto, TabDataDto, TabEvent,
};

/// One unit of work for the service loop.
pub enum ServiceInput {
    /// A coordinator message: tab lifecycle event or detection completion.
    Event(Msg),
    /// A protocol request with a callback delivering the response.
    Request {
        request: Request,
        respond: Box<dyn FnOnce(Response) + Send>,
    },
    /// Stop the service loop. Needed explicitly: the engine pump holds an
    /// input sender for as long as the service holds the engine handle, so
    /// the loop would never see a disconnect on its own.
    Shutdown,
}

pub struct Service {
    state: CoordinatorState,
    engine: EngineHandle,
    icons: Arc<dyn IconPresenter>,
    store: StateStore,
}

impl Service {
    pub fn new(store: StateStore, engine: EngineHandle, icons: Arc<dyn IconPresenter>) -> Self {
        let state = CoordinatorState::restore(store.load_history(), store.load_settings());
        Self {
            state,
            engine,
            icons,
            store,
        }
    }

    /// Processes inputs until shutdown or until every producer has hung up.
    pub fn run(mut self, inputs: mpsc::Receiver<ServiceInput>) {
        while let Ok(input) = inputs.recv() {
            match input {
                ServiceInput::Event(msg) => self.dispatch(msg),
                ServiceInput::Request { request, respond } => {
                    respond(self.handle_request(request));
                }
                ServiceInput::Shutdown => break,
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchCandidate {
                tab_id,
                page_url,
                candidate_url,
            } => self.engine.detect(tab_id, page_url, candidate_url),
            Effect::SetIcon { tab_id, found } => self.icons.apply(tab_id, found),
            Effect::PersistHistory(records) => self.store.save_history(&records),
        }
    }

    fn handle_request(&mut self, request: Request) -> Response {
        match request {
            Request::GetTabData { tab_id } => Response::TabData(
                self.state
                    .tab_data(tab_id)
                    .map(TabDataDto::found)
                    .unwrap_or_else(TabDataDto::not_found),
            ),
            Request::GetHistory => Response::History(
                self.state
                    .history()
                    .list()
                    .iter()
                    .map(HistoryEntryDto::from)
                    .collect(),
            ),
            Request::GetSettings => Response::Settings(SettingsDto::from(self.state.settings())),
            Request::SaveSettings { settings } => {
                let settings = Settings::from(settings).clamped();
                self.store.save_settings(&settings);
                self.dispatch(Msg::SettingsChanged(settings));
                Response::Ack { success: true }
            }
            Request::ClearHistory => {
                self.dispatch(Msg::HistoryCleared);
                Response::Ack { success: true }
            }
        }
    }
}

/// Maps engine completions into coordinator messages, classifying the
/// response on the way. Transport failures (network, timeout, oversized
/// body) all read as "no manifest here".
pub fn spawn_engine_pump(
    events: mpsc::Receiver<EngineEvent>,
    input_tx: mpsc::Sender<ServiceInput>,
) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            let EngineEvent::DetectionCompleted {
                tab_id,
                page_url,
                candidate_url,
                result,
            } = event;
            let classification = match result {
                Ok(response) => classify(
                    response.status,
                    response.content_type.as_deref(),
                    &response.body,
                ),
                Err(err) => {
                    sentinel_info!(
                        "detection for {} failed ({}): treating as absent",
                        candidate_url,
                        err.kind
                    );
                    Classification::Absent
                }
            };
            let sent = input_tx.send(ServiceInput::Event(Msg::FetchCompleted {
                tab_id,
                page_url,
                candidate_url,
                classification,
            }));
            if sent.is_err() {
                return;
            }
        }
    });
}

/// A line read from the hosting shim: either a tab event or a protocol
/// request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HostInput {
    Event(TabEvent),
    Request(Request),
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<ServiceInput>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    sentinel_warn!("failed to read host input: {}", err);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let input = match serde_json::from_str::<HostInput>(&line) {
                Ok(input) => input,
                Err(err) => {
                    sentinel_warn!("unrecognized host input {:?}: {}", line, err);
                    continue;
                }
            };
            let sent = match input {
                HostInput::Event(event) => input_tx.send(ServiceInput::Event(event.into())),
                HostInput::Request(request) => input_tx.send(ServiceInput::Request {
                    request,
                    respond: Box::new(write_response),
                }),
            };
            if sent.is_err() {
                return;
            }
        }
        // Stdin closed: the hosting shim is gone.
        let _ = input_tx.send(ServiceInput::Shutdown);
    });
}

fn write_response(response: Response) {
    let line = match serde_json::to_string(&response) {
        Ok(line) => line,
        Err(err) => {
            sentinel_warn!("failed to serialize response: {}", err);
            return;
        }
    };
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if let Err(err) = writeln!(handle, "{}", line) {
        sentinel_warn!("failed to write response: {}", err);
    }
}

fn state_dir() -> PathBuf {
    match std::env::var_os("SENTINEL_STATE_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("sentinel_state"),
    }
}

/// Entry point: wires stdin, engine, and persistence to the service loop
/// and blocks until stdin closes.
pub fn run_service() {
    logging::initialize(LogDestination::File);

    let store = StateStore::new(state_dir());
    let (engine, engine_events) = EngineHandle::new(FetchSettings::default());
    let (input_tx, input_rx) = mpsc::channel();

    spawn_engine_pump(engine_events, input_tx.clone());
    spawn_stdin_reader(input_tx);

    sentinel_info!("sentinel service started");
    Service::new(store, engine, Arc::new(StdioIconPresenter)).run(input_rx);
    sentinel_info!("sentinel service stopped");
}
