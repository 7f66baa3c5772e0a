//! Durable storage for history and settings.
//!
//! Each key lives in its own RON file and is replaced atomically, so a
//! history write can never corrupt the settings and vice versa. Loading is
//! soft-fail: a missing or unreadable file yields defaults. Saving logs the
//! failure and returns, leaving the previous file intact.

use std::fs;
use std::path::{Path, PathBuf};

use sentinel_core::{ManifestRecord, Settings};
use sentinel_engine::AtomicFileWriter;
use sentinel_logging::{sentinel_error, sentinel_info, sentinel_warn};
use serde::{Deserialize, Serialize};

const HISTORY_FILENAME: &str = "history.ron";
const SETTINGS_FILENAME: &str = "settings.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedRecord {
    url: String,
    domain: String,
    content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedHistory {
    entries: Vec<PersistedRecord>,
}

/// Each field falls back to its default individually, so a file written by
/// an older build that knew fewer settings still loads the values it has.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSettings {
    #[serde(default = "default_history_count")]
    history_count: usize,
    #[serde(default = "default_flag")]
    render_markdown: bool,
    #[serde(default = "default_flag")]
    show_frontmatter: bool,
}

fn default_history_count() -> usize {
    Settings::default().history_count
}

fn default_flag() -> bool {
    true
}

pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn load_history(&self) -> Vec<ManifestRecord> {
        let state: PersistedHistory = match read_ron(&self.dir.join(HISTORY_FILENAME)) {
            Some(state) => state,
            None => return Vec::new(),
        };
        state
            .entries
            .into_iter()
            .map(|entry| ManifestRecord {
                url: entry.url,
                domain: entry.domain,
                content: entry.content,
            })
            .collect()
    }

    pub fn load_settings(&self) -> Settings {
        let persisted: PersistedSettings = match read_ron(&self.dir.join(SETTINGS_FILENAME)) {
            Some(persisted) => persisted,
            None => return Settings::default(),
        };
        Settings {
            history_count: persisted.history_count,
            render_markdown: persisted.render_markdown,
            show_frontmatter: persisted.show_frontmatter,
        }
        .clamped()
    }

    pub fn save_history(&self, records: &[ManifestRecord]) {
        let state = PersistedHistory {
            entries: records
                .iter()
                .map(|record| PersistedRecord {
                    url: record.url.clone(),
                    domain: record.domain.clone(),
                    content: record.content.clone(),
                })
                .collect(),
        };
        self.write_ron(HISTORY_FILENAME, &state);
    }

    pub fn save_settings(&self, settings: &Settings) {
        let persisted = PersistedSettings {
            history_count: settings.history_count,
            render_markdown: settings.render_markdown,
            show_frontmatter: settings.show_frontmatter,
        };
        self.write_ron(SETTINGS_FILENAME, &persisted);
    }

    fn write_ron<T: Serialize>(&self, filename: &str, value: &T) {
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(value, pretty) {
            Ok(text) => text,
            Err(err) => {
                sentinel_error!("Failed to serialize {}: {}", filename, err);
                return;
            }
        };

        let writer = AtomicFileWriter::new(self.dir.clone());
        if let Err(err) = writer.write(filename, &content) {
            sentinel_error!("Failed to write {} to {:?}: {}", filename, self.dir, err);
        }
    }
}

fn read_ron<T: for<'de> Deserialize<'de>>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            sentinel_warn!("Failed to read persisted state from {:?}: {}", path, err);
            return None;
        }
    };

    match ron::from_str(&content) {
        Ok(value) => {
            sentinel_info!("Loaded persisted state from {:?}", path);
            Some(value)
        }
        Err(err) => {
            sentinel_warn!("Failed to parse persisted state from {:?}: {}", path, err);
            None
        }
    }
}
