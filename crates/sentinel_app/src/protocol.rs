//! Wire types for the query/command protocol served to the presentation
//! collaborators (popup, reader, options page), plus the tab lifecycle
//! events the host feeds into the coordinator.
//!
//! Shapes match the original extension messages, camelCase keys included.

use serde::{Deserialize, Serialize};
use sentinel_core::{ManifestRecord, Msg, Settings, TabId};

/// A tab lifecycle event delivered by the hosting browser shim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TabEvent {
    #[serde(rename_all = "camelCase")]
    NavigationCompleted { tab_id: TabId, page_url: String },
    #[serde(rename_all = "camelCase")]
    TabActivated { tab_id: TabId, page_url: String },
    #[serde(rename_all = "camelCase")]
    TabRemoved { tab_id: TabId },
}

impl From<TabEvent> for Msg {
    fn from(event: TabEvent) -> Self {
        match event {
            TabEvent::NavigationCompleted { tab_id, page_url } => {
                Msg::NavigationCompleted { tab_id, page_url }
            }
            TabEvent::TabActivated { tab_id, page_url } => Msg::TabActivated { tab_id, page_url },
            TabEvent::TabRemoved { tab_id } => Msg::TabRemoved { tab_id },
        }
    }
}

/// A query or command from a presentation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    GetTabData { tab_id: TabId },
    GetHistory,
    GetSettings,
    SaveSettings { settings: SettingsDto },
    ClearHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    TabData(TabDataDto),
    History(Vec<HistoryEntryDto>),
    Settings(SettingsDto),
    Ack { success: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDataDto {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl TabDataDto {
    pub fn not_found() -> Self {
        Self {
            found: false,
            url: None,
            content: None,
            domain: None,
        }
    }

    pub fn found(record: &ManifestRecord) -> Self {
        Self {
            found: true,
            url: Some(record.url.clone()),
            content: Some(record.content.clone()),
            domain: Some(record.domain.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub url: String,
    pub domain: String,
    pub content: String,
}

impl From<&ManifestRecord> for HistoryEntryDto {
    fn from(record: &ManifestRecord) -> Self {
        Self {
            url: record.url.clone(),
            domain: record.domain.clone(),
            content: record.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    pub history_count: usize,
    pub render_markdown: bool,
    pub show_frontmatter: bool,
}

impl From<&Settings> for SettingsDto {
    fn from(settings: &Settings) -> Self {
        Self {
            history_count: settings.history_count,
            render_markdown: settings.render_markdown,
            show_frontmatter: settings.show_frontmatter,
        }
    }
}

impl From<SettingsDto> for Settings {
    fn from(dto: SettingsDto) -> Self {
        Settings {
            history_count: dto.history_count,
            render_markdown: dto.render_markdown,
            show_frontmatter: dto.show_frontmatter,
        }
    }
}
