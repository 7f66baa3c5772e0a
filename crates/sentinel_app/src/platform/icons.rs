//! Two-state toolbar icon application.
//!
//! The coordinator only ever distinguishes "manifest found" from "nothing to
//! show"; each state maps to one fixed multi-resolution icon set. Applying an
//! icon can fail (the tab may already be gone), which is logged and ignored.

use std::io::Write;

use sentinel_core::TabId;
use sentinel_logging::sentinel_warn;
use serde::Serialize;

/// Icon set shown when a manifest was confirmed for the tab's site.
pub const FOUND_ICON: IconSet = IconSet {
    px16: "/icons/icon-found-16.png",
    px32: "/icons/icon-found-32.png",
    px48: "/icons/icon-found-48.png",
    px128: "/icons/icon-found-128.png",
};

/// Default icon set for tabs with nothing to show.
pub const STATIC_ICON: IconSet = IconSet {
    px16: "/icons/icon-16.png",
    px32: "/icons/icon-32.png",
    px48: "/icons/icon-48.png",
    px128: "/icons/icon-128.png",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconSet {
    #[serde(rename = "16")]
    pub px16: &'static str,
    #[serde(rename = "32")]
    pub px32: &'static str,
    #[serde(rename = "48")]
    pub px48: &'static str,
    #[serde(rename = "128")]
    pub px128: &'static str,
}

pub fn icon_for(found: bool) -> IconSet {
    if found {
        FOUND_ICON
    } else {
        STATIC_ICON
    }
}

/// Applies a detection result to a tab's action button.
pub trait IconPresenter: Send + Sync {
    fn apply(&self, tab_id: TabId, found: bool);
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum IconCommand {
    #[serde(rename_all = "camelCase")]
    SetIcon { tab_id: TabId, path: IconSet },
}

/// Emits `setIcon` commands as JSON lines on stdout for the browser shim to
/// execute.
pub struct StdioIconPresenter;

impl IconPresenter for StdioIconPresenter {
    fn apply(&self, tab_id: TabId, found: bool) {
        let command = IconCommand::SetIcon {
            tab_id,
            path: icon_for(found),
        };
        let line = match serde_json::to_string(&command) {
            Ok(line) => line,
            Err(err) => {
                sentinel_warn!("failed to serialize icon command: {}", err);
                return;
            }
        };
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(err) = writeln!(handle, "{}", line) {
            sentinel_warn!("failed to apply icon for tab {}: {}", tab_id, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_sets_serialize_with_pixel_size_keys() {
        let json = serde_json::to_string(&icon_for(true)).unwrap();
        assert_eq!(
            json,
            r#"{"16":"/icons/icon-found-16.png","32":"/icons/icon-found-32.png","48":"/icons/icon-found-48.png","128":"/icons/icon-found-128.png"}"#
        );
        assert_eq!(icon_for(false), STATIC_ICON);
    }

    #[test]
    fn set_icon_command_shape() {
        let command = IconCommand::SetIcon {
            tab_id: 4,
            path: STATIC_ICON,
        };
        let json = serde_json::to_string(&command).unwrap();
        assert!(json.starts_with(r#"{"type":"setIcon","tabId":4,"path":{"16":"#));
    }
}
