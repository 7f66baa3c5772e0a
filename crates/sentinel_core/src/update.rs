use crate::{
    candidate_manifest_url, domain, Classification, CoordinatorState, Effect, ManifestRecord, Msg,
    TabId,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: CoordinatorState, msg: Msg) -> (CoordinatorState, Vec<Effect>) {
    let effects = match msg {
        Msg::NavigationCompleted { tab_id, page_url } => {
            state.set_current_url(tab_id, page_url.clone());
            match candidate_manifest_url(&page_url) {
                Some(candidate_url) => vec![Effect::FetchCandidate {
                    tab_id,
                    page_url,
                    candidate_url,
                }],
                // Non-HTTP page: no detection, decide the icon from caches.
                None => resync_tab(&mut state, tab_id, &page_url),
            }
        }
        Msg::TabActivated { tab_id, page_url } => {
            state.set_current_url(tab_id, page_url.clone());
            resync_tab(&mut state, tab_id, &page_url)
        }
        Msg::TabRemoved { tab_id } => {
            state.remove_tab(tab_id);
            // The tab is gone; there is no icon left to update.
            Vec::new()
        }
        Msg::FetchCompleted {
            tab_id,
            page_url,
            candidate_url,
            classification,
        } => {
            if state.current_url(tab_id) != Some(page_url.as_str()) {
                // A newer navigation superseded this detection.
                Vec::new()
            } else {
                apply_classification(&mut state, tab_id, &page_url, candidate_url, classification)
            }
        }
        Msg::SettingsChanged(settings) => {
            let settings = settings.clamped();
            let evicted = state.history_mut().set_capacity(settings.history_count);
            state.set_settings(settings);
            if evicted {
                vec![Effect::PersistHistory(state.history().list().to_vec())]
            } else {
                Vec::new()
            }
        }
        Msg::HistoryCleared => {
            state.history_mut().clear();
            vec![Effect::PersistHistory(Vec::new())]
        }
    };

    (state, effects)
}

fn apply_classification(
    state: &mut CoordinatorState,
    tab_id: TabId,
    page_url: &str,
    candidate_url: String,
    classification: Classification,
) -> Vec<Effect> {
    match classification {
        Classification::Confirmed(content) => {
            let record = ManifestRecord {
                url: candidate_url,
                domain: domain(page_url).unwrap_or_default(),
                content,
            };
            state.history_mut().upsert(record.clone());
            state.tabs_mut().set(tab_id, record);
            vec![
                Effect::SetIcon {
                    tab_id,
                    found: true,
                },
                Effect::PersistHistory(state.history().list().to_vec()),
            ]
        }
        Classification::Rejected => {
            // A previously learned entry for this exact URL is now known bad.
            let removed = state.history_mut().remove_by_url(&candidate_url);
            state.tabs_mut().clear(tab_id);
            let mut effects = resync_tab(state, tab_id, page_url);
            if removed {
                effects.push(Effect::PersistHistory(state.history().list().to_vec()));
            }
            effects
        }
        Classification::Absent => resync_tab(state, tab_id, page_url),
    }
}

/// Decides the icon for a tab without fetching: trust a matching ephemeral
/// entry first, then fall back to the most recent history entry for the
/// page's domain, else clear.
fn resync_tab(state: &mut CoordinatorState, tab_id: TabId, page_url: &str) -> Vec<Effect> {
    let page_domain = domain(page_url);

    if let (Some(d), Some(tab_record)) = (page_domain.as_deref(), state.tabs().get(tab_id)) {
        if tab_record.domain == d {
            return vec![Effect::SetIcon {
                tab_id,
                found: true,
            }];
        }
    }

    if let Some(d) = page_domain.as_deref() {
        if let Some(record) = state.history().find_by_domain(d).cloned() {
            state.tabs_mut().set(tab_id, record);
            return vec![Effect::SetIcon {
                tab_id,
                found: true,
            }];
        }
    }

    state.tabs_mut().clear(tab_id);
    vec![Effect::SetIcon {
        tab_id,
        found: false,
    }]
}
