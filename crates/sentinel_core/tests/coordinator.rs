use std::sync::Once;

use sentinel_core::{
    update, Classification, CoordinatorState, Effect, ManifestRecord, Msg, Settings,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sentinel_logging::initialize_for_tests);
}

fn navigate(state: CoordinatorState, tab_id: u64, page_url: &str) -> (CoordinatorState, Vec<Effect>) {
    update(
        state,
        Msg::NavigationCompleted {
            tab_id,
            page_url: page_url.to_string(),
        },
    )
}

/// Runs a navigation and feeds back the given classification for the
/// candidate fetch, as the effect runner would.
fn detect(
    state: CoordinatorState,
    tab_id: u64,
    page_url: &str,
    classification: Classification,
) -> (CoordinatorState, Vec<Effect>) {
    let (state, effects) = navigate(state, tab_id, page_url);
    let candidate_url = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchCandidate { candidate_url, .. } => Some(candidate_url.clone()),
            _ => None,
        })
        .expect("navigation should request a fetch");
    update(
        state,
        Msg::FetchCompleted {
            tab_id,
            page_url: page_url.to_string(),
            candidate_url,
            classification,
        },
    )
}

fn icon_of(effects: &[Effect]) -> Option<bool> {
    effects.iter().find_map(|effect| match effect {
        Effect::SetIcon { found, .. } => Some(*found),
        _ => None,
    })
}

#[test]
fn confirmed_detection_updates_history_tab_state_and_icon() {
    init_logging();
    let state = CoordinatorState::new();

    let (state, effects) = detect(
        state,
        1,
        "https://x.com/guide",
        Classification::Confirmed("hello".to_string()),
    );

    let expected = ManifestRecord {
        url: "https://x.com/llms.txt".to_string(),
        domain: "x.com".to_string(),
        content: "hello".to_string(),
    };
    assert_eq!(state.history().list(), &[expected.clone()]);
    assert_eq!(state.tab_data(1), Some(&expected));
    assert_eq!(icon_of(&effects), Some(true));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::PersistHistory(records) if records.len() == 1)));
}

#[test]
fn re_detection_on_same_candidate_refreshes_without_duplicating() {
    init_logging();
    let state = CoordinatorState::new();
    let (state, _) = detect(
        state,
        1,
        "https://x.com/guide",
        Classification::Confirmed("hello".to_string()),
    );

    // Another page on the same directory resolves to the same candidate.
    let (state, effects) = detect(
        state,
        1,
        "https://x.com/other",
        Classification::Confirmed("hello".to_string()),
    );

    assert_eq!(state.history().list().len(), 1);
    assert_eq!(state.history().list()[0].url, "https://x.com/llms.txt");
    assert_eq!(icon_of(&effects), Some(true));
}

#[test]
fn rejected_detection_without_history_clears_icon() {
    init_logging();
    let state = CoordinatorState::new();

    let (state, effects) = detect(state, 1, "https://y.com/", Classification::Rejected);

    assert!(state.history().list().is_empty());
    assert_eq!(state.tab_data(1), None);
    assert_eq!(icon_of(&effects), Some(false));
}

#[test]
fn rejected_detection_purges_stale_history_entry_for_that_url() {
    init_logging();
    let state = CoordinatorState::new();
    let (state, _) = detect(
        state,
        1,
        "https://y.com/",
        Classification::Confirmed("old".to_string()),
    );
    assert_eq!(state.history().list().len(), 1);

    // The same candidate now serves an HTML page: the learned entry is bad.
    let (state, effects) = detect(state, 1, "https://y.com/", Classification::Rejected);

    assert!(state.history().list().is_empty());
    assert_eq!(icon_of(&effects), Some(false));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::PersistHistory(records) if records.is_empty())));
}

#[test]
fn absent_detection_falls_back_to_history_for_the_domain() {
    init_logging();
    let state = CoordinatorState::new();
    // Tab 1 learned y.com's manifest from a different path earlier.
    let (state, _) = detect(
        state,
        1,
        "https://y.com/docs/intro",
        Classification::Confirmed("docs".to_string()),
    );

    // Tab 2 visits a path with no manifest; history still vouches for y.com.
    let (state, effects) = detect(state, 2, "https://y.com/blog/post", Classification::Absent);

    assert_eq!(icon_of(&effects), Some(true));
    assert_eq!(state.tab_data(2).map(|r| r.content.as_str()), Some("docs"));
}

#[test]
fn non_http_navigation_skips_detection_and_resyncs() {
    init_logging();
    let state = CoordinatorState::new();

    let (state, effects) = navigate(state, 1, "chrome://settings");
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::FetchCandidate { .. })));
    assert_eq!(icon_of(&effects), Some(false));
    assert_eq!(state.tab_data(1), None);
}

#[test]
fn activation_trusts_matching_tab_state_without_touching_history() {
    init_logging();
    let state = CoordinatorState::new();
    let (state, _) = detect(
        state,
        1,
        "https://x.com/guide",
        Classification::Confirmed("hello".to_string()),
    );

    let (state, effects) = update(
        state,
        Msg::TabActivated {
            tab_id: 1,
            page_url: "https://x.com/guide".to_string(),
        },
    );

    assert_eq!(icon_of(&effects), Some(true));
    // Activation never re-fetches.
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::FetchCandidate { .. })));
    assert_eq!(state.tab_data(1).map(|r| r.domain.as_str()), Some("x.com"));
}

#[test]
fn activation_repopulates_closed_tab_state_from_history() {
    init_logging();
    let state = CoordinatorState::new();
    let (state, _) = detect(
        state,
        1,
        "https://x.com/guide",
        Classification::Confirmed("hello".to_string()),
    );

    let (state, _) = update(state, Msg::TabRemoved { tab_id: 1 });
    assert_eq!(state.tab_data(1), None);

    let (state, effects) = update(
        state,
        Msg::TabActivated {
            tab_id: 1,
            page_url: "https://x.com/elsewhere".to_string(),
        },
    );

    assert_eq!(icon_of(&effects), Some(true));
    assert_eq!(state.tab_data(1).map(|r| r.domain.as_str()), Some("x.com"));
}

#[test]
fn stale_fetch_result_for_superseded_navigation_is_discarded() {
    init_logging();
    let state = CoordinatorState::new();
    let (state, _) = navigate(state, 1, "https://x.com/guide");
    // The user navigates away before the first fetch resolves.
    let (state, _) = navigate(state, 1, "https://z.com/page");

    let (state, effects) = update(
        state,
        Msg::FetchCompleted {
            tab_id: 1,
            page_url: "https://x.com/guide".to_string(),
            candidate_url: "https://x.com/llms.txt".to_string(),
            classification: Classification::Confirmed("late".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert!(state.history().list().is_empty());
    assert_eq!(state.tab_data(1), None);
}

#[test]
fn capacity_two_keeps_newest_two_domains() {
    init_logging();
    let state = CoordinatorState::new();
    let (state, _) = update(
        state,
        Msg::SettingsChanged(Settings {
            history_count: 2,
            ..Settings::default()
        }),
    );

    let mut state = state;
    for (tab, url, content) in [
        (1, "https://one.com/", "1"),
        (2, "https://two.com/", "2"),
        (3, "https://three.com/", "3"),
    ] {
        let (next, _) = detect(state, tab, url, Classification::Confirmed(content.to_string()));
        state = next;
    }

    let domains: Vec<&str> = state
        .history()
        .list()
        .iter()
        .map(|r| r.domain.as_str())
        .collect();
    assert_eq!(domains, vec!["three.com", "two.com"]);
}

#[test]
fn reducing_history_count_evicts_immediately_and_persists() {
    init_logging();
    let mut state = CoordinatorState::new();
    for (tab, url) in [(1, "https://one.com/"), (2, "https://two.com/")] {
        let (next, _) = detect(state, tab, url, Classification::Confirmed("x".to_string()));
        state = next;
    }

    let (state, effects) = update(
        state,
        Msg::SettingsChanged(Settings {
            history_count: 1,
            ..Settings::default()
        }),
    );

    assert_eq!(state.history().list().len(), 1);
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::PersistHistory(records) if records.len() == 1)));
}

#[test]
fn settings_changed_clamps_history_count() {
    init_logging();
    let state = CoordinatorState::new();
    let (state, _) = update(
        state,
        Msg::SettingsChanged(Settings {
            history_count: 500,
            ..Settings::default()
        }),
    );
    assert_eq!(state.settings().history_count, 50);

    let (state, _) = update(
        state,
        Msg::SettingsChanged(Settings {
            history_count: 0,
            ..Settings::default()
        }),
    );
    assert_eq!(state.settings().history_count, 1);
}

#[test]
fn clearing_history_empties_the_list_and_persists() {
    init_logging();
    let state = CoordinatorState::new();
    let (state, _) = detect(
        state,
        1,
        "https://x.com/guide",
        Classification::Confirmed("hello".to_string()),
    );

    let (state, effects) = update(state, Msg::HistoryCleared);

    assert!(state.history().list().is_empty());
    assert_eq!(
        effects,
        vec![Effect::PersistHistory(Vec::new())]
    );
}
