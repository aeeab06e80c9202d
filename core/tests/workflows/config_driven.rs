// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Workflows that open the store through a [`Config`](kbcal_core::Config).

use kbcal_core::{Config, EventStore};

use crate::common::{TempState, test_config, test_draft};

#[test]
fn config_state_dir_is_used_for_persistence() {
    let state = TempState::new();
    let config = test_config(state.path());

    let mut store = EventStore::open(&config);
    store.save(test_draft("Standup", "2024-03-05"), None).unwrap();
    assert!(state.events_file().exists());

    let reopened = EventStore::open(&config);
    assert_eq!(reopened.events_on("2024-03-05").len(), 1);
}

#[test]
fn config_without_state_dir_keeps_events_in_memory() {
    let config = Config { state_dir: None };

    let mut store = EventStore::open(&config);
    store.save(test_draft("Standup", "2024-03-05"), None).unwrap();
    assert_eq!(store.len(), 1);

    let reopened = EventStore::open(&config);
    assert!(reopened.is_empty());
}

#[test]
fn config_from_toml_opens_store() {
    let state = TempState::new();
    let toml = format!(
        r#"state_dir = "{}""#,
        state.path().to_str().unwrap().replace('\\', "/")
    );
    let mut config: Config = toml::from_str(&toml).unwrap();
    config.normalize().unwrap();

    let mut store = EventStore::open(&config);
    store.save(test_draft("Review", "2024-03-07"), None).unwrap();
    assert!(state.events_file().exists());
}
