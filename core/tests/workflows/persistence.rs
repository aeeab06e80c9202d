// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the persisted blob: its layout and how loading copes with bad data.

use std::fs;

use kbcal_core::{EventStore, FileStorage};

use crate::common::{TempState, stored_blob, test_draft};

#[test]
fn persisted_blob_is_date_keyed_json() {
    let state = TempState::new();
    let mut store = EventStore::load(FileStorage::new(state.path()));
    let event = store
        .save(test_draft("Standup", "2024-03-05"), None)
        .unwrap();

    let blob = stored_blob(state.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let stored = &json["2024-03-05"][0];
    assert_eq!(stored["id"], event.id.as_str());
    assert_eq!(stored["title"], "Standup");
    assert_eq!(stored["startTime"], "09:00");
    assert_eq!(stored["endTime"], "09:15");
    assert_eq!(stored["date"], "2024-03-05");
}

#[test]
fn every_mutation_rewrites_the_whole_blob() {
    let state = TempState::new();
    let mut store = EventStore::load(FileStorage::new(state.path()));

    store.save(test_draft("A", "2024-03-05"), None).unwrap();
    let first = stored_blob(state.path()).unwrap();

    let b = store.save(test_draft("B", "2024-04-01"), None).unwrap();
    let second = stored_blob(state.path()).unwrap();
    assert_ne!(first, second);
    assert_eq!(EventStore::from_blob(&second).unwrap(), *store.events());

    store.delete(&b.id, "2024-04-01").unwrap();
    let third = stored_blob(state.path()).unwrap();
    assert_eq!(EventStore::from_blob(&third).unwrap(), *store.events());
    assert_eq!(EventStore::from_blob(&first).unwrap(), *store.events());
}

#[test]
fn missing_blob_loads_empty() {
    let state = TempState::new();
    let store = EventStore::load(FileStorage::new(state.path().join("never-written")));
    assert!(store.is_empty());
}

#[test]
fn malformed_blob_loads_empty_and_is_replaced_on_save() {
    let state = TempState::new();
    fs::write(state.events_file(), "[1, 2, 3").unwrap();

    let mut store = EventStore::load(FileStorage::new(state.path()));
    assert!(store.is_empty());

    store.save(test_draft("Fresh", "2024-03-05"), None).unwrap();
    let reopened = EventStore::load(FileStorage::new(state.path()));
    assert_eq!(reopened.len(), 1);
}

#[test]
fn blob_written_by_hand_is_accepted() {
    let state = TempState::new();
    let blob = r#"{
        "2024-03-05": [
            {"id": "a", "title": "Standup", "startTime": "09:00", "endTime": "09:15", "description": "", "date": "2024-03-05"},
            {"id": "b", "title": "Review", "startTime": "15:00", "endTime": "16:00", "date": "2024-03-05"}
        ],
        "2024-03-06": []
    }"#;
    fs::write(state.events_file(), blob).unwrap();

    let store = EventStore::load(FileStorage::new(state.path()));
    assert_eq!(store.len(), 2);
    assert_eq!(store.events_on("2024-03-05")[0].description.as_deref(), Some(""));
    assert_eq!(store.events_on("2024-03-05")[1].description, None);
    assert!(store.events_on("2024-03-06").is_empty());
}
