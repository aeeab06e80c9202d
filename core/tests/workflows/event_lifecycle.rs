// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event lifecycle workflow tests.
//!
//! These tests validate complete workflows from event creation through
//! modification and deletion, reopening the store between steps.

use kbcal_core::{EventStore, FileStorage};

use crate::common::{TempState, test_draft, test_draft_at};

#[test]
fn event_lifecycle_create_flow() {
    // Arrange
    let state = TempState::new();
    let mut store = EventStore::load(FileStorage::new(state.path()));

    // Act
    let event = store
        .save(test_draft("Standup", "2024-03-05"), None)
        .unwrap();

    // Assert - visible immediately
    let events = store.events_on("2024-03-05");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Standup");
    assert_eq!(events[0].id, event.id);

    // Assert - written to disk
    assert!(state.events_file().exists());

    // Assert - survives a restart
    let reopened = EventStore::load(FileStorage::new(state.path()));
    assert_eq!(reopened.events_on("2024-03-05"), store.events_on("2024-03-05"));
}

#[test]
fn event_lifecycle_update_flow() {
    let state = TempState::new();
    let mut store = EventStore::load(FileStorage::new(state.path()));
    store
        .save(test_draft("Breakfast", "2024-03-05"), None)
        .unwrap();
    let standup = store
        .save(test_draft("Standup", "2024-03-05"), None)
        .unwrap();
    store
        .save(test_draft_at("Lunch", "2024-03-05", "12:00", "13:00"), None)
        .unwrap();

    let mut draft = standup.to_draft();
    draft.title = "Daily standup".to_string();
    draft.end_time = "09:30".to_string();
    draft.description = Some("Room 4".to_string());
    store.save(draft, Some(&standup.id)).unwrap();

    let reopened = EventStore::load(FileStorage::new(state.path()));
    let events = reopened.events_on("2024-03-05");
    let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Breakfast", "Daily standup", "Lunch"]);
    assert_eq!(events[1].id, standup.id);
    assert_eq!(events[1].end_time, "09:30");
    assert_eq!(events[1].description.as_deref(), Some("Room 4"));
}

#[test]
fn event_lifecycle_delete_flow() {
    let state = TempState::new();
    let mut store = EventStore::load(FileStorage::new(state.path()));
    let keep = store.save(test_draft("Keep", "2024-03-05"), None).unwrap();
    let drop = store.save(test_draft("Drop", "2024-03-05"), None).unwrap();
    let other = store.save(test_draft("Other", "2024-03-06"), None).unwrap();

    let removed = store.delete(&drop.id, "2024-03-05").unwrap();
    assert_eq!(removed, Some(drop.clone()));

    let reopened = EventStore::load(FileStorage::new(state.path()));
    assert_eq!(reopened.events_on("2024-03-05"), [keep]);
    assert_eq!(reopened.events_on("2024-03-06"), [other]);
    assert!(reopened.find(&drop.id).is_none());
}

#[test]
fn event_lifecycle_ids_are_unique() {
    let state = TempState::new();
    let mut store = EventStore::load(FileStorage::new(state.path()));

    let mut ids = std::collections::HashSet::new();
    for day in 1..=28 {
        let date = format!("2024-02-{day:02}");
        for title in ["A", "B", "C"] {
            let event = store.save(test_draft(title, &date), None).unwrap();
            assert!(ids.insert(event.id));
        }
    }
    assert_eq!(store.len(), 84);
}
