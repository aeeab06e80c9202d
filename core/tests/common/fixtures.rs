// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use kbcal_core::{Config, EventDraft, FileStorage, STORAGE_KEY, Storage};

/// Creates a configuration persisting into `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
    }
}

/// Creates a 09:00-09:15 draft with the given title on `date`.
#[must_use]
pub fn test_draft(title: &str, date: &str) -> EventDraft {
    test_draft_at(title, date, "09:00", "09:15")
}

/// Creates a draft with explicit start and end times.
#[must_use]
pub fn test_draft_at(title: &str, date: &str, start: &str, end: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        description: None,
        date: date.to_string(),
    }
}

/// Reads the raw persisted blob from a state directory.
#[must_use]
pub fn stored_blob(state_dir: &Path) -> Option<String> {
    FileStorage::new(state_dir)
        .get(STORAGE_KEY)
        .expect("state directory should be readable")
}
