// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary state directory for integration tests.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A scratch state directory, removed when dropped.
#[derive(Debug)]
pub struct TempState {
    dir: TempDir,
}

impl TempState {
    /// Creates a new empty state directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the file holding the persisted events.
    #[must_use]
    pub fn events_file(&self) -> PathBuf {
        self.dir.path().join("calendarEvents.json")
    }
}
