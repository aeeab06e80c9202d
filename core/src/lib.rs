// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of KBCal: calendar date helpers and the date-keyed event store.

mod config;
pub mod date;
mod event;
mod month;
mod storage;
mod store;

pub use crate::config::{APP_NAME, Config};
pub use crate::event::{DraftError, Event, EventDraft};
pub use crate::month::MonthGrid;
pub use crate::storage::{FileStorage, MemoryStorage, Storage};
pub use crate::store::{EventMap, EventStore, STORAGE_KEY, StoreChange, StoreError};
