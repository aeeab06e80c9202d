// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{format_date, parse_date, parse_time};

/// A titled, time-bounded calendar entry attached to one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier across the whole store.
    pub id: String,

    pub title: String,

    /// Start time in `HH:MM`.
    pub start_time: String,

    /// End time in `HH:MM`.
    pub end_time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Canonical `YYYY-MM-DD` key of the list holding this event.
    pub date: String,
}

impl Event {
    pub(crate) fn from_draft(id: String, draft: EventDraft) -> Self {
        Self {
            id,
            title: draft.title,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            date: draft.date,
        }
    }

    /// The draft this event would be submitted as, used to prefill editors.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
        }
    }
}

/// An event without an id, as submitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
    pub date: String,
}

impl EventDraft {
    pub const DEFAULT_START: &str = "09:00";
    pub const DEFAULT_END: &str = "10:00";

    /// An untitled draft on the given day with the default time slot.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            start_time: Self::DEFAULT_START.to_string(),
            end_time: Self::DEFAULT_END.to_string(),
            description: None,
            date: format_date(date),
        }
    }

    /// Checks the required fields before the draft reaches the store.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if parse_time(&self.start_time).is_none() {
            return Err(DraftError::InvalidTime(self.start_time.clone()));
        }
        if parse_time(&self.end_time).is_none() {
            return Err(DraftError::InvalidTime(self.end_time.clone()));
        }
        if parse_date(&self.date).is_none() {
            return Err(DraftError::InvalidDate(self.date.clone()));
        }
        Ok(())
    }
}

/// Reasons a draft is rejected at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Event title is required")]
    EmptyTitle,

    #[error("Invalid time `{0}`, expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
}
