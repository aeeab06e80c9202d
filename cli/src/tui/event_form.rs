// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;
use kbcal_core::{Event, EventDraft};

use crate::tui::dispatcher::{Action, Dispatcher};

/// What the event editor should be opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorRequest {
    New(NaiveDate),
    Edit(Event),
}

/// How the user closed the editor, `None` on the store means cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Save(EventDraft),
    Delete,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventFormData {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

/// State behind the modal event form.
#[derive(Debug)]
pub struct EventFormStore {
    pub data: EventFormData,
    /// Date key the draft is submitted for.
    pub date: String,
    /// Id of the event being edited, `None` when creating.
    pub existing_id: Option<String>,
    pub outcome: Option<FormOutcome>,
    /// Validation message from the last submit.
    pub error: Option<String>,
}

impl EventFormStore {
    pub fn new(request: &EditorRequest) -> Self {
        match request {
            EditorRequest::New(date) => Self::new_by_date(*date),
            EditorRequest::Edit(event) => Self::new_by_event(event),
        }
    }

    pub fn new_by_date(date: NaiveDate) -> Self {
        Self::new_by_draft(EventDraft::new(date), None)
    }

    pub fn new_by_event(event: &Event) -> Self {
        Self::new_by_draft(event.to_draft(), Some(event.id.clone()))
    }

    fn new_by_draft(draft: EventDraft, existing_id: Option<String>) -> Self {
        Self {
            data: EventFormData {
                title: draft.title,
                start_time: draft.start_time,
                end_time: draft.end_time,
                description: draft.description.unwrap_or_default(),
            },
            date: draft.date,
            existing_id,
            outcome: None,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.existing_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Event"
        } else {
            "New Event"
        }
    }

    pub fn to_draft(&self) -> EventDraft {
        let description = self.data.description.trim();
        EventDraft {
            title: self.data.title.trim().to_string(),
            start_time: self.data.start_time.trim().to_string(),
            end_time: self.data.end_time.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            date: self.date.clone(),
        }
    }

    fn submit(&mut self) {
        let draft = self.to_draft();
        match draft.validate() {
            Ok(()) => {
                self.error = None;
                self.outcome = Some(FormOutcome::Save(draft));
            }
            Err(e) => {
                tracing::debug!(err = %e, "event form rejected");
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::UpdateEventTitle(v) => {
                    that.data.title = v.clone();
                    that.error = None;
                }
                Action::UpdateEventStartTime(v) => {
                    that.data.start_time = v.clone();
                    that.error = None;
                }
                Action::UpdateEventEndTime(v) => {
                    that.data.end_time = v.clone();
                    that.error = None;
                }
                Action::UpdateEventDescription(v) => {
                    that.data.description = v.clone();
                    that.error = None;
                }
                Action::SubmitChanges => that.submit(),
                Action::DiscardEvent if that.is_editing() => {
                    that.outcome = Some(FormOutcome::Delete);
                }
                _ => (),
            }
        }));
        dispatcher.register(callback);
    }
}
