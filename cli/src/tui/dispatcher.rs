// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use kbcal_core::EventDraft;

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

/// Fans every action out to all registered stores, in registration order.
pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    UpdateEventTitle(String),
    UpdateEventStartTime(String),
    UpdateEventEndTime(String),
    UpdateEventDescription(String),
    SubmitChanges,
    /// Delete the event being edited.
    DiscardEvent,

    ShiftMonth(i32),
    JumpToToday,
    /// Move the selected day by a number of days.
    MoveSelection(i64),
    ToggleFocus,
    MoveListCursor(isize),
    SaveEvent {
        draft: EventDraft,
        existing_id: Option<String>,
    },
    DeleteEvent {
        id: String,
        date: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_every_subscriber_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        for name in ["first", "second"] {
            let log = log.clone();
            dispatcher.register(Rc::new(RefCell::new(move |action: &Action| {
                if let Action::ShiftMonth(delta) = action {
                    log.borrow_mut().push(format!("{name}:{delta}"));
                }
            })));
        }

        dispatcher.dispatch(Action::ShiftMonth(1));
        dispatcher.dispatch(Action::JumpToToday);
        dispatcher.dispatch(Action::ShiftMonth(-1));
        assert_eq!(
            *log.borrow(),
            ["first:1", "second:1", "first:-1", "second:-1"]
        );
    }
}
