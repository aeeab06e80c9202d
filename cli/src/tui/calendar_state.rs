// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::{Datelike, NaiveDate, TimeDelta};
use kbcal_core::date::{days_in_month, format_date, parse_date, shift_month};
use kbcal_core::{Event, EventDraft, EventStore, MonthGrid};

use crate::tui::dispatcher::{Action, Dispatcher};

/// Which half of the calendar receives the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    List,
}

/// State of the terminal calendar: the event store plus what is on screen.
pub struct CalendarState {
    pub store: EventStore,
    pub today: NaiveDate,
    pub grid: MonthGrid,
    pub selected: NaiveDate,
    pub focus: Focus,
    /// Index of the highlighted entry in the day list.
    pub list_index: usize,
    /// Failure of the last store write, shown instead of the status.
    pub error: Option<String>,
    status: Rc<RefCell<Option<String>>>,
}

impl CalendarState {
    pub fn new(mut store: EventStore, today: NaiveDate, selected: NaiveDate) -> Self {
        let status = Rc::new(RefCell::new(None));
        let that = status.clone();
        store.subscribe(move |change| {
            *that.borrow_mut() = Some(change.to_string());
        });

        Self {
            store,
            today,
            grid: MonthGrid::containing(selected),
            selected,
            focus: Focus::Grid,
            list_index: 0,
            error: None,
            status,
        }
    }

    pub fn selected_key(&self) -> String {
        format_date(self.selected)
    }

    pub fn selected_events(&self) -> &[Event] {
        self.store.events_on(&self.selected_key())
    }

    /// The event under the list cursor, only while the list has focus.
    pub fn selected_event(&self) -> Option<&Event> {
        match self.focus {
            Focus::List => self.selected_events().get(self.list_index),
            Focus::Grid => None,
        }
    }

    /// Footer line: the last write error, else the last store change.
    pub fn status(&self) -> Option<String> {
        self.error.clone().or_else(|| self.status.borrow().clone())
    }

    pub fn into_store(self) -> EventStore {
        self.store
    }

    fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        if self.grid.position_of(date).is_none() {
            self.grid = MonthGrid::containing(date);
        }
        self.focus = Focus::Grid;
        self.list_index = 0;
    }

    /// Moves to another month keeping the day of month where possible.
    fn shift_month(&mut self, delta: i32) {
        let (year, month_index) = shift_month(self.grid.year(), self.grid.month_index(), delta);
        let day = self
            .selected
            .day()
            .min(days_in_month(year, month_index as i32));
        match NaiveDate::from_ymd_opt(year, month_index + 1, day) {
            Some(date) => self.select(date),
            None => tracing::warn!(year, month_index, "month out of range"),
        }
    }

    fn move_selection(&mut self, days: i64) {
        match self.selected.checked_add_signed(TimeDelta::days(days)) {
            Some(date) => self.select(date),
            None => tracing::warn!(days, "selection out of range"),
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Grid if !self.selected_events().is_empty() => Focus::List,
            _ => Focus::Grid,
        };
        self.list_index = 0;
    }

    fn move_list_cursor(&mut self, delta: isize) {
        let len = self.selected_events().len();
        if len == 0 {
            return;
        }
        self.list_index = self.list_index.saturating_add_signed(delta).min(len - 1);
    }

    fn save_event(&mut self, draft: &EventDraft, existing_id: Option<&str>) {
        match self.store.save(draft.clone(), existing_id) {
            Ok(event) => {
                self.error = None;
                if let Some(date) = parse_date(&event.date) {
                    self.select(date);
                }
            }
            Err(e) => {
                tracing::warn!(err = %e, "failed to save event");
                self.error = Some(e.to_string());
            }
        }
    }

    fn delete_event(&mut self, id: &str, date: &str) {
        match self.store.delete(id, date) {
            Ok(Some(_)) => {
                self.error = None;
                let len = self.selected_events().len();
                if len == 0 {
                    self.focus = Focus::Grid;
                    self.list_index = 0;
                } else {
                    self.list_index = self.list_index.min(len - 1);
                }
            }
            Ok(None) => tracing::debug!(id, date, "nothing to delete"),
            Err(e) => {
                tracing::warn!(err = %e, "failed to delete event");
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::ShiftMonth(delta) => that.shift_month(*delta),
                Action::JumpToToday => {
                    let today = that.today;
                    that.select(today);
                }
                Action::MoveSelection(days) => that.move_selection(*days),
                Action::ToggleFocus => that.toggle_focus(),
                Action::MoveListCursor(delta) => that.move_list_cursor(*delta),
                Action::SaveEvent { draft, existing_id } => {
                    that.save_event(draft, existing_id.as_deref());
                }
                Action::DeleteEvent { id, date } => that.delete_event(id, date),
                _ => (),
            }
        }));
        dispatcher.register(callback);
    }
}
