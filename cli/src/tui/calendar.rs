// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::calendar_state::CalendarState;
use crate::tui::component::{Component, Message};
use crate::tui::component_page::SinglePage;
use crate::tui::day_list::DayList;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::month_view::MonthView;

const DAY_LIST_HEIGHT: u16 = 7;

/// The full screen calendar: month grid, day list and status line.
pub struct CalendarView(SinglePage<CalendarState, CalendarBody>);

impl CalendarView {
    pub fn new() -> Self {
        let page = SinglePage::new("Calendar", CalendarBody).with_instructions(vec![
            ("Month", "[ ]"),
            ("Today", "t"),
            ("New", "a"),
            ("Edit", "e"),
            ("Focus", "<Tab>"),
            ("Quit", "q"),
        ]);
        Self(page)
    }
}

impl Component<CalendarState> for CalendarView {
    fn render(&self, store: &RefCell<CalendarState>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarState>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, area, event)
    }
}

pub struct CalendarBody;

impl CalendarBody {
    fn layout(area: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(DAY_LIST_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(area)
    }
}

impl Component<CalendarState> for CalendarBody {
    fn render(&self, store: &RefCell<CalendarState>, area: Rect, buf: &mut Buffer) {
        let [month, day, status] = Self::layout(area);
        MonthView.render(store, month, buf);
        DayList.render(store, day, buf);

        let state = store.borrow();
        let line = match (&state.error, state.status()) {
            (Some(e), _) => Line::from(e.clone()).red(),
            (None, Some(s)) => Line::from(s).green(),
            (None, None) => Line::default(),
        };
        Paragraph::new(line).render(status, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarState>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let action = match event.code {
            KeyCode::Char('q') => return Some(Message::Exit),
            KeyCode::Char('[') | KeyCode::PageUp => Action::ShiftMonth(-1),
            KeyCode::Char(']') | KeyCode::PageDown => Action::ShiftMonth(1),
            KeyCode::Char('t') => Action::JumpToToday,
            KeyCode::Tab => Action::ToggleFocus,
            _ => {
                let [month, day, _] = Self::layout(area);
                return MonthView
                    .on_key(dispatcher, store, month, event)
                    .or_else(|| DayList.on_key(dispatcher, store, day, event));
            }
        };
        dispatcher.dispatch(action);
        Some(Message::Handled)
    }
}
