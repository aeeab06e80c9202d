// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use chrono::{Datelike, NaiveDate};
use kbcal_core::date::{WEEKDAY_NAMES, format_date};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::month_formatter::CellSummary;
use crate::tui::calendar_state::{CalendarState, Focus};
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_form::EditorRequest;
use crate::util::truncate_to_width;

/// The month header, weekday row and day cells.
pub struct MonthView;

impl MonthView {
    fn layout(area: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area)
    }

    fn columns() -> Layout {
        Layout::horizontal([Constraint::Fill(1); 7]).spacing(1)
    }

    fn render_header(state: &CalendarState, area: Rect, buf: &mut Buffer) {
        Line::from(vec![
            "◀ ".dark_gray(),
            state.grid.title().bold(),
            " ▶".dark_gray(),
        ])
        .centered()
        .render(area, buf);
    }

    fn render_weekdays(area: Rect, buf: &mut Buffer) {
        let cols = Self::columns().split(area);
        for (name, col) in WEEKDAY_NAMES.iter().zip(cols.iter()) {
            Paragraph::new(*name).gray().render(*col, buf);
        }
    }

    fn render_cell(state: &CalendarState, date: NaiveDate, area: Rect, buf: &mut Buffer) {
        let events = state.store.events_on(&format_date(date));
        let summary = CellSummary::of(events);

        let mut day = Span::raw(format!("{:>2}", date.day()));
        if !events.is_empty() {
            day = day.bold();
        }
        if date == state.today {
            day = day.yellow().reversed();
        }

        let width = area.width as usize;
        let mut lines = vec![Line::from(day)];
        for title in &summary.titles {
            lines.push(Line::from(truncate_to_width(title, width).into_owned()).cyan());
        }
        if let Some(more) = summary.more_label() {
            lines.push(Line::from(more).dark_gray());
        }

        let mut paragraph = Paragraph::new(lines);
        if date == state.selected {
            let bg = match state.focus {
                Focus::Grid => Color::Blue,
                Focus::List => Color::DarkGray,
            };
            paragraph = paragraph.bg(bg);
        }
        paragraph.render(area, buf);
    }
}

impl Component<CalendarState> for MonthView {
    fn render(&self, store: &RefCell<CalendarState>, area: Rect, buf: &mut Buffer) {
        let state = store.borrow();
        let [header, weekdays, body] = Self::layout(area);
        Self::render_header(&state, header, buf);
        Self::render_weekdays(weekdays, buf);

        let weeks = state.grid.week_count();
        let rows = Layout::vertical(vec![Constraint::Fill(1); weeks]).split(body);
        for (week, row) in state.grid.weeks().zip(rows.iter()) {
            let cols = Self::columns().split(*row);
            for (cell, col) in week.iter().zip(cols.iter()) {
                if let Some(date) = cell {
                    Self::render_cell(&state, *date, *col, buf);
                }
            }
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarState>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if store.borrow().focus != Focus::Grid {
            return None;
        }

        let days = match event.code {
            KeyCode::Left => -1,
            KeyCode::Right => 1,
            KeyCode::Up => -7,
            KeyCode::Down => 7,
            KeyCode::Enter | KeyCode::Char('a') => {
                let date = store.borrow().selected;
                return Some(Message::OpenEditor(EditorRequest::New(date)));
            }
            _ => return None,
        };
        dispatcher.dispatch(Action::MoveSelection(days));
        Some(Message::Handled)
    }
}
