// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::event_formatter::format_time_range;
use crate::tui::calendar_state::{CalendarState, Focus};
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_form::EditorRequest;

/// Events of the selected day, one per line.
pub struct DayList;

impl DayList {
    fn block(state: &CalendarState) -> Block<'static> {
        let title = format!(" Events for {} ", state.selected_key());
        let style = match state.focus {
            Focus::List => Style::new().blue(),
            Focus::Grid => Style::new().gray(),
        };
        Block::new()
            .borders(Borders::TOP)
            .border_style(style)
            .title(title.bold())
    }
}

impl Component<CalendarState> for DayList {
    fn render(&self, store: &RefCell<CalendarState>, area: Rect, buf: &mut Buffer) {
        let state = store.borrow();
        let block = Self::block(&state);
        let inner = block.inner(area);
        block.render(area, buf);

        let events = state.selected_events();
        if events.is_empty() {
            Paragraph::new("No events").dark_gray().render(inner, buf);
            return;
        }

        // keep the cursor in view
        let height = inner.height as usize;
        let offset = (state.list_index + 1).saturating_sub(height);
        let lines: Vec<Line> = events
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, event)| {
                let mut spans = vec![
                    Span::raw(event.title.as_str()).bold(),
                    Span::raw("  "),
                    Span::raw(format_time_range(event)).cyan(),
                ];
                if let Some(description) = &event.description {
                    spans.push(Span::raw("  "));
                    spans.push(Span::raw(description.as_str()).dark_gray());
                }

                let line = Line::from(spans);
                if state.focus == Focus::List && i == state.list_index {
                    line.reversed()
                } else {
                    line
                }
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarState>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if store.borrow().focus != Focus::List {
            return None;
        }

        match event.code {
            KeyCode::Up => dispatcher.dispatch(Action::MoveListCursor(-1)),
            KeyCode::Down => dispatcher.dispatch(Action::MoveListCursor(1)),
            KeyCode::Enter | KeyCode::Char('e') => {
                let event = store.borrow().selected_event().cloned()?;
                return Some(Message::OpenEditor(EditorRequest::Edit(event)));
            }
            _ => return None,
        }
        Some(Message::Handled)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::NaiveDate;
    use kbcal_core::{EventDraft, EventStore, MemoryStorage};
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;

    fn setup(titles: &[&str]) -> (Rc<RefCell<CalendarState>>, Dispatcher) {
        let mut store = EventStore::load(MemoryStorage::new());
        for (i, title) in titles.iter().enumerate() {
            let draft = EventDraft {
                title: title.to_string(),
                start_time: format!("{:02}:00", 9 + i),
                end_time: format!("{:02}:30", 9 + i),
                description: (i == 0).then(|| "daily sync".to_string()),
                date: "2024-03-05".to_string(),
            };
            store.save(draft, None).unwrap();
        }
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let state = Rc::new(RefCell::new(CalendarState::new(store, day, day)));
        let mut dispatcher = Dispatcher::new();
        CalendarState::register_to(state.clone(), &mut dispatcher);
        (state, dispatcher)
    }

    fn lines(state: &RefCell<CalendarState>, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, 60, height);
        let mut buf = Buffer::empty(area);
        DayList.render(state, area, &mut buf);
        buf.content()
            .chunks(area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .map(|l| l.trim_end().to_string())
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn renders_events_of_selected_day() {
        let (state, _) = setup(&["Standup", "Lunch"]);
        let lines = lines(&state, 4);
        assert!(lines[0].contains("Events for 2024-03-05"));
        assert_eq!(lines[1], "Standup  9:00 AM - 9:30 AM  daily sync");
        assert_eq!(lines[2], "Lunch  10:00 AM - 10:30 AM");
    }

    #[test]
    fn renders_placeholder_without_events() {
        let (state, _) = setup(&[]);
        let lines = lines(&state, 3);
        assert_eq!(lines[1], "No events");
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let (state, mut dispatcher) = setup(&["A", "B", "C", "D"]);
        dispatcher.dispatch(Action::ToggleFocus);
        for _ in 0..3 {
            dispatcher.dispatch(Action::MoveListCursor(1));
        }
        let lines = lines(&state, 3);
        assert!(lines[1].starts_with("C  "));
        assert!(lines[2].starts_with("D  "));
    }

    #[test]
    fn keys_only_apply_with_focus() {
        let (state, mut dispatcher) = setup(&["Standup", "Lunch"]);
        let area = Rect::new(0, 0, 60, 5);
        let mut list = DayList;

        let msg = list.on_key(&mut dispatcher, &state, area, key(KeyCode::Down));
        assert_eq!(msg, None);

        dispatcher.dispatch(Action::ToggleFocus);
        list.on_key(&mut dispatcher, &state, area, key(KeyCode::Down));
        assert_eq!(state.borrow().list_index, 1);

        let msg = list.on_key(&mut dispatcher, &state, area, key(KeyCode::Char('e')));
        let lunch = state.borrow().selected_events()[1].clone();
        assert_eq!(msg, Some(Message::OpenEditor(EditorRequest::Edit(lunch))));
    }
}
