// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use chrono::NaiveDate;
use kbcal_core::date::today;
use kbcal_core::{Event, EventDraft, EventStore};
use ratatui::crossterm::event::{self, KeyEvent, KeyEventKind};
use ratatui::prelude::*;

use crate::tui::calendar::CalendarView;
use crate::tui::calendar_state::CalendarState;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_editor::EventEditor;
use crate::tui::event_form::{EditorRequest, EventFormStore, FormOutcome};

/// Runs the terminal calendar starting on the month of `start`, returns the store
/// once the user quits.
pub fn run_calendar(store: EventStore, start: NaiveDate) -> Result<EventStore, Box<dyn Error>> {
    let state = Rc::new(RefCell::new(CalendarState::new(store, today(), start)));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        CalendarState::register_to(state.clone(), &mut dispatcher);
        let mut view = CalendarView::new();

        loop {
            let area = match terminal.draw(|frame| draw(frame, &view, &state)) {
                Ok(frame) => frame.area,
                Err(e) => break Err(e.into()),
            };

            let key = match read_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => break Err(e),
            };

            match view.on_key(&mut dispatcher, &state, area, key) {
                Some(Message::Exit) => break Ok(()),
                Some(Message::OpenEditor(request)) => {
                    let backdrop = |frame: &mut Frame| draw(frame, &view, &state);
                    match run_editor(&mut terminal, &request, backdrop) {
                        Ok(form) => apply_form(&mut dispatcher, form),
                        Err(e) => break Err(e),
                    }
                }
                _ => {} // Continue the loop to render the next frame
            }
        }
    }; // release dispatcher and view here to avoid borrow conflicts
    ratatui::restore();
    result?;

    let owned_state = Rc::try_unwrap(state)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(owned_state.into_store())
}

/// Opens the event form for a new event on `date`, `None` if cancelled.
pub fn draft_event(date: NaiveDate) -> Result<Option<EventDraft>, Box<dyn Error>> {
    let form = run_standalone_editor(EditorRequest::New(date))?;
    match form.outcome {
        Some(FormOutcome::Save(draft)) => Ok(Some(draft)),
        _ => Ok(None),
    }
}

/// Opens the event form prefilled with `event`, `None` if cancelled.
pub fn edit_event(event: &Event) -> Result<Option<FormOutcome>, Box<dyn Error>> {
    let form = run_standalone_editor(EditorRequest::Edit(event.clone()))?;
    Ok(form.outcome)
}

fn run_standalone_editor(request: EditorRequest) -> Result<EventFormStore, Box<dyn Error>> {
    let mut terminal = ratatui::init();
    let result = run_editor(&mut terminal, &request, |_| {});
    ratatui::restore();
    result
}

fn run_editor<B: Backend>(
    terminal: &mut Terminal<B>,
    request: &EditorRequest,
    mut backdrop: impl FnMut(&mut Frame),
) -> Result<EventFormStore, Box<dyn Error>> {
    tracing::debug!(?request, "opening event editor");
    let store = Rc::new(RefCell::new(EventFormStore::new(request)));

    let result = {
        let mut dispatcher = Dispatcher::new();
        EventFormStore::register_to(store.clone(), &mut dispatcher);
        let mut editor = EventEditor::new(&store.borrow());
        editor.activate(&mut dispatcher, &store);

        loop {
            let drawn = terminal.draw(|frame| {
                backdrop(frame);
                draw(frame, &editor, &store);
            });
            let area = match drawn {
                Ok(frame) => frame.area,
                Err(e) => break Err(e.into()),
            };

            match read_key() {
                Ok(Some(key)) => {
                    if let Some(Message::Exit) = editor.on_key(&mut dispatcher, &store, area, key) {
                        break Ok(());
                    }
                }
                Ok(None) => {}
                Err(e) => break Err(e),
            }
        }
    };
    result?;

    let owned_store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(owned_store)
}

/// Turns a closed form into a store intent.
fn apply_form(dispatcher: &mut Dispatcher, form: EventFormStore) {
    match (form.outcome, form.existing_id) {
        (Some(FormOutcome::Save(draft)), existing_id) => {
            dispatcher.dispatch(Action::SaveEvent { draft, existing_id });
        }
        (Some(FormOutcome::Delete), Some(id)) => {
            dispatcher.dispatch(Action::DeleteEvent {
                id,
                date: form.date,
            });
        }
        (Some(FormOutcome::Delete), None) => {}
        (None, _) => tracing::info!("event editor cancelled"),
    }
}

fn draw<S, C: Component<S>>(frame: &mut Frame, component: &C, store: &RefCell<S>) {
    let area = frame.area();
    component.render(store, area, frame.buffer_mut());

    if let Some(cursor_pos) = component.get_cursor_position(store, area) {
        frame.set_cursor_position(cursor_pos);
    }
}

fn read_key() -> Result<Option<KeyEvent>, Box<dyn Error>> {
    match event::read()? {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}
