// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Form, FormItem, Input};
use crate::tui::component_page::{Modal, SinglePage};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_form::EventFormStore;

const EDITOR_WIDTH: u16 = 48;

/// The modal create / edit / delete form.
///
/// Enter submits, Esc cancels, Ctrl-D deletes the event being edited.
pub struct EventEditor(Modal<EventFormStore, EventForm>);

impl EventEditor {
    pub fn new(store: &EventFormStore) -> Self {
        let form = EventForm::new();
        let height = form.height() + 2; // borders

        let mut instructions = vec![("Save", "<Enter>"), ("Cancel", "<Esc>")];
        if store.is_editing() {
            instructions.push(("Delete", "<Ctrl-D>"));
        }
        let page = SinglePage::new(store.title(), form).with_instructions(instructions);
        Self(Modal::new(page, EDITOR_WIDTH, height))
    }
}

impl Component<EventFormStore> for EventEditor {
    fn render(&self, store: &RefCell<EventFormStore>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn get_cursor_position(
        &self,
        store: &RefCell<EventFormStore>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EventFormStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        match event.code {
            KeyCode::Enter => {
                dispatcher.dispatch(Action::SubmitChanges);
                match store.borrow().outcome {
                    Some(_) => Some(Message::Exit),
                    None => Some(Message::Handled),
                }
            }
            KeyCode::Char('d') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                if !store.borrow().is_editing() {
                    return Some(Message::Handled);
                }
                dispatcher.dispatch(Action::DiscardEvent);
                Some(Message::Exit)
            }
            _ => self.0.on_key(dispatcher, store, area, event),
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        self.0.deactivate(dispatcher, store);
    }
}

/// The form fields with an error line underneath.
pub struct EventForm(Form<EventFormStore, Box<dyn FormItem<EventFormStore>>>);

impl EventForm {
    pub fn new() -> Self {
        Self(Form::new(vec![
            Box::new(new_title()),
            Box::new(new_start_time()),
            Box::new(new_end_time()),
            Box::new(new_description()),
        ]))
    }

    pub fn height(&self) -> u16 {
        self.0.height() + 1
    }

    fn split(area: Rect) -> (Rect, Rect) {
        let [form, error] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        (form, error)
    }
}

impl Component<EventFormStore> for EventForm {
    fn render(&self, store: &RefCell<EventFormStore>, area: Rect, buf: &mut Buffer) {
        let (form, error) = Self::split(area);
        self.0.render(store, form, buf);
        if let Some(msg) = &store.borrow().error {
            Paragraph::new(format!(" {msg}"))
                .fg(Color::Red)
                .render(error, buf);
        }
    }

    fn get_cursor_position(
        &self,
        store: &RefCell<EventFormStore>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, Self::split(area).0)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EventFormStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, Self::split(area).0, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventFormStore>) {
        self.0.deactivate(dispatcher, store);
    }
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $action: ident) => {
        fn $fn() -> Input<EventFormStore, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<EventFormStore, String> for $acc {
            fn get(store: &RefCell<EventFormStore>) -> String {
                store.borrow().data.$field.clone()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::$action(value));
                true
            }
        }
    };
}

new_input!(new_title, "Event Title", TitleAccess, title, UpdateEventTitle);
new_input!(
    new_start_time,
    "Start Time",
    StartTimeAccess,
    start_time,
    UpdateEventStartTime
);
new_input!(
    new_end_time,
    "End Time",
    EndTimeAccess,
    end_time,
    UpdateEventEndTime
);
new_input!(
    new_description,
    "Description",
    DescriptionAccess,
    description,
    UpdateEventDescription
);
