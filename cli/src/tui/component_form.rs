// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::marker::PhantomData;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::util::unicode_width_of_slice;

/// A vertical list of labelled items, Up/Down and Tab/BackTab move between them.
pub struct Form<S, C: FormItem<S>> {
    items: Vec<C>,
    item_index: usize,
    _phantom: PhantomData<S>,
}

impl<S, C: FormItem<S>> Form<S, C> {
    pub fn new(items: Vec<C>) -> Self {
        Self {
            items,
            item_index: 0,
            _phantom: PhantomData,
        }
    }

    /// Height of the form, 3 lines per item plus the margin.
    pub fn height(&self) -> u16 {
        self.items.len() as u16 * 3 + 2
    }

    fn layout(&self) -> Layout {
        Layout::vertical(self.items.iter().map(|_| Constraint::Max(3))).margin(1)
    }

    fn navigate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>, offset: isize) {
        if let Some(a) = self.items.get_mut(self.item_index) {
            a.deactivate(dispatcher, store);
        }

        let len = self.items.len() as isize;
        self.item_index = (self.item_index as isize + offset).rem_euclid(len) as usize;

        if let Some(a) = self.items.get_mut(self.item_index) {
            a.activate(dispatcher, store);
        }
    }
}

impl<S, C: FormItem<S>> Component<S> for Form<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout().split(area);
        let last = self.items.len().saturating_sub(1);
        // reverse order to draw the last item first
        for (i, (item, area)) in self.items.iter().zip(areas.iter()).enumerate().rev() {
            item_render(i == last, item, *area, buf);
            item.render(store, item_inner(*area), buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let areas = self.layout().split(area);
        match (self.items.get(self.item_index), areas.get(self.item_index)) {
            (Some(item), Some(area)) => item.get_cursor_position(store, *area),
            _ => None,
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let areas = self.layout().split(area);
        if let (Some(item), Some(subarea)) =
            (self.items.get_mut(self.item_index), areas.get(self.item_index))
            && let Some(msg) = item.on_key(dispatcher, store, *subarea, event)
        {
            return Some(msg);
        };

        match event.code {
            KeyCode::Up | KeyCode::BackTab if !self.items.is_empty() => {
                self.navigate(dispatcher, store, -1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Down | KeyCode::Tab if !self.items.is_empty() => {
                self.navigate(dispatcher, store, 1);
                Some(Message::CursorUpdated)
            }
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.activate(dispatcher, store);
        }
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
    }
}

pub trait FormItem<S>: Component<S> {
    fn item_title(&self) -> &str;
    fn item_state(&self) -> FormItemState;
}

impl<S> FormItem<S> for Box<dyn FormItem<S>> {
    fn item_title(&self) -> &str {
        (**self).item_title()
    }

    fn item_state(&self) -> FormItemState {
        (**self).item_state()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormItemState {
    /// Focused, receives the keys.
    Active,
    Inactive,
}

/// Reads a field out of the store and writes it back through the dispatcher.
pub trait Access<S, T: ToOwned> {
    fn get(store: &RefCell<S>) -> T;
    fn set(dispatcher: &mut Dispatcher, value: T) -> bool;
}

/// A single line text input.
#[derive(Debug)]
pub struct Input<S, A: Access<S, String>> {
    title: String,
    active: bool,
    /// Cursor position, counted in chars.
    character_index: usize,
    _phantom_s: PhantomData<S>,
    _phantom_a: PhantomData<A>,
}

impl<S, A: Access<S, String>> Input<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            character_index: 0,
            _phantom_a: PhantomData,
            _phantom_s: PhantomData,
        }
    }
}

impl<S, A: Access<S, String>> Component<S> for Input<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        Paragraph::new(v.as_str()).render(area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None; // No cursor position when not active
        }

        let v = A::get(store);
        let width = unicode_width_of_slice(v.as_str(), self.character_index);
        let x = area.x + (width as u16) + 2; // sider 1 + padding 1
        let y = area.y + 1; // title line: 1
        Some((x, y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;
        if !self.active || !matches!(event.code, Left | Right | Home | End | Backspace | Char(_)) {
            return None;
        }

        let len = A::get(store).chars().count();
        match event.code {
            Left if self.character_index > 0 => self.character_index -= 1,
            Right if self.character_index < len => self.character_index += 1,
            Home => self.character_index = 0,
            End => self.character_index = len,
            Backspace if self.character_index > 0 => {
                let mut v = A::get(store);
                if let Some((byte_index, _)) = v.char_indices().nth(self.character_index - 1) {
                    v.remove(byte_index);
                    if A::set(dispatcher, v) {
                        self.character_index -= 1;
                    }
                }
            }
            Char(c) => {
                let mut v = A::get(store);
                let byte_index = v
                    .char_indices()
                    .nth(self.character_index)
                    .map(|(i, _)| i)
                    .unwrap_or(v.len());
                v.insert(byte_index, c);
                if A::set(dispatcher, v) {
                    self.character_index += 1;
                }
            }
            _ => {}
        };

        // Always update the cursor position for simplicity
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.active = true;
        self.character_index = A::get(store).chars().count(); // continue typing at the end
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
        self.character_index = 0;
    }
}

impl<S, A: Access<S, String>> FormItem<S> for Input<S, A> {
    fn item_title(&self) -> &str {
        &self.title
    }

    fn item_state(&self) -> FormItemState {
        if self.active {
            FormItemState::Active
        } else {
            FormItemState::Inactive
        }
    }
}

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";

const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

fn item_render<S>(is_last: bool, item: &impl FormItem<S>, area: Rect, buf: &mut Buffer) {
    let (color, symbol) = match item.item_state() {
        FormItemState::Active => (Color::Blue, S_STEP_ACTIVE),
        FormItemState::Inactive => (Color::Gray, S_STEP_INACTIVE),
    };

    let area_title = Rect::new(area.x + 2, area.y, area.width.saturating_sub(2), 1);
    Clear.render(area_title, buf);
    Paragraph::new(item.item_title())
        .bold()
        .fg(color)
        .render(area_title, buf);

    if let Some(c) = buf.cell_mut((area.x, area.y)) {
        c.set_symbol(symbol);
        c.set_fg(color);
    }

    for y in 1..area.height.saturating_sub(1) {
        if let Some(c) = buf.cell_mut((area.x, area.y + y)) {
            c.set_symbol(S_SIDER_CONNECTOR);
            c.set_fg(color);
        }
    }

    if let Some(c) = buf.cell_mut((area.x, area.y + area.height.saturating_sub(1))) {
        let symbol = if is_last {
            S_SIDER_BOTTOM
        } else {
            S_SIDER_CONNECTOR
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }
}

fn item_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ratatui::crossterm::event::KeyModifiers;

    use super::*;
    use crate::tui::dispatcher::Action;

    struct TextAccess;

    impl Access<String, String> for TextAccess {
        fn get(store: &RefCell<String>) -> String {
            store.borrow().clone()
        }

        fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
            dispatcher.dispatch(Action::UpdateEventTitle(value));
            true
        }
    }

    fn setup(initial: &str) -> (Rc<RefCell<String>>, Dispatcher) {
        let store = Rc::new(RefCell::new(initial.to_string()));
        let mut dispatcher = Dispatcher::new();
        let that = store.clone();
        dispatcher.register(Rc::new(RefCell::new(move |action: &Action| {
            if let Action::UpdateEventTitle(v) = action {
                *that.borrow_mut() = v.clone();
            }
        })));
        (store, dispatcher)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_input_edits_at_cursor() {
        let (store, mut dispatcher) = setup("Stand");
        let mut input: Input<String, TextAccess> = Input::new("Title");
        let area = Rect::new(0, 0, 20, 3);

        input.activate(&mut dispatcher, &store);
        for c in "up".chars() {
            input.on_key(&mut dispatcher, &store, area, key(KeyCode::Char(c)));
        }
        assert_eq!(*store.borrow(), "Standup");

        input.on_key(&mut dispatcher, &store, area, key(KeyCode::Home));
        input.on_key(&mut dispatcher, &store, area, key(KeyCode::Right));
        input.on_key(&mut dispatcher, &store, area, key(KeyCode::Backspace));
        assert_eq!(*store.borrow(), "tandup");

        input.on_key(&mut dispatcher, &store, area, key(KeyCode::Char('中')));
        assert_eq!(*store.borrow(), "中tandup");
        assert_eq!(input.get_cursor_position(&store, area), Some((4, 1)));
    }

    #[test]
    fn test_inactive_input_ignores_keys() {
        let (store, mut dispatcher) = setup("Standup");
        let mut input: Input<String, TextAccess> = Input::new("Title");
        let area = Rect::new(0, 0, 20, 3);

        let msg = input.on_key(&mut dispatcher, &store, area, key(KeyCode::Char('x')));
        assert_eq!(msg, None);
        assert_eq!(*store.borrow(), "Standup");
        assert_eq!(input.get_cursor_position(&store, area), None);
    }

    #[test]
    fn test_form_moves_focus_and_wraps() {
        let (store, mut dispatcher) = setup("");
        let mut form: Form<String, Box<dyn FormItem<String>>> = Form::new(vec![
            Box::new(Input::<String, TextAccess>::new("A")),
            Box::new(Input::<String, TextAccess>::new("B")),
        ]);
        let area = Rect::new(0, 0, 20, form.height());
        form.activate(&mut dispatcher, &store);
        assert_eq!(form.items[0].item_state(), FormItemState::Active);

        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Tab));
        assert_eq!(form.items[0].item_state(), FormItemState::Inactive);
        assert_eq!(form.items[1].item_state(), FormItemState::Active);

        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Down));
        assert_eq!(form.items[0].item_state(), FormItemState::Active);

        form.on_key(&mut dispatcher, &store, area, key(KeyCode::BackTab));
        assert_eq!(form.items[1].item_state(), FormItemState::Active);
    }
}
