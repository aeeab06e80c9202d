// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod app;
mod calendar;
mod calendar_state;
mod component;
mod component_form;
mod component_page;
mod day_list;
mod dispatcher;
mod event_editor;
mod event_form;
mod month_view;

pub use app::{draft_event, edit_event, run_calendar};
pub use event_form::FormOutcome;
