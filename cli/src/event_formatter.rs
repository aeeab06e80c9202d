// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use kbcal_core::Event;
use kbcal_core::date::format_time;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>) -> Self {
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> impl fmt::Display + 'a {
        Table::new(self.format, self.columns.as_slice(), events)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    Id,
    Date,
    TimeRange,
    Title,
    Description,
}

impl EventColumn {
    /// Columns of a day listing, the date is implied.
    pub fn day() -> Vec<Self> {
        vec![Self::Id, Self::TimeRange, Self::Title, Self::Description]
    }

    /// Columns of a single event echoed back after a change.
    pub fn single() -> Vec<Self> {
        vec![
            Self::Id,
            Self::Date,
            Self::TimeRange,
            Self::Title,
            Self::Description,
        ]
    }
}

impl TableColumn<Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id => "Id",
            EventColumn::Date => "Date",
            EventColumn::TimeRange => "Time Range",
            EventColumn::Title => "Title",
            EventColumn::Description => "Description",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        match self {
            EventColumn::Id => event.id.as_str().into(),
            EventColumn::Date => event.date.as_str().into(),
            EventColumn::TimeRange => format_time_range(event).into(),
            EventColumn::Title => event.title.as_str().into(),
            EventColumn::Description => event.description.as_deref().unwrap_or_default().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::TimeRange => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, _event: &Event) -> Option<Color> {
        match self {
            EventColumn::Id | EventColumn::Description => Some(Color::BrightBlack),
            _ => None,
        }
    }
}

/// `9:00 AM - 9:15 AM`
pub fn format_time_range(event: &Event) -> String {
    format!(
        "{} - {}",
        format_time(&event.start_time),
        format_time(&event.end_time)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> Event {
        serde_json::from_str(
            r#"{"id":"e1","title":"Standup","startTime":"09:00","endTime":"09:15","description":"Room 4","date":"2024-03-05"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_format_time_range() {
        assert_eq!(format_time_range(&event()), "9:00 AM - 9:15 AM");
    }

    #[test]
    fn test_format_table() {
        colored::control::set_override(false);
        let events = vec![event()];
        let formatter = EventFormatter::new(EventColumn::day());
        let out = formatter.format(&events).to_string();
        assert_eq!(out, "e1  9:00 AM - 9:15 AM  Standup  Room 4\n");
    }

    #[test]
    fn test_format_json() {
        let events = vec![event()];
        let formatter =
            EventFormatter::new(EventColumn::single()).with_output_format(OutputFormat::Json);
        let out = formatter.format(&events).to_string();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["id"], "e1");
        assert_eq!(json[0]["date"], "2024-03-05");
        assert_eq!(json[0]["time_range"], "9:00 AM - 9:15 AM");
        assert_eq!(json[0]["title"], "Standup");
        assert_eq!(json[0]["description"], "Room 4");
    }
}
