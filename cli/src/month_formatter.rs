// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use kbcal_core::date::{WEEKDAY_NAMES, format_date};
use kbcal_core::{Event, EventStore, MonthGrid};
use unicode_width::UnicodeWidthStr;

use crate::util::truncate_to_width;

/// Titles shown in a day cell before the rest collapse into `+N more`.
pub const MAX_TITLES_PER_CELL: usize = 2;

/// What a day cell shows of its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSummary<'a> {
    pub titles: Vec<&'a str>,
    pub more: usize,
}

impl<'a> CellSummary<'a> {
    pub fn of(events: &'a [Event]) -> Self {
        Self {
            titles: events
                .iter()
                .take(MAX_TITLES_PER_CELL)
                .map(|e| e.title.as_str())
                .collect(),
            more: events.len().saturating_sub(MAX_TITLES_PER_CELL),
        }
    }

    pub fn more_label(&self) -> Option<String> {
        (self.more > 0).then(|| format!("+{} more", self.more))
    }

    /// Lines under the day number, titles first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.titles.iter().map(|t| t.to_string()).collect();
        lines.extend(self.more_label());
        lines
    }
}

#[derive(Debug)]
pub struct MonthFormatter {
    today: NaiveDate,
    cell_width: usize,
}

impl MonthFormatter {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            cell_width: 12,
        }
    }

    pub fn format<'a>(&'a self, grid: &'a MonthGrid, store: &'a EventStore) -> Display<'a> {
        Display {
            formatter: self,
            grid,
            store,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    formatter: &'a MonthFormatter,
    grid: &'a MonthGrid,
    store: &'a EventStore,
}

impl Display<'_> {
    fn write_row(&self, f: &mut fmt::Formatter<'_>, cells: &[String]) -> fmt::Result {
        let width = self.formatter.cell_width;
        let line = cells
            .iter()
            .map(|c| {
                let c = truncate_to_width(c, width);
                format!("{c}{}", " ".repeat(width - c.width()))
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "{}", line.trim_end())
    }

    fn day_label(&self, date: NaiveDate) -> String {
        let label = format!("{:>2}", date.day());
        if date == self.formatter.today {
            format!("{label}*")
        } else {
            label
        }
    }
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.formatter.cell_width;
        let total = width * 7 + 6;
        let title = self.grid.title();
        let left = total.saturating_sub(title.width()) / 2;
        writeln!(f, "{}{}", " ".repeat(left), title.as_str().bold())?;

        let header: Vec<String> = WEEKDAY_NAMES.iter().map(|d| d.to_string()).collect();
        self.write_row(f, &header)?;

        for week in self.grid.weeks() {
            let summaries: Vec<Option<CellSummary>> = week
                .iter()
                .map(|d| d.map(|d| CellSummary::of(self.store.events_on(&format_date(d)))))
                .collect();

            let days: Vec<String> = week
                .iter()
                .map(|d| d.map(|d| self.day_label(d)).unwrap_or_default())
                .collect();
            self.write_row(f, &days)?;

            let lines: Vec<Vec<String>> = summaries
                .iter()
                .map(|s| s.as_ref().map(CellSummary::lines).unwrap_or_default())
                .collect();
            let height = lines.iter().map(Vec::len).max().unwrap_or(0);
            for i in 0..height {
                let row: Vec<String> = lines
                    .iter()
                    .map(|l| l.get(i).cloned().unwrap_or_default())
                    .collect();
                self.write_row(f, &row)?;
            }
        }
        Ok(())
    }
}
