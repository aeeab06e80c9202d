// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Commands that show the calendar: the interactive terminal calendar and its
//! printable month and day views.

use std::error::Error;

use chrono::{Datelike, NaiveDate};
use clap::{ArgMatches, Command};
use colored::Colorize;
use kbcal_core::date::{format_date, today};
use kbcal_core::{EventStore, MonthGrid};

use crate::arg::{CommonArgs, MonthArgs};
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::month_formatter::MonthFormatter;
use crate::tui;
use crate::util::OutputFormat;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdCalendar {
    pub date: Option<NaiveDate>,
}

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Open the interactive calendar")
            .arg(CommonArgs::date(false))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: CommonArgs::get_date(matches),
        }
    }

    pub fn run(self, store: EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "opening calendar...");
        let store = tui::run_calendar(store, self.date.unwrap_or_else(today))?;
        tracing::debug!(events = store.len(), "calendar closed");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdMonth {
    pub year: Option<i32>,
    /// 1-based month number.
    pub month: Option<u32>,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the month grid")
            .arg(MonthArgs::year())
            .arg(MonthArgs::month())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            year: MonthArgs::get_year(matches),
            month: MonthArgs::get_month(matches),
        }
    }

    pub fn run(self, store: &EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "printing month...");
        let today = today();
        print!("{}", self.render(store, today));
        Ok(())
    }

    fn render(self, store: &EventStore, today: NaiveDate) -> String {
        let year = self.year.unwrap_or(today.year());
        let month = self.month.unwrap_or(today.month());
        let grid = MonthGrid::new(year, month as i32 - 1);
        MonthFormatter::new(today).format(&grid, store).to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdDay {
    pub date: Option<NaiveDate>,
    pub output_format: OutputFormat,
}

impl CmdDay {
    pub const NAME: &str = "day";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the events of a day")
            .arg(CommonArgs::date(true))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: CommonArgs::get_date(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, store: &EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events of day...");
        let date = format_date(self.date.unwrap_or_else(today));
        let events = store.events_on(&date);
        if events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", format!("No events on {date}").as_str().italic());
            return Ok(());
        }

        let formatter =
            EventFormatter::new(EventColumn::day()).with_output_format(self.output_format);
        println!("{}", formatter.format(events));
        Ok(())
    }
}
