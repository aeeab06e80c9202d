// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use clap::{Arg, ArgMatches, arg, value_parser};
use clap_num::number_range;

use crate::util::{OutputFormat, parse_date_arg, parse_time_arg};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    /// The `YYYY-MM-DD` date to work on, positional or as `--date`.
    pub fn date(positional: bool) -> Arg {
        let arg = match positional {
            true => arg!(date: [DATE] "Date in YYYY-MM-DD, defaults to today"),
            false => arg!(--date <DATE> "Date in YYYY-MM-DD, defaults to today"),
        };
        arg.value_parser(parse_date_arg)
    }

    pub fn get_date(matches: &ArgMatches) -> Option<NaiveDate> {
        matches.get_one("date").copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "The id of the event")
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("id")
            .cloned()
            .unwrap_or_default()
    }

    pub fn title(positional: bool) -> Arg {
        if positional {
            arg!(title: [TITLE] "Title of the event")
        } else {
            arg!(title: -t --title <TITLE> "Title of the event")
        }
    }

    pub fn get_title(matches: &ArgMatches) -> Option<String> {
        matches.get_one("title").cloned()
    }

    pub fn start() -> Arg {
        arg!(--start <START> "Start time of the event, HH:MM").value_parser(parse_time_arg)
    }

    pub fn get_start(matches: &ArgMatches) -> Option<String> {
        matches.get_one("start").cloned()
    }

    pub fn end() -> Arg {
        arg!(--end <END> "End time of the event, HH:MM").value_parser(parse_time_arg)
    }

    pub fn get_end(matches: &ArgMatches) -> Option<String> {
        matches.get_one("end").cloned()
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the event")
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MonthArgs;

impl MonthArgs {
    pub fn year() -> Arg {
        arg!(--year <YEAR> "Year of the month, defaults to the current year")
            .value_parser(value_parser!(i32))
    }

    pub fn get_year(matches: &ArgMatches) -> Option<i32> {
        matches.get_one("year").copied()
    }

    pub fn month() -> Arg {
        fn from_1_to_12(s: &str) -> Result<u32, String> {
            number_range(s, 1, 12)
        }

        arg!(--month <MONTH> "Month number (1-12), defaults to the current month")
            .value_parser(from_1_to_12)
    }

    pub fn get_month(matches: &ArgMatches) -> Option<u32> {
        matches.get_one("month").copied()
    }
}
