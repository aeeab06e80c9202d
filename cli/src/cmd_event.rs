// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::NaiveDate;
use clap::{ArgMatches, Command};
use colored::Colorize;
use kbcal_core::date::{format_date, today};
use kbcal_core::{Event, EventDraft, EventStore};

use crate::arg::{CommonArgs, EventArgs};
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::tui::{self, FormOutcome};
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,

    pub tui: bool,
    pub output_format: OutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event, opens the event form when no title is given")
            .arg(EventArgs::title(true))
            .arg(CommonArgs::date(false))
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(EventArgs::description())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let date = CommonArgs::get_date(matches);
        let start = EventArgs::get_start(matches);
        let end = EventArgs::get_end(matches);
        let description = EventArgs::get_description(matches);

        let title = match EventArgs::get_title(matches) {
            Some(title) => Some(title),
            None if start.is_none() && end.is_none() && description.is_none() => None,
            // other fields without a title would silently open the form
            None => return Err("Title is required for new event".into()),
        };

        let tui = title.is_none();
        Ok(Self {
            title,
            date,
            start,
            end,
            description,

            tui,
            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub fn run(self, store: &mut EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        warn_if_unsaved(store);
        let date = self.date.unwrap_or_else(today);
        let draft = if self.tui {
            match tui::draft_event(date)? {
                Some(draft) => draft,
                None => {
                    tracing::info!("user cancel the event creation");
                    return Ok(());
                }
            }
        } else {
            EventDraft {
                title: self.title.unwrap_or_default(),
                start_time: self
                    .start
                    .unwrap_or_else(|| EventDraft::DEFAULT_START.to_string()),
                end_time: self
                    .end
                    .unwrap_or_else(|| EventDraft::DEFAULT_END.to_string()),
                description: self.description.filter(|d| !d.is_empty()),
                date: format_date(date),
            }
        };

        draft.validate()?;
        let event = store.save(draft, None)?;
        print_events(&[event], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,

    pub tui: bool,
    pub output_format: OutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event, opens the event form when no field is given")
            .arg(EventArgs::id())
            .arg(EventArgs::title(false))
            .arg(CommonArgs::date(false))
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(EventArgs::description())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let title = EventArgs::get_title(matches);
        let date = CommonArgs::get_date(matches);
        let start = EventArgs::get_start(matches);
        let end = EventArgs::get_end(matches);
        let description = EventArgs::get_description(matches);

        let tui = title.is_none()
            && date.is_none()
            && start.is_none()
            && end.is_none()
            && description.is_none();

        Self {
            id: EventArgs::get_id(matches),
            title,
            date,
            start,
            end,
            description,

            tui,
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, store: &mut EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        warn_if_unsaved(store);
        let event = find_event(store, &self.id)?;

        let draft = if self.tui {
            match tui::edit_event(&event)? {
                Some(FormOutcome::Save(draft)) => draft,
                Some(FormOutcome::Delete) => {
                    return CmdEventDelete::delete(store, &event, self.output_format);
                }
                None => {
                    tracing::info!(id = %self.id, "user cancel the event editing");
                    return Ok(());
                }
            }
        } else {
            let mut draft = event.to_draft();
            if let Some(title) = self.title {
                draft.title = title;
            }
            if let Some(date) = self.date {
                draft.date = format_date(date);
            }
            if let Some(start) = self.start {
                draft.start_time = start;
            }
            if let Some(end) = self.end {
                draft.end_time = end;
            }
            if let Some(description) = self.description {
                // an empty value clears the description
                draft.description = (!description.is_empty()).then_some(description);
            }
            draft
        };

        draft.validate()?;
        let event = store.save(draft, Some(&event.id))?;
        print_events(&[event], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
    pub output_format: OutputFormat,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(EventArgs::id())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self, store: &mut EventStore) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        warn_if_unsaved(store);
        let event = find_event(store, &self.id)?;
        Self::delete(store, &event, self.output_format)
    }

    fn delete(
        store: &mut EventStore,
        event: &Event,
        output_format: OutputFormat,
    ) -> Result<(), Box<dyn Error>> {
        match store.delete(&event.id, &event.date)? {
            Some(event) => {
                if output_format == OutputFormat::Table {
                    println!("{}", "Deleted".italic());
                }
                print_events(&[event], output_format);
            }
            None => return Err(format!("Event not found: {}", event.id).into()),
        }
        Ok(())
    }
}

fn unsaved_warning(store: &EventStore) -> Option<&'static str> {
    (!store.is_persistent()).then_some("no state directory found, changes will not be saved")
}

fn warn_if_unsaved(store: &EventStore) {
    if let Some(msg) = unsaved_warning(store) {
        eprintln!("{} {}", "Warning:".yellow(), msg);
    }
}

fn find_event(store: &EventStore, id: &str) -> Result<Event, Box<dyn Error>> {
    store
        .find(id)
        .cloned()
        .ok_or_else(|| format!("Event not found: {id}").into())
}

fn print_events(events: &[Event], output_format: OutputFormat) {
    let formatter = EventFormatter::new(EventColumn::single()).with_output_format(output_format);
    println!("{}", formatter.format(events));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;
    use kbcal_core::{Config, MemoryStorage, STORAGE_KEY};

    fn parse_new(args: &[&str]) -> Result<CmdEventNew, Box<dyn Error>> {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventNew::command());
        let matches = cmd.try_get_matches_from(args)?;
        let sub_matches = matches.subcommand_matches("new").unwrap();
        CmdEventNew::from(sub_matches)
    }

    fn parse_edit(args: &[&str]) -> CmdEventEdit {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventEdit::command());
        let matches = cmd.try_get_matches_from(args).unwrap();
        let sub_matches = matches.subcommand_matches("edit").unwrap();
        CmdEventEdit::from(sub_matches)
    }

    fn store_with_standup() -> (EventStore, Event) {
        let mut store = EventStore::load(MemoryStorage::new());
        let draft = EventDraft {
            title: "Standup".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:15".to_string(),
            description: Some("daily".to_string()),
            date: "2024-03-05".to_string(),
        };
        let event = store.save(draft, None).unwrap();
        (store, event)
    }

    #[test]
    fn test_parse_event_new() {
        let parsed = parse_new(&[
            "test",
            "new",
            "Standup",
            "--date",
            "2024-03-05",
            "--start",
            "09:00",
            "--end",
            "09:15",
            "--description",
            "daily sync",
            "--output-format",
            "json",
        ])
        .unwrap();

        assert_eq!(parsed.title, Some("Standup".to_string()));
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parsed.start, Some("09:00".to_string()));
        assert_eq!(parsed.end, Some("09:15".to_string()));
        assert_eq!(parsed.description, Some("daily sync".to_string()));
        assert!(!parsed.tui);
        assert_eq!(parsed.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_new_tui() {
        let parsed = parse_new(&["test", "new"]).unwrap();
        assert!(parsed.tui);

        let parsed = parse_new(&["test", "add", "--date", "2024-03-05"]).unwrap();
        assert!(parsed.tui);
    }

    #[test]
    fn test_parse_new_without_title_invalid() {
        assert!(parse_new(&["test", "new", "--start", "09:00"]).is_err());
    }

    #[test]
    fn test_parse_new_rejects_bad_values() {
        assert!(parse_new(&["test", "new", "Standup", "--start", "9am"]).is_err());
        assert!(parse_new(&["test", "new", "Standup", "--date", "2024-3-5"]).is_err());
    }

    #[test]
    fn test_parse_edit() {
        let parsed = parse_edit(&[
            "test",
            "edit",
            "abc",
            "--title",
            "Daily standup",
            "--end",
            "09:30",
        ]);
        assert_eq!(parsed.id, "abc");
        assert_eq!(parsed.title, Some("Daily standup".to_string()));
        assert_eq!(parsed.end, Some("09:30".to_string()));
        assert_eq!(parsed.start, None);
        assert!(!parsed.tui);

        let parsed = parse_edit(&["test", "edit", "abc"]);
        assert!(parsed.tui);
    }

    #[test]
    fn test_run_new_saves_event() {
        let mut store = EventStore::load(MemoryStorage::new());
        let cmd = parse_new(&["test", "new", "Lunch", "--date", "2024-03-05"]).unwrap();
        cmd.run(&mut store).unwrap();

        let events = store.events_on("2024-03-05");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Lunch");
        assert_eq!(events[0].start_time, "09:00");
        assert_eq!(events[0].end_time, "10:00");
    }

    #[test]
    fn test_run_new_rejects_blank_title() {
        let mut store = EventStore::load(MemoryStorage::new());
        let cmd = parse_new(&["test", "new", "  ", "--date", "2024-03-05"]).unwrap();
        let err = cmd.run(&mut store).unwrap_err();
        assert_eq!(err.to_string(), "Event title is required");
        assert!(store.is_empty());
    }

    #[test]
    fn test_run_edit_merges_fields() {
        let (mut store, event) = store_with_standup();
        let cmd = parse_edit(&[
            "test",
            "edit",
            event.id.as_str(),
            "--end",
            "09:30",
            "--description",
            "",
        ]);
        cmd.run(&mut store).unwrap();

        let updated = store.find(&event.id).unwrap();
        assert_eq!(updated.title, "Standup");
        assert_eq!(updated.end_time, "09:30");
        assert_eq!(updated.description, None);
    }

    #[test]
    fn test_run_edit_moves_date() {
        let (mut store, event) = store_with_standup();
        let cmd = parse_edit(&["test", "edit", event.id.as_str(), "--date", "2024-03-06"]);
        cmd.run(&mut store).unwrap();

        assert!(store.events_on("2024-03-05").is_empty());
        assert_eq!(store.events_on("2024-03-06")[0].id, event.id);
    }

    #[test]
    fn test_run_edit_unknown_id() {
        let (mut store, _) = store_with_standup();
        let cmd = parse_edit(&["test", "edit", "missing", "--title", "x"]);
        let err = cmd.run(&mut store).unwrap_err();
        assert_eq!(err.to_string(), "Event not found: missing");
    }

    #[test]
    fn test_run_delete() {
        let (mut store, event) = store_with_standup();
        let cmd = CmdEventDelete {
            id: event.id.clone(),
            output_format: OutputFormat::Json,
        };
        cmd.run(&mut store).unwrap();
        assert!(store.is_empty());

        let cmd = CmdEventDelete {
            id: event.id,
            output_format: OutputFormat::Json,
        };
        assert!(cmd.run(&mut store).is_err());
    }

    #[test]
    fn test_run_delete_event_filed_under_other_date() {
        let blob = r#"{"2024-03-05":[{"id":"a","title":"Standup","startTime":"09:00","endTime":"09:15","date":"2024-03-06"}]}"#;
        let mut store = EventStore::load(MemoryStorage::with(STORAGE_KEY, blob));
        let cmd = CmdEventDelete {
            id: "a".to_string(),
            output_format: OutputFormat::Json,
        };
        cmd.run(&mut store).unwrap();
        assert!(store.is_empty());
        assert!(store.find("a").is_none());
    }

    #[test]
    fn test_unsaved_warning() {
        let (store, _) = store_with_standup();
        assert_eq!(unsaved_warning(&store), None);

        let store = EventStore::open(&Config::default());
        let msg = unsaved_warning(&store).unwrap();
        assert!(msg.contains("will not be saved"));
    }
}
