// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashSet};
use std::{fmt, io};

use uuid::Uuid;

use crate::config::Config;
use crate::event::{Event, EventDraft};
use crate::storage::{FileStorage, MemoryStorage, Storage};

/// The storage key the whole store is serialized under.
pub const STORAGE_KEY: &str = "calendarEvents";

/// Events grouped by their canonical `YYYY-MM-DD` date key, each list in insertion order.
pub type EventMap = BTreeMap<String, Vec<Event>>;

type Subscriber = Box<dyn FnMut(&StoreChange)>;

/// A mutation applied to the store, delivered to subscribers after it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Created(Event),
    Updated(Event),
    Deleted(Event),
}

impl StoreChange {
    pub fn event(&self) -> &Event {
        match self {
            StoreChange::Created(e) | StoreChange::Updated(e) | StoreChange::Deleted(e) => e,
        }
    }
}

impl fmt::Display for StoreChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (verb, event) = match self {
            StoreChange::Created(e) => ("Created", e),
            StoreChange::Updated(e) => ("Updated", e),
            StoreChange::Deleted(e) => ("Deleted", e),
        };
        write!(f, "{verb} \"{}\" on {}", event.title, event.date)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize events: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write events to storage: {0}")]
    Storage(#[from] io::Error),
}

/// The date-keyed collection of all events.
///
/// Hydrated once from its [`Storage`], then every mutation rewrites the whole blob.
/// `save` and `delete` are the only write paths.
pub struct EventStore {
    events: EventMap,
    storage: Box<dyn Storage>,
    subscribers: Vec<Subscriber>,
    persistent: bool,
}

impl EventStore {
    /// Loads the store from `storage`.
    ///
    /// A missing, unreadable or malformed blob yields an empty store. Events filed
    /// under another date take the date of their list, repeated ids are reissued.
    pub fn load(storage: impl Storage + 'static) -> Self {
        let mut events = match storage.get(STORAGE_KEY) {
            Ok(Some(blob)) => match Self::from_blob(&blob) {
                Ok(events) => {
                    tracing::debug!(dates = events.len(), "loaded events from storage");
                    events
                }
                Err(e) => {
                    tracing::warn!(err = %e, "stored events are malformed, starting empty");
                    EventMap::new()
                }
            },
            Ok(None) => EventMap::new(),
            Err(e) => {
                tracing::warn!(err = %e, "failed to read stored events, starting empty");
                EventMap::new()
            }
        };

        repair(&mut events);
        Self {
            events,
            storage: Box::new(storage),
            subscribers: Vec::new(),
            persistent: true,
        }
    }

    /// Opens the store in the configured state directory.
    ///
    /// Without a state directory nothing is persisted.
    pub fn open(config: &Config) -> Self {
        match &config.state_dir {
            Some(dir) => Self::load(FileStorage::new(dir)),
            None => {
                tracing::warn!("no state directory configured, events will not be saved");
                Self {
                    persistent: false,
                    ..Self::load(MemoryStorage::new())
                }
            }
        }
    }

    /// Whether mutations outlive the process.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Deserializes a persisted blob.
    pub fn from_blob(blob: &str) -> Result<EventMap, serde_json::Error> {
        serde_json::from_str(blob)
    }

    /// Serializes the whole store into a blob.
    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.events)
    }

    pub fn events(&self) -> &EventMap {
        &self.events
    }

    /// Events on the given date in insertion order, empty if there are none.
    pub fn events_on(&self, date: &str) -> &[Event] {
        self.events.get(date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.values().flatten().find(|e| e.id == id)
    }

    /// Dates holding at least one event, ascending.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.events
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(date, _)| date.as_str())
    }

    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a callback invoked after every successful mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&StoreChange) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Saves a draft.
    ///
    /// If `existing_id` names a stored event, that event is replaced and keeps its id:
    /// in place when the date is unchanged, otherwise it moves to the end of the new
    /// date's list. Anything else appends a new event with a fresh id.
    pub fn save(
        &mut self,
        draft: EventDraft,
        existing_id: Option<&str>,
    ) -> Result<Event, StoreError> {
        tracing::debug!(?draft, existing_id, "saving event");
        let change = match existing_id.and_then(|id| self.locate(id)) {
            Some((old_date, index)) => {
                let id = self.events[&old_date][index].id.clone();
                let event = Event::from_draft(id, draft);
                if old_date == event.date {
                    if let Some(list) = self.events.get_mut(&old_date) {
                        list[index] = event.clone();
                    }
                } else {
                    self.remove_at(&old_date, index);
                    self.push(event.clone());
                }
                StoreChange::Updated(event)
            }
            None => {
                if let Some(id) = existing_id {
                    tracing::debug!(id, "event to replace not found, adding a new one");
                }
                let event = Event::from_draft(self.generate_id(), draft);
                self.push(event.clone());
                StoreChange::Created(event)
            }
        };

        self.persist()?;
        let event = change.event().clone();
        self.notify(&change);
        Ok(event)
    }

    /// Removes the event `id` from the list at `date`.
    ///
    /// Returns the removed event, or `None` without touching storage if it is absent.
    pub fn delete(&mut self, id: &str, date: &str) -> Result<Option<Event>, StoreError> {
        let Some(index) = self
            .events
            .get(date)
            .and_then(|list| list.iter().position(|e| e.id == id))
        else {
            tracing::debug!(id, date, "event to delete not found");
            return Ok(None);
        };

        let event = self.remove_at(date, index);
        self.persist()?;
        let change = StoreChange::Deleted(event.clone());
        self.notify(&change);
        Ok(Some(event))
    }

    fn locate(&self, id: &str) -> Option<(String, usize)> {
        self.events.iter().find_map(|(date, list)| {
            list.iter()
                .position(|e| e.id == id)
                .map(|index| (date.clone(), index))
        })
    }

    fn push(&mut self, event: Event) {
        self.events
            .entry(event.date.clone())
            .or_default()
            .push(event);
    }

    /// Removes by position, dropping the list once it is empty.
    fn remove_at(&mut self, date: &str, index: usize) -> Event {
        let list = self.events.entry(date.to_string()).or_default();
        let event = list.remove(index);
        if list.is_empty() {
            self.events.remove(date);
        }
        event
    }

    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.find(&id).is_none() {
                return id;
            }
            tracing::warn!(%id, "generated id already exists, retrying");
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let blob = self.to_blob()?;
        self.storage.set(STORAGE_KEY, &blob)?;
        Ok(())
    }

    fn notify(&mut self, change: &StoreChange) {
        for subscriber in &mut self.subscribers {
            subscriber(change);
        }
    }
}

/// Restores the date/key invariant of a freshly loaded map and makes ids unique.
fn repair(events: &mut EventMap) {
    let mut seen = HashSet::new();
    for (date, list) in events.iter_mut() {
        for event in list.iter_mut() {
            if &event.date != date {
                tracing::warn!(
                    id = %event.id,
                    %date,
                    stored = %event.date,
                    "event filed under another date, taking the list date"
                );
                event.date = date.clone();
            }
            if !seen.insert(event.id.clone()) {
                let id = Uuid::new_v4().to_string();
                tracing::warn!(old = %event.id, new = %id, "duplicate event id, reissuing");
                event.id = id;
                seen.insert(event.id.clone());
            }
        }
    }
}

impl fmt::Debug for EventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStore")
            .field("events", &self.events)
            .field("subscribers", &self.subscribers.len())
            .field("persistent", &self.persistent)
            .finish_non_exhaustive()
    }
}
