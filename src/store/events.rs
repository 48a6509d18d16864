use crate::types::error::{EventBotError, Result};
use crate::types::event::{Event, EventListing, EventRow};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Ordered name -> date mapping as it appears in the backing file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    entries: Vec<Event>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object whose values are all strings. Key order is preserved.
    pub fn from_json(text: &str) -> std::result::Result<Self, String> {
        let map: Map<String, Value> = serde_json::from_str(text).map_err(|e| e.to_string())?;

        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            match value {
                Value::String(date) => entries.push(Event::new(name, date)),
                other => {
                    return Err(format!(
                        "event {:?} has a non-string date: {}",
                        name, other
                    ))
                }
            }
        }

        Ok(Self { entries })
    }

    /// Pretty-printed JSON object with 4-space indentation.
    pub fn to_json(&self) -> std::result::Result<String, String> {
        let map: Map<String, Value> = self
            .iter()
            .map(|event| (event.name.clone(), Value::String(event.date.clone())))
            .collect();

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        map.serialize(&mut serializer).map_err(|e| e.to_string())?;

        String::from_utf8(buf).map_err(|e| e.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|event| event.name == name)
            .map(|event| event.date.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter()
    }

    /// Insert or overwrite. An existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, date: impl Into<String>) {
        let name = name.into();
        let date = date.into();
        match self.entries.iter_mut().find(|event| event.name == name) {
            Some(existing) => existing.date = date,
            None => self.entries.push(Event::new(name, date)),
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Event> {
        if index >= self.entries.len() {
            return Err(EventBotError::out_of_range(index, self.entries.len()));
        }
        Ok(self.entries.remove(index))
    }

    pub fn listing(&self) -> EventListing {
        if self.is_empty() {
            return EventListing::Empty;
        }

        EventListing::Rows(
            self.iter()
                .enumerate()
                .map(|(index, event)| EventRow {
                    index,
                    name: event.name.clone(),
                    date: event.date.clone(),
                })
                .collect(),
        )
    }
}

/// JSON-file event store.
///
/// Every read goes to disk. Mutations hold `write_lock` across their
/// load-modify-save so two commands finishing together cannot drop each
/// other's update.
pub struct EventStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, reason: impl Into<String>) -> EventBotError {
        EventBotError::storage_error(self.path.display().to_string(), reason)
    }

    /// Create the parent directory and an empty `{}` file if the store does not exist.
    ///
    /// Returns true when a new file was written.
    pub async fn ensure_file(&self) -> Result<bool> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| self.storage_error(e.to_string()))?
        {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error(e.to_string()))?;
        }

        self.save(&Events::new()).await?;
        info!(path = %self.path.display(), "Created empty event store");
        Ok(true)
    }

    pub async fn load(&self) -> Result<Events> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.storage_error(e.to_string()))?;

        let events = Events::from_json(&text).map_err(|e| self.storage_error(e))?;
        debug!(path = %self.path.display(), count = events.len(), "Event store loaded");
        Ok(events)
    }

    /// Write to a sibling temp file, then rename it over the store.
    pub async fn save(&self, events: &Events) -> Result<()> {
        let json = events.to_json().map_err(|e| self.storage_error(e))?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| self.storage_error("store path has no file name"))?;
        let mut tmp_name = std::ffi::OsString::from(".");
        tmp_name.push(file_name);
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| self.storage_error(e.to_string()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| self.storage_error(e.to_string()))?;

        debug!(path = %self.path.display(), count = events.len(), "Event store saved");
        Ok(())
    }

    pub async fn list(&self) -> Result<EventListing> {
        Ok(self.load().await?.listing())
    }

    /// Insert or overwrite `name`. Last write wins.
    pub async fn add(&self, name: &str, date: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.load().await?;
        events.insert(name, date);
        self.save(&events).await
    }

    /// Remove the entry shown at `index` by [`EventStore::list`].
    pub async fn remove_by_index(&self, index: usize) -> Result<Event> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.load().await?;
        let removed = events.remove_at(index)?;
        self.save(&events).await?;
        Ok(removed)
    }
}
