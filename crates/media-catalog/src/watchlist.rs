use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use eyre::WrapErr;
use models::progress::MAX_RATING;
use models::{MediaType, WatchEvent, WatchStatus, WatchlistEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Default, Serialize, Deserialize)]
struct WatchlistFile {
    #[serde(default)]
    watchlist: Vec<WatchlistEntry>,
    #[serde(default)]
    history: Vec<WatchEvent>,
}

/// Watch progress and history backed by a single JSON file.
///
/// Entries are keyed by trimmed, lower-cased title and keep insertion order.
#[derive(Debug)]
pub struct WatchlistStore {
    path: PathBuf,
    entries: Vec<WatchlistEntry>,
    history: Vec<WatchEvent>,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Opens the store and reads whatever is on disk.
    pub fn open(path: impl Into<PathBuf>) -> eyre::Result<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces in-memory state with the file contents. A missing file is an
    /// empty watchlist.
    pub fn load(&mut self) -> eyre::Result<()> {
        self.entries.clear();
        self.history.clear();

        if !self.path.exists() {
            debug!(path = %self.path.display(), "no watchlist file yet");
            return Ok(());
        }

        let text = std::fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("read watchlist: {}", self.path.display()))?;
        let file: WatchlistFile = serde_json::from_str(&text)
            .wrap_err_with(|| format!("parse watchlist: {}", self.path.display()))?;

        for entry in file.watchlist {
            self.put(entry);
        }
        self.history = file.history;
        info!(
            entries = self.entries.len(),
            history = self.history.len(),
            "loaded watchlist"
        );
        Ok(())
    }

    pub fn save(&self) -> eyre::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).wrap_err("create watchlist directory")?;
        }
        let file = WatchlistFile {
            watchlist: self.entries.clone(),
            history: self.history.clone(),
        };
        let json = serde_json::to_string_pretty(&file).wrap_err("serialize watchlist")?;
        std::fs::write(&self.path, json)
            .wrap_err_with(|| format!("write watchlist: {}", self.path.display()))?;
        Ok(())
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn history(&self) -> &[WatchEvent] {
        &self.history
    }

    pub fn get(&self, title: &str) -> Option<&WatchlistEntry> {
        let key = entry_key(title);
        self.entries.iter().find(|e| entry_key(&e.title) == key)
    }

    /// Sets the status of `title`, keeping any rating, count and date it had.
    /// Does not save.
    pub fn upsert(
        &mut self,
        title: &str,
        media_type: MediaType,
        status: WatchStatus,
    ) -> WatchlistEntry {
        let existing = self.get(title);
        let entry = WatchlistEntry {
            title: title.to_string(),
            media_type,
            status,
            rating: existing.map_or(0, |e| e.rating),
            times_watched: existing.map_or(0, |e| e.times_watched),
            last_watched: existing.and_then(|e| e.last_watched),
        };
        self.put(entry.clone());
        entry
    }

    /// Records a completed viewing now and saves.
    ///
    /// `rating: None` keeps the previous rating.
    pub fn mark_completed(
        &mut self,
        title: &str,
        media_type: MediaType,
        rating: Option<u8>,
        notes: &str,
    ) -> eyre::Result<WatchlistEntry> {
        let entry =
            self.record_completion(title, media_type, rating, notes, Local::now().naive_local())?;
        self.save()?;
        Ok(entry)
    }

    pub(crate) fn record_completion(
        &mut self,
        title: &str,
        media_type: MediaType,
        rating: Option<u8>,
        notes: &str,
        watched_at: NaiveDateTime,
    ) -> eyre::Result<WatchlistEntry> {
        if let Some(rating) = rating.filter(|r| *r > MAX_RATING) {
            eyre::bail!("rating must be between 0 and {MAX_RATING}, got {rating}");
        }

        let existing = self.get(title);
        let rating = rating.or(existing.map(|e| e.rating)).unwrap_or(0);
        let entry = WatchlistEntry {
            title: title.to_string(),
            media_type,
            status: WatchStatus::Completed,
            rating,
            times_watched: existing.map_or(1, |e| e.times_watched + 1),
            last_watched: Some(watched_at.date()),
        };
        self.put(entry.clone());
        self.history.push(WatchEvent {
            title: title.to_string(),
            media_type,
            watched_at,
            rating,
            notes: notes.to_string(),
        });
        Ok(entry)
    }

    /// Removes `title` and saves. Returns whether anything was removed.
    pub fn remove(&mut self, title: &str) -> eyre::Result<bool> {
        let key = entry_key(title);
        let before = self.entries.len();
        self.entries.retain(|e| entry_key(&e.title) != key);
        let removed = self.entries.len() != before;
        self.save()?;
        Ok(removed)
    }

    pub fn completed_titles(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.status == WatchStatus::Completed)
            .map(|e| e.title.as_str())
            .collect()
    }

    fn put(&mut self, entry: WatchlistEntry) {
        let key = entry_key(&entry.title);
        match self.entries.iter_mut().find(|e| entry_key(&e.title) == key) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }
}

fn entry_key(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    #[test]
    fn upsert_keeps_previous_progress() {
        let mut store = WatchlistStore::new("unused.json");
        store
            .record_completion("Andor", MediaType::Series, Some(5), "", at(2024, 1, 2))
            .unwrap();

        let entry = store.upsert(" andor ", MediaType::Series, WatchStatus::InProgress);
        assert_eq!(entry.status, WatchStatus::InProgress);
        assert_eq!(entry.rating, 5);
        assert_eq!(entry.times_watched, 1);
        assert_eq!(entry.last_watched, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn completion_counts_and_keeps_rating_when_unspecified() {
        let mut store = WatchlistStore::new("unused.json");
        store
            .record_completion("Rogue One", MediaType::Movie, Some(4), "first", at(2024, 5, 4))
            .unwrap();
        let entry = store
            .record_completion("ROGUE ONE", MediaType::Movie, None, "again", at(2024, 5, 5))
            .unwrap();

        assert_eq!(entry.times_watched, 2);
        assert_eq!(entry.rating, 4);
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.history()[1].notes, "again");
        assert_eq!(store.completed_titles(), vec!["ROGUE ONE"]);
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let mut store = WatchlistStore::new("unused.json");
        let err = store
            .record_completion("Solo", MediaType::Movie, Some(6), "", at(2024, 1, 1))
            .unwrap_err();
        assert!(err.to_string().contains("rating must be between 0 and 5"));
        assert!(store.entries().is_empty());
        assert!(store.history().is_empty());
    }
}
