use std::path::{Path, PathBuf};

use eyre::WrapErr;
use models::MediaType;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_RECENT_SEARCHES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub favorite_movies: Vec<String>,
    pub favorite_series: Vec<String>,
    pub acknowledged_achievements: Vec<String>,
    pub last_movie_filter: Option<String>,
    pub last_series_filter: Option<String>,
    /// Most recent first.
    pub recent_searches: Vec<String>,
    pub colorized_output: bool,
    pub emoji_output: bool,
}

impl UserPreferences {
    pub fn favorites(&self, media_type: MediaType) -> &[String] {
        match media_type {
            MediaType::Movie => &self.favorite_movies,
            MediaType::Series => &self.favorite_series,
        }
    }

    /// Returns false if the title was already a favorite.
    pub fn add_favorite(&mut self, media_type: MediaType, title: &str) -> bool {
        let list = self.favorites_mut(media_type);
        if list.iter().any(|t| t == title) {
            return false;
        }
        list.push(title.to_string());
        true
    }

    pub fn remove_favorite(&mut self, media_type: MediaType, title: &str) -> bool {
        let list = self.favorites_mut(media_type);
        let before = list.len();
        list.retain(|t| t != title);
        list.len() != before
    }

    /// Moves `term` to the front, dropping the oldest past the cap. Blank terms are ignored.
    pub fn add_recent_search(&mut self, term: &str) {
        if term.trim().is_empty() {
            return;
        }
        self.recent_searches.retain(|t| t != term);
        self.recent_searches.insert(0, term.to_string());
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }

    pub fn acknowledge_achievement(&mut self, id: &str) {
        if !self.acknowledged_achievements.iter().any(|a| a == id) {
            self.acknowledged_achievements.push(id.to_string());
        }
    }

    fn favorites_mut(&mut self, media_type: MediaType) -> &mut Vec<String> {
        match media_type {
            MediaType::Movie => &mut self.favorite_movies,
            MediaType::Series => &mut self.favorite_series,
        }
    }

    /// Re-applies the invariants a hand-edited file may have broken.
    fn sanitize(mut self) -> Self {
        dedup_in_order(&mut self.favorite_movies);
        dedup_in_order(&mut self.favorite_series);
        dedup_in_order(&mut self.acknowledged_achievements);
        self.recent_searches.retain(|t| !t.trim().is_empty());
        dedup_in_order(&mut self.recent_searches);
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
        self
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}

#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file yields defaults.
    pub fn load(&self) -> eyre::Result<UserPreferences> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no preferences file yet");
            return Ok(UserPreferences::default());
        }
        let text = std::fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("read preferences: {}", self.path.display()))?;
        let prefs: UserPreferences = serde_json::from_str(&text)
            .wrap_err_with(|| format!("parse preferences: {}", self.path.display()))?;
        Ok(prefs.sanitize())
    }

    pub fn save(&self, prefs: &UserPreferences) -> eyre::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).wrap_err("create preferences directory")?;
        }
        let json = serde_json::to_string_pretty(prefs).wrap_err("serialize preferences")?;
        std::fs::write(&self.path, json)
            .wrap_err_with(|| format!("write preferences: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_searches_are_capped_and_move_to_front() {
        let mut prefs = UserPreferences::default();
        for i in 0..12 {
            prefs.add_recent_search(&format!("query {i}"));
        }
        prefs.add_recent_search("query 5");
        prefs.add_recent_search("   ");

        assert_eq!(prefs.recent_searches.len(), MAX_RECENT_SEARCHES);
        assert_eq!(prefs.recent_searches[0], "query 5");
        assert_eq!(prefs.recent_searches[1], "query 11");
        assert!(!prefs.recent_searches.contains(&"query 1".to_string()));
    }

    #[test]
    fn favorites_are_sets_per_media_type() {
        let mut prefs = UserPreferences::default();
        assert!(prefs.add_favorite(MediaType::Movie, "Rogue One"));
        assert!(!prefs.add_favorite(MediaType::Movie, "Rogue One"));
        assert!(prefs.add_favorite(MediaType::Series, "Rogue One"));

        assert!(prefs.remove_favorite(MediaType::Movie, "Rogue One"));
        assert!(!prefs.remove_favorite(MediaType::Movie, "Rogue One"));
        assert_eq!(prefs.favorites(MediaType::Series), ["Rogue One"]);
    }

    #[test]
    fn hand_edited_files_are_sanitized() {
        let prefs: UserPreferences = serde_json::from_str(
            r#"{"favoriteMovies":["A","A","B"],"recentSearches":["x"," ","x","y"]}"#,
        )
        .unwrap();
        let prefs = prefs.sanitize();
        assert_eq!(prefs.favorite_movies, ["A", "B"]);
        assert_eq!(prefs.recent_searches, ["x", "y"]);
        assert!(!prefs.colorized_output);
    }
}
