use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const MAX_RATING: u8 = 5;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum MediaType {
    Movie,
    Series,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum WatchStatus {
    Planned,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub status: WatchStatus,
    /// 0..=5, 0 meaning unrated.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub times_watched: u32,
    #[serde(default)]
    pub last_watched: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEvent {
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub watched_at: NaiveDateTime,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub notes: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Achievement {
    SagaComplete,
    AnthologyExplorer,
    LegoMasterBuilder,
    CloneWarsCompletionist,
}

impl Achievement {
    pub const fn description(self) -> &'static str {
        match self {
            Self::SagaComplete => "Watch every film in the Skywalker Saga",
            Self::AnthologyExplorer => "Complete all anthology adventures",
            Self::LegoMasterBuilder => "Finish every LEGO special",
            Self::CloneWarsCompletionist => "Experience the entire Clone Wars saga",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchlist_entry_json_shape() {
        let entry: WatchlistEntry = serde_json::from_str(
            r#"{"title":"Andor","type":"SERIES","status":"IN_PROGRESS","lastWatched":"2024-05-04"}"#,
        )
        .unwrap();
        assert_eq!(entry.media_type, MediaType::Series);
        assert_eq!(entry.status, WatchStatus::InProgress);
        assert_eq!(entry.rating, 0);
        assert_eq!(entry.times_watched, 0);
        assert_eq!(entry.last_watched, NaiveDate::from_ymd_opt(2024, 5, 4));
    }

    #[test]
    fn watch_event_keeps_timestamp() {
        let event: WatchEvent = serde_json::from_str(
            r#"{"title":"Rogue One","type":"MOVIE","watchedAt":"2024-05-04T20:15:00","rating":5}"#,
        )
        .unwrap();
        assert_eq!(event.watched_at.to_string(), "2024-05-04 20:15:00");
        assert_eq!(event.notes, "");
    }
}
