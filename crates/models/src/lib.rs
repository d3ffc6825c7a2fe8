use catalog_search::SearchableEntity;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod progress;

pub use progress::{Achievement, MediaType, WatchEvent, WatchStatus, WatchlistEntry};

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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum MovieCategory {
    Saga,
    Anthology,
    AnimatedFeature,
    TvFilm,
    LegoSpecial,
}

impl MovieCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Saga => "SAGA",
            Self::Anthology => "ANTHOLOGY",
            Self::AnimatedFeature => "ANIMATED_FEATURE",
            Self::TvFilm => "TV_FILM",
            Self::LegoSpecial => "LEGO_SPECIAL",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Saga => "Skywalker Saga",
            Self::Anthology => "Standalone Anthology Films",
            Self::AnimatedFeature => "Animated Features",
            Self::TvFilm => "Television Films and Specials",
            Self::LegoSpecial => "LEGO and Animated Specials",
        }
    }
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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SeriesFormat {
    LiveAction,
    Animated,
    MicroSeries,
    Lego,
    Anthology,
    Documentary,
}

impl SeriesFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LiveAction => "LIVE_ACTION",
            Self::Animated => "ANIMATED",
            Self::MicroSeries => "MICRO_SERIES",
            Self::Lego => "LEGO",
            Self::Anthology => "ANTHOLOGY",
            Self::Documentary => "DOCUMENTARY",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::LiveAction => "Live Action Series",
            Self::Animated => "Animated Series",
            Self::MicroSeries => "Animated Micro Series",
            Self::Lego => "LEGO Animated Series",
            Self::Anthology => "Anthology Series",
            Self::Documentary => "Documentary Series",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_roman: Option<String>,
    pub release_year: i32,
    pub category: MovieCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Movie {
    /// Case-insensitive substring match over title, era, synopsis and notes.
    pub fn matches(&self, query: &str) -> bool {
        text_matches(
            query,
            [
                Some(self.title.as_str()),
                self.era.as_deref(),
                self.synopsis.as_deref(),
                self.notes.as_deref(),
            ],
        )
    }

    pub fn describe(&self) -> String {
        let mut out = format!(
            "{} ({}) [{}]",
            self.title,
            self.release_year,
            self.category.display_name()
        );
        if let Some(roman) = non_blank(self.episode_roman.as_deref()) {
            out.push_str(&format!(" | Episode {roman}"));
        }
        push_details(
            &mut out,
            self.era.as_deref(),
            self.streaming.as_deref(),
            self.synopsis.as_deref(),
            self.notes.as_deref(),
        );
        out
    }
}

impl SearchableEntity for Movie {
    fn title(&self) -> &str {
        &self.title
    }

    fn episode_number(&self) -> Option<u32> {
        self.episode_number
    }

    fn episode_roman(&self) -> Option<&str> {
        self.episode_roman.as_deref()
    }

    fn era(&self) -> Option<&str> {
        self.era.as_deref()
    }

    fn synopsis(&self) -> Option<&str> {
        self.synopsis.as_deref()
    }

    fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    fn category_tag(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub title: String,
    pub start_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    pub format: SeriesFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Series {
    pub fn matches(&self, query: &str) -> bool {
        text_matches(
            query,
            [
                Some(self.title.as_str()),
                self.era.as_deref(),
                self.synopsis.as_deref(),
                self.notes.as_deref(),
            ],
        )
    }

    pub fn describe(&self) -> String {
        let years = match self.end_year {
            Some(end) => format!("{}-{end}", self.start_year),
            None => format!("{}-present", self.start_year),
        };
        let mut out = format!(
            "{} ({years}) [{}]",
            self.title,
            self.format.display_name()
        );
        push_details(
            &mut out,
            self.era.as_deref(),
            self.streaming.as_deref(),
            self.synopsis.as_deref(),
            self.notes.as_deref(),
        );
        out
    }
}

// Series carry no category tag, so they never pick up a ranking bias.
impl SearchableEntity for Series {
    fn title(&self) -> &str {
        &self.title
    }

    fn era(&self) -> Option<&str> {
        self.era.as_deref()
    }

    fn synopsis(&self) -> Option<&str> {
        self.synopsis.as_deref()
    }

    fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

fn text_matches<'a>(query: &str, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    let query = query.to_lowercase();
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn push_details(
    out: &mut String,
    era: Option<&str>,
    streaming: Option<&str>,
    synopsis: Option<&str>,
    notes: Option<&str>,
) {
    if let Some(era) = non_blank(era) {
        out.push_str(&format!(" | Era: {era}"));
    }
    if let Some(streaming) = non_blank(streaming) {
        out.push_str(&format!(" | Watch: {streaming}"));
    }
    if let Some(synopsis) = non_blank(synopsis) {
        out.push_str(&format!("\n    {synopsis}"));
    }
    if let Some(notes) = non_blank(notes) {
        out.push_str(&format!("\n    Notes: {notes}"));
    }
}
