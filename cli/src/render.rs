use crossterm::style::{Color, Stylize};
use media_catalog::preferences::UserPreferences;
use models::{Movie, MovieCategory, Series};

const BADGE_COLOR: Color = Color::AnsiValue(33);

/// Line formatting driven by the `colorizedOutput`/`emojiOutput` preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub color: bool,
    pub emoji: bool,
}

impl Presentation {
    pub fn from_prefs(prefs: &UserPreferences) -> Self {
        Self {
            color: prefs.colorized_output,
            emoji: prefs.emoji_output,
        }
    }

    pub fn movie(&self, movie: &Movie) -> String {
        let line = movie.describe();
        let line = if self.color {
            line.with(category_color(movie.category)).to_string()
        } else {
            line
        };
        if self.emoji {
            format!("{} {line}", category_emoji(movie.category))
        } else {
            line
        }
    }

    pub fn series(&self, series: &Series) -> String {
        let line = series.describe();
        let line = if self.color {
            line.with(BADGE_COLOR).to_string()
        } else {
            line
        };
        if self.emoji {
            format!("📺 {line}")
        } else {
            line
        }
    }

    /// Group and section headings.
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().with(BADGE_COLOR).to_string()
        } else {
            text.to_string()
        }
    }
}

fn category_color(category: MovieCategory) -> Color {
    match category {
        MovieCategory::Saga => Color::AnsiValue(214),
        MovieCategory::Anthology => Color::AnsiValue(39),
        MovieCategory::AnimatedFeature => Color::AnsiValue(170),
        MovieCategory::TvFilm => Color::AnsiValue(118),
        MovieCategory::LegoSpecial => Color::AnsiValue(220),
    }
}

fn category_emoji(category: MovieCategory) -> &'static str {
    match category {
        MovieCategory::Saga => "🚀",
        MovieCategory::Anthology => "🍿",
        MovieCategory::AnimatedFeature => "👻",
        MovieCategory::TvFilm => "📺",
        MovieCategory::LegoSpecial => "🧳",
    }
}
