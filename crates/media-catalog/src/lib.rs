use std::collections::{BTreeMap, BTreeSet};

use catalog_search::{Ranker, SearchConfig, SearchResult};
use models::{Movie, MovieCategory, Series, SeriesFormat};
use strum::{Display, EnumString};

pub mod achievements;
pub mod experience;
pub mod export;
pub mod loader;
pub mod preferences;
pub mod watchlist;

pub use loader::{load_catalog, load_movies, load_series};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MovieSort {
    #[default]
    ReleaseAsc,
    ReleaseDesc,
    Alphabetical,
    /// Episode number; unnumbered films go last.
    SagaOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SeriesSort {
    #[default]
    StartAsc,
    StartDesc,
    Alphabetical,
}

/// Criteria for [`MediaCatalog::list_movies`]. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovieFilter<'a> {
    pub category: Option<MovieCategory>,
    /// Compared trimmed and ASCII case-insensitively.
    pub era: Option<&'a str>,
    /// Substring of the title, era, synopsis or notes.
    pub text: Option<&'a str>,
}

impl MovieFilter<'_> {
    pub fn accepts(&self, movie: &Movie) -> bool {
        self.category.is_none_or(|c| movie.category == c)
            && self.era.is_none_or(|e| era_is(movie.era.as_deref(), e))
            && self.text.is_none_or(|t| movie.matches(t))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesFilter<'a> {
    pub format: Option<SeriesFormat>,
    pub era: Option<&'a str>,
    pub text: Option<&'a str>,
}

impl SeriesFilter<'_> {
    pub fn accepts(&self, series: &Series) -> bool {
        self.format.is_none_or(|f| series.format == f)
            && self.era.is_none_or(|e| era_is(series.era.as_deref(), e))
            && self.text.is_none_or(|t| series.matches(t))
    }
}

/// Every film and series the application knows about. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct MediaCatalog {
    movies: Vec<Movie>,
    series: Vec<Series>,
    ranker: Ranker,
}

impl MediaCatalog {
    pub fn new(movies: Vec<Movie>, series: Vec<Series>) -> Self {
        Self {
            movies,
            series,
            ranker: Ranker::default(),
        }
    }

    pub fn with_search_config(mut self, config: SearchConfig) -> Self {
        self.ranker = Ranker::new(config);
        self
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn by_category(&self, category: MovieCategory) -> Vec<&Movie> {
        self.movies_where(|m| m.category == category)
    }

    pub fn by_era(&self, era: &str) -> Vec<&Movie> {
        self.movies_where(|m| era_is(m.era.as_deref(), era))
    }

    /// Plain substring search, ordered by release year.
    pub fn search_movies(&self, query: &str) -> Vec<&Movie> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.movies_where(|m| m.matches(query))
    }

    pub fn by_format(&self, format: SeriesFormat) -> Vec<&Series> {
        self.series_where(|s| s.format == format)
    }

    pub fn by_series_era(&self, era: &str) -> Vec<&Series> {
        self.series_where(|s| era_is(s.era.as_deref(), era))
    }

    pub fn search_series(&self, query: &str) -> Vec<&Series> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.series_where(|s| s.matches(query))
    }

    /// Starts from the narrowest single-criterion query, applies the rest of
    /// `filter`, then orders by `sort`.
    pub fn list_movies(&self, filter: &MovieFilter<'_>, sort: MovieSort) -> Vec<&Movie> {
        let mut movies = match (filter.text, filter.category, filter.era) {
            (Some(text), _, _) => self.search_movies(text),
            (None, Some(category), _) => self.by_category(category),
            (None, None, Some(era)) => self.by_era(era),
            (None, None, None) => self.movies.iter().collect(),
        };
        movies.retain(|m| filter.accepts(m));
        sort_movies(&mut movies, sort);
        movies
    }

    pub fn list_series(&self, filter: &SeriesFilter<'_>, sort: SeriesSort) -> Vec<&Series> {
        let mut series = match (filter.text, filter.format, filter.era) {
            (Some(text), _, _) => self.search_series(text),
            (None, Some(format), _) => self.by_format(format),
            (None, None, Some(era)) => self.by_series_era(era),
            (None, None, None) => self.series.iter().collect(),
        };
        series.retain(|s| filter.accepts(s));
        sort_series(&mut series, sort);
        series
    }

    pub fn sorted_movies(&self, sort: MovieSort) -> Vec<&Movie> {
        let mut movies = self.movies.iter().collect::<Vec<_>>();
        sort_movies(&mut movies, sort);
        movies
    }

    pub fn sorted_series(&self, sort: SeriesSort) -> Vec<&Series> {
        let mut series = self.series.iter().collect::<Vec<_>>();
        sort_series(&mut series, sort);
        series
    }

    pub fn movies_grouped_by_category(&self) -> BTreeMap<MovieCategory, Vec<&Movie>> {
        let mut grouped: BTreeMap<MovieCategory, Vec<&Movie>> = BTreeMap::new();
        for movie in &self.movies {
            grouped.entry(movie.category).or_default().push(movie);
        }
        for movies in grouped.values_mut() {
            sort_movies(movies, MovieSort::ReleaseAsc);
        }
        grouped
    }

    pub fn series_grouped_by_format(&self) -> BTreeMap<SeriesFormat, Vec<&Series>> {
        let mut grouped: BTreeMap<SeriesFormat, Vec<&Series>> = BTreeMap::new();
        for show in &self.series {
            grouped.entry(show.format).or_default().push(show);
        }
        for series in grouped.values_mut() {
            sort_series(series, SeriesSort::StartAsc);
        }
        grouped
    }

    pub fn movie_eras(&self) -> BTreeSet<&str> {
        collect_eras(self.movies.iter().map(|m| m.era.as_deref()))
    }

    pub fn series_eras(&self) -> BTreeSet<&str> {
        collect_eras(self.series.iter().map(|s| s.era.as_deref()))
    }

    pub fn fuzzy_movies(&self, query: &str, limit: usize) -> Vec<SearchResult<&Movie>> {
        self.ranker.search(&self.movies, query, limit)
    }

    pub fn fuzzy_series(&self, query: &str, limit: usize) -> Vec<SearchResult<&Series>> {
        self.ranker.search(&self.series, query, limit)
    }

    pub fn suggest_movie_titles(&self, query: &str, limit: usize) -> Vec<String> {
        self.ranker.suggest(&self.movies, query, limit)
    }

    pub fn suggest_series_titles(&self, query: &str, limit: usize) -> Vec<String> {
        self.ranker.suggest(&self.series, query, limit)
    }

    pub fn find_movie(&self, title: &str) -> Option<&Movie> {
        let title = title.trim();
        self.movies
            .iter()
            .find(|m| m.title.eq_ignore_ascii_case(title))
    }

    pub fn find_series(&self, title: &str) -> Option<&Series> {
        let title = title.trim();
        self.series
            .iter()
            .find(|s| s.title.eq_ignore_ascii_case(title))
    }

    fn movies_where(&self, pred: impl Fn(&Movie) -> bool) -> Vec<&Movie> {
        let mut movies = self.movies.iter().filter(|m| pred(m)).collect::<Vec<_>>();
        sort_movies(&mut movies, MovieSort::ReleaseAsc);
        movies
    }

    fn series_where(&self, pred: impl Fn(&Series) -> bool) -> Vec<&Series> {
        let mut series = self.series.iter().filter(|s| pred(s)).collect::<Vec<_>>();
        sort_series(&mut series, SeriesSort::StartAsc);
        series
    }
}

fn sort_movies(movies: &mut [&Movie], sort: MovieSort) {
    match sort {
        MovieSort::ReleaseAsc => movies.sort_by_key(|m| m.release_year),
        MovieSort::ReleaseDesc => movies.sort_by_key(|m| std::cmp::Reverse(m.release_year)),
        MovieSort::Alphabetical => movies.sort_by_cached_key(|m| m.title.to_lowercase()),
        MovieSort::SagaOrder => movies.sort_by_key(|m| m.episode_number.unwrap_or(u32::MAX)),
    }
}

fn sort_series(series: &mut [&Series], sort: SeriesSort) {
    match sort {
        SeriesSort::StartAsc => series.sort_by_key(|s| s.start_year),
        SeriesSort::StartDesc => series.sort_by_key(|s| std::cmp::Reverse(s.start_year)),
        SeriesSort::Alphabetical => series.sort_by_cached_key(|s| s.title.to_lowercase()),
    }
}

fn era_is(era: Option<&str>, wanted: &str) -> bool {
    era.is_some_and(|e| e.eq_ignore_ascii_case(wanted.trim()))
}

fn collect_eras<'a>(eras: impl Iterator<Item = Option<&'a str>>) -> BTreeSet<&'a str> {
    eras.flatten().filter(|e| !e.trim().is_empty()).collect()
}
