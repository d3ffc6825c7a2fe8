use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use eyre::WrapErr;
use models::{Movie, Series};
use serde::Deserialize;
use tracing::info;

use crate::MediaCatalog;

#[derive(Debug, Deserialize)]
pub(crate) struct MoviesFile {
    pub(crate) movies: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeriesFile {
    pub(crate) series: Vec<Series>,
}

pub fn load_catalog(movies_path: &Path, series_path: &Path) -> eyre::Result<MediaCatalog> {
    let movies = load_movies(movies_path)?;
    let series = load_series(series_path)?;
    Ok(MediaCatalog::new(movies, series))
}

pub fn load_movies(path: &Path) -> eyre::Result<Vec<Movie>> {
    let root: MoviesFile = read_json(path)?;
    validate_titles(root.movies.iter().map(|m| m.title.as_str()))
        .wrap_err_with(|| format!("invalid movie entry in {}", path.display()))?;
    info!(count = root.movies.len(), path = %path.display(), "loaded movies");
    Ok(root.movies)
}

pub fn load_series(path: &Path) -> eyre::Result<Vec<Series>> {
    let root: SeriesFile = read_json(path)?;
    validate_titles(root.series.iter().map(|s| s.title.as_str()))
        .wrap_err_with(|| format!("invalid series entry in {}", path.display()))?;
    info!(count = root.series.len(), path = %path.display(), "loaded series");
    Ok(root.series)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    let file = File::open(path).wrap_err_with(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).wrap_err_with(|| format!("parse {}", path.display()))
}

/// Search assumes every title is non-blank.
fn validate_titles<'a>(titles: impl Iterator<Item = &'a str>) -> eyre::Result<()> {
    for (idx, title) in titles.enumerate() {
        if title.trim().is_empty() {
            eyre::bail!("entry #{idx} has a blank title");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_titles_are_rejected() {
        assert!(validate_titles(["A New Hope", "Andor"].into_iter()).is_ok());

        let err = validate_titles(["A New Hope", "  "].into_iter()).unwrap_err();
        assert_eq!(err.to_string(), "entry #1 has a blank title");
    }
}
