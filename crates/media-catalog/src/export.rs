use std::path::Path;

use eyre::WrapErr;
use models::{Movie, Series};
use serde::Serialize;
use strum::{Display, EnumString};
use tracing::info;

use crate::MediaCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportKind {
    Movies,
    Series,
}

#[derive(Serialize)]
struct MoviesOut<'a> {
    movies: &'a [&'a Movie],
}

#[derive(Serialize)]
struct SeriesOut<'a> {
    series: &'a [&'a Series],
}

/// Same shape the loader reads, so exports can be loaded back as a catalog.
pub fn movies_to_json(movies: &[&Movie]) -> eyre::Result<String> {
    serde_json::to_string_pretty(&MoviesOut { movies }).wrap_err("serialize movies")
}

pub fn series_to_json(series: &[&Series]) -> eyre::Result<String> {
    serde_json::to_string_pretty(&SeriesOut { series }).wrap_err("serialize series")
}

pub fn write_export(catalog: &MediaCatalog, kind: ExportKind, out: &Path) -> eyre::Result<()> {
    let json = match kind {
        ExportKind::Movies => movies_to_json(&catalog.movies().iter().collect::<Vec<_>>())?,
        ExportKind::Series => series_to_json(&catalog.series().iter().collect::<Vec<_>>())?,
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).wrap_err("create export directory")?;
    }
    std::fs::write(out, json).wrap_err_with(|| format!("write export: {}", out.display()))?;
    info!(%kind, path = %out.display(), "exported");
    Ok(())
}
