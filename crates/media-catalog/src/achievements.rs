use std::collections::{BTreeMap, HashSet};

use models::{Achievement, MovieCategory};

use crate::MediaCatalog;

const CLONE_WARS: &str = "clone wars";
const EPSILON: f64 = 1e-9;

/// Completion ratio in `[0, 1]` for every achievement.
///
/// Titles compare trimmed and lower-cased, so watchlist spelling differences
/// in case or padding still count.
pub fn progress<'a>(
    catalog: &MediaCatalog,
    completed_titles: impl IntoIterator<Item = &'a str>,
) -> BTreeMap<Achievement, f64> {
    let completed = completed_titles
        .into_iter()
        .map(title_key)
        .collect::<HashSet<_>>();

    BTreeMap::from([
        (
            Achievement::SagaComplete,
            category_ratio(catalog, MovieCategory::Saga, &completed),
        ),
        (
            Achievement::AnthologyExplorer,
            category_ratio(catalog, MovieCategory::Anthology, &completed),
        ),
        (
            Achievement::LegoMasterBuilder,
            category_ratio(catalog, MovieCategory::LegoSpecial, &completed),
        ),
        (
            Achievement::CloneWarsCompletionist,
            clone_wars_ratio(catalog, &completed),
        ),
    ])
}

pub fn unlocked<'a>(
    catalog: &MediaCatalog,
    completed_titles: impl IntoIterator<Item = &'a str>,
) -> Vec<Achievement> {
    progress(catalog, completed_titles)
        .into_iter()
        .filter(|(_, ratio)| *ratio >= 1.0 - EPSILON)
        .map(|(achievement, _)| achievement)
        .collect()
}

fn category_ratio(
    catalog: &MediaCatalog,
    category: MovieCategory,
    completed: &HashSet<String>,
) -> f64 {
    let in_category = catalog.by_category(category);
    let done = in_category
        .iter()
        .filter(|m| completed.contains(&title_key(&m.title)))
        .count();
    ratio(done, in_category.len())
}

fn clone_wars_ratio(catalog: &MediaCatalog, completed: &HashSet<String>) -> f64 {
    let total = catalog
        .movies()
        .iter()
        .map(|m| m.title.as_str())
        .chain(catalog.series().iter().map(|s| s.title.as_str()))
        .filter(|t| t.to_lowercase().contains(CLONE_WARS))
        .count();
    let done = completed.iter().filter(|t| t.contains(CLONE_WARS)).count();
    ratio(done, total)
}

fn ratio(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (done as f64 / total as f64).min(1.0)
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}
