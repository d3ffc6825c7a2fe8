use std::path::PathBuf;

use media_catalog::export::{write_export, ExportKind};
use media_catalog::{
    load_catalog, load_movies, load_series, MediaCatalog, MovieFilter, MovieSort, SeriesFilter,
    SeriesSort,
};
use models::{MovieCategory, SeriesFormat};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(name)
}

fn sample_catalog() -> MediaCatalog {
    load_catalog(&data_path("movies.json"), &data_path("series.json")).unwrap()
}

#[test]
fn loads_bundled_data() {
    let catalog = sample_catalog();
    assert_eq!(catalog.movies().len(), 11);
    assert_eq!(catalog.series().len(), 6);

    let rogue_one = catalog.search_movies("Rogue One");
    assert_eq!(rogue_one[0].release_year, 2016);

    let mandalorian = catalog.search_series("Mandalorian");
    assert_eq!(mandalorian[0].start_year, 2019);
}

#[test]
fn filters_are_sorted_by_year() {
    let catalog = sample_catalog();

    let saga = catalog.by_category(MovieCategory::Saga);
    assert_eq!(saga.len(), 6);
    assert_eq!(saga[0].title, "Star Wars: Episode IV - A New Hope");
    assert!(saga.windows(2).all(|w| w[0].release_year <= w[1].release_year));

    let fall = catalog.by_era("Fall of the Jedi");
    assert_eq!(
        fall.iter().map(|m| m.release_year).collect::<Vec<_>>(),
        vec![1999, 2002, 2005, 2008]
    );

    let live_action = catalog.by_format(SeriesFormat::LiveAction);
    assert_eq!(
        live_action.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(),
        vec!["The Mandalorian", "Andor"]
    );

    assert_eq!(catalog.by_series_era("New Republic").len(), 1);
    assert!(catalog.search_movies("  ").is_empty());
}

#[test]
fn listing_combines_filters_before_sorting() {
    let catalog = sample_catalog();

    let classic = catalog.list_movies(
        &MovieFilter {
            category: Some(MovieCategory::Saga),
            era: Some(" age of rebellion "),
            text: None,
        },
        MovieSort::ReleaseDesc,
    );
    assert_eq!(
        classic.iter().map(|m| m.release_year).collect::<Vec<_>>(),
        vec![1983, 1980, 1977]
    );
    assert_eq!(catalog.by_era("fall of the jedi").len(), 4);

    let rebels = catalog.list_movies(
        &MovieFilter {
            text: Some("rebel"),
            ..MovieFilter::default()
        },
        MovieSort::ReleaseAsc,
    );
    assert_eq!(
        rebels.iter().map(|m| m.release_year).collect::<Vec<_>>(),
        vec![1977, 1980, 1983, 1984, 2016]
    );
    let anthology_rebels = catalog.list_movies(
        &MovieFilter {
            category: Some(MovieCategory::Anthology),
            text: Some("rebel"),
            ..MovieFilter::default()
        },
        MovieSort::ReleaseAsc,
    );
    assert_eq!(anthology_rebels.len(), 1);
    assert_eq!(anthology_rebels[0].title, "Rogue One: A Star Wars Story");

    let unfiltered = catalog.list_movies(&MovieFilter::default(), MovieSort::Alphabetical);
    assert_eq!(unfiltered, catalog.sorted_movies(MovieSort::Alphabetical));

    let clones = catalog.list_series(
        &SeriesFilter {
            format: None,
            era: Some("FALL OF THE JEDI"),
            text: Some("clone"),
        },
        SeriesSort::Alphabetical,
    );
    assert_eq!(
        clones.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(),
        vec!["Star Wars: Clone Wars", "Star Wars: The Clone Wars"]
    );
    assert!(catalog
        .list_series(
            &SeriesFilter {
                format: Some(SeriesFormat::Documentary),
                era: Some("New Republic"),
                text: None,
            },
            SeriesSort::StartAsc,
        )
        .is_empty());
}

#[test]
fn sort_orders() {
    let catalog = sample_catalog();

    let saga_order = catalog.sorted_movies(MovieSort::SagaOrder);
    assert_eq!(saga_order[0].episode_number, Some(1));
    assert_eq!(saga_order[5].episode_number, Some(6));
    assert!(saga_order[6..].iter().all(|m| m.episode_number.is_none()));

    let newest = catalog.sorted_movies(MovieSort::ReleaseDesc);
    assert_eq!(newest[0].title, "LEGO Star Wars Holiday Special");

    let alpha = catalog.sorted_series(SeriesSort::Alphabetical);
    assert_eq!(alpha[0].title, "Andor");
    assert_eq!(
        catalog.sorted_series(SeriesSort::StartAsc)[0].title,
        "Star Wars: Clone Wars"
    );

    assert_eq!("saga-order".parse::<MovieSort>().ok(), Some(MovieSort::SagaOrder));
}

#[test]
fn grouping_and_eras() {
    let catalog = sample_catalog();

    let grouped = catalog.movies_grouped_by_category();
    assert_eq!(
        grouped.keys().copied().collect::<Vec<_>>(),
        vec![
            MovieCategory::Saga,
            MovieCategory::Anthology,
            MovieCategory::AnimatedFeature,
            MovieCategory::TvFilm,
            MovieCategory::LegoSpecial,
        ]
    );
    assert_eq!(grouped[&MovieCategory::Anthology].len(), 2);

    let formats = catalog.series_grouped_by_format();
    assert_eq!(formats[&SeriesFormat::LiveAction][0].title, "The Mandalorian");

    let eras = catalog.movie_eras().into_iter().collect::<Vec<_>>();
    assert_eq!(
        eras,
        vec![
            "Age of Rebellion",
            "Fall of the Jedi",
            "New Republic",
            "Reign of the Empire"
        ]
    );
    assert_eq!(catalog.series_eras().len(), 3);
}

#[test]
fn fuzzy_search_over_loaded_catalog() {
    let catalog = sample_catalog();

    let hits = catalog.fuzzy_movies("empier stikes bak", 3);
    assert_eq!(
        hits[0].value.title,
        "Star Wars: Episode V - The Empire Strikes Back"
    );
    assert!(hits[0].score < 1.0);

    let hits = catalog.fuzzy_series("bounty hunter", 0);
    assert_eq!(hits[0].value.title, "The Mandalorian");
    assert_eq!(
        hits[0].matched_field,
        "a lone bounty hunter protects a mysterious foundling"
    );

    let hits = catalog.fuzzy_series("mandalorain", 0);
    assert_eq!(hits[0].value.title, "The Mandalorian");
    assert!(hits[0].score < 1.0);

    assert!(catalog.fuzzy_movies("", 5).is_empty());
}

#[test]
fn suggestions_come_from_both_collections() {
    let catalog = sample_catalog();

    assert_eq!(
        catalog.suggest_movie_titles("rogue", 0),
        vec!["Rogue One: A Star Wars Story".to_string()]
    );
    let series = catalog.suggest_series_titles("clone wars", 2);
    assert_eq!(
        series,
        vec![
            "Star Wars: The Clone Wars".to_string(),
            "Star Wars: Clone Wars".to_string()
        ]
    );
}

#[test]
fn find_by_title_ignores_case() {
    let catalog = sample_catalog();
    assert!(catalog.find_movie(" rogue one: a star wars story ").is_some());
    assert!(catalog.find_series("ANDOR").is_some());
    assert!(catalog.find_series("Andor 2").is_none());
}

#[test]
fn exports_load_back_unchanged() {
    let catalog = sample_catalog();
    let dir = tempfile::tempdir().unwrap();

    let movies_out = dir.path().join("out/movies.json");
    let series_out = dir.path().join("out/series.json");
    write_export(&catalog, ExportKind::Movies, &movies_out).unwrap();
    write_export(&catalog, ExportKind::Series, &series_out).unwrap();

    assert_eq!(load_movies(&movies_out).unwrap(), catalog.movies());
    assert_eq!(load_series(&series_out).unwrap(), catalog.series());
}

#[test]
fn blank_titles_fail_at_load_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.json");
    std::fs::write(
        &path,
        r#"{"movies":[{"title":"","releaseYear":1977,"category":"SAGA"}]}"#,
    )
    .unwrap();

    let err = load_movies(&path).unwrap_err();
    assert!(format!("{err:#}").contains("entry #0 has a blank title"));
}

#[test]
fn unknown_category_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.json");
    std::fs::write(
        &path,
        r#"{"movies":[{"title":"X","releaseYear":1977,"category":"PODCAST"}]}"#,
    )
    .unwrap();

    assert!(load_movies(&path).is_err());
    assert!(load_movies(&dir.path().join("missing.json")).is_err());
}
