mod cli;
mod config;
mod render;

use catalog_search::{SearchConfig, SearchResult};
use clap::Parser;
use eyre::WrapErr;
use media_catalog::experience::{self, Experience};
use media_catalog::export::write_export;
use media_catalog::preferences::PreferencesStore;
use media_catalog::watchlist::WatchlistStore;
use media_catalog::{achievements, MediaCatalog, MovieFilter, SeriesFilter};
use models::MediaType;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::cli::{
    Command, ExperienceCommand, FavoriteCommand, ListCommand, RootArgs, WatchCommand,
};
use crate::config::AppConfig;
use crate::render::Presentation;

const SUGGESTIONS_ON_MISS: usize = 3;
const DEFAULT_LOG_FILTER: &str = "catalog_cli=info,media_catalog=info,catalog_search=info";

fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = RootArgs::parse();
    let config = AppConfig::from_env_and_args(&args).wrap_err("load config")?;
    config.ensure_dirs().wrap_err("create data directories")?;

    let catalog = media_catalog::load_catalog(&config.movies_path, &config.series_path)
        .wrap_err("load catalog")?;
    let prefs_store = PreferencesStore::new(&config.preferences_path);

    match args.command {
        Command::Search {
            query,
            limit,
            series,
            min_score,
        } => {
            if let Err(e) = remember_search(&prefs_store, &query) {
                warn!("could not record recent search: {e:#}");
            }
            let catalog = match min_score {
                Some(min_score) => catalog.with_search_config(SearchConfig {
                    min_score,
                    ..SearchConfig::default()
                }),
                None => catalog,
            };
            let show = presentation(&prefs_store);
            if series {
                print_hits(&catalog.fuzzy_series(&query, limit), |s| show.series(s));
            } else {
                print_hits(&catalog.fuzzy_movies(&query, limit), |m| show.movie(m));
            }
        }
        Command::Suggest {
            query,
            limit,
            series,
        } => {
            let titles = if series {
                catalog.suggest_series_titles(&query, limit)
            } else {
                catalog.suggest_movie_titles(&query, limit)
            };
            if titles.is_empty() {
                println!("no suggestions for {query:?}");
            }
            for title in titles {
                println!("{title}");
            }
        }
        Command::List {
            command:
                ListCommand::Movies {
                    sort,
                    category,
                    era,
                    contains,
                    grouped,
                },
        } => {
            let filter = MovieFilter {
                category,
                era: era.as_deref(),
                text: contains.as_deref(),
            };
            let show = presentation(&prefs_store);
            if grouped {
                for (category, movies) in catalog.movies_grouped_by_category() {
                    let movies = movies
                        .into_iter()
                        .filter(|m| filter.accepts(m))
                        .collect::<Vec<_>>();
                    if movies.is_empty() {
                        continue;
                    }
                    println!("{}", show.heading(category.as_str()));
                    for movie in movies {
                        println!("  {}", show.movie(movie));
                    }
                }
            } else {
                let movies = catalog.list_movies(&filter, sort);
                if movies.is_empty() {
                    println!("no movies match");
                }
                for movie in movies {
                    println!("{}", show.movie(movie));
                }
            }

            if let Some(category) = category {
                let mut prefs = prefs_store.load().wrap_err("load preferences")?;
                prefs.last_movie_filter = Some(category.as_str().to_string());
                prefs_store.save(&prefs).wrap_err("save preferences")?;
            }
        }
        Command::List {
            command:
                ListCommand::Series {
                    sort,
                    format,
                    era,
                    contains,
                    grouped,
                },
        } => {
            let filter = SeriesFilter {
                format,
                era: era.as_deref(),
                text: contains.as_deref(),
            };
            let show = presentation(&prefs_store);
            if grouped {
                for (format, series) in catalog.series_grouped_by_format() {
                    let series = series
                        .into_iter()
                        .filter(|s| filter.accepts(s))
                        .collect::<Vec<_>>();
                    if series.is_empty() {
                        continue;
                    }
                    println!("{}", show.heading(format.as_str()));
                    for entry in series {
                        println!("  {}", show.series(entry));
                    }
                }
            } else {
                let series = catalog.list_series(&filter, sort);
                if series.is_empty() {
                    println!("no series match");
                }
                for entry in series {
                    println!("{}", show.series(entry));
                }
            }

            if let Some(format) = format {
                let mut prefs = prefs_store.load().wrap_err("load preferences")?;
                prefs.last_series_filter = Some(format.as_str().to_string());
                prefs_store.save(&prefs).wrap_err("save preferences")?;
            }
        }
        Command::Eras => {
            println!("Movies:");
            for era in catalog.movie_eras() {
                println!("  {era}");
            }
            println!("Series:");
            for era in catalog.series_eras() {
                println!("  {era}");
            }
        }
        Command::Watch { command } => {
            let mut store =
                WatchlistStore::open(&config.watchlist_path).wrap_err("open watchlist")?;
            match command {
                WatchCommand::Add {
                    title,
                    series,
                    status,
                } => {
                    let media_type = media_type_for(series);
                    let title = resolve_title(&catalog, &title, media_type)?;
                    let entry = store.upsert(&title, media_type, status);
                    store.save().wrap_err("save watchlist")?;
                    println!("{} status={}", entry.title, entry.status);
                }
                WatchCommand::Done {
                    title,
                    series,
                    rating,
                    notes,
                } => {
                    let media_type = media_type_for(series);
                    let title = resolve_title(&catalog, &title, media_type)?;
                    let entry = store
                        .mark_completed(&title, media_type, rating, &notes)
                        .wrap_err("record viewing")?;
                    println!(
                        "{} completed times_watched={} rating={}",
                        entry.title, entry.times_watched, entry.rating
                    );
                    announce_unlocked(&catalog, &store, &prefs_store)?;
                }
                WatchCommand::Remove { title } => {
                    let removed = store.remove(&title).wrap_err("remove from watchlist")?;
                    println!("removed={removed}");
                }
                WatchCommand::List => {
                    if store.entries().is_empty() {
                        println!("watchlist is empty");
                    }
                    for entry in store.entries() {
                        println!(
                            "[{}] {} ({}) rating={} times_watched={}",
                            entry.status,
                            entry.title,
                            entry.media_type,
                            entry.rating,
                            entry.times_watched
                        );
                    }
                }
                WatchCommand::History => {
                    if store.history().is_empty() {
                        println!("no viewings recorded");
                    }
                    for event in store.history() {
                        println!(
                            "{} {} ({}) rating={} {}",
                            event.watched_at.format("%Y-%m-%d %H:%M"),
                            event.title,
                            event.media_type,
                            event.rating,
                            event.notes
                        );
                    }
                }
            }
        }
        Command::Favorite { command } => {
            let mut prefs = prefs_store.load().wrap_err("load preferences")?;
            match command {
                FavoriteCommand::Add { title, series } => {
                    let media_type = media_type_for(series);
                    let title = resolve_title(&catalog, &title, media_type)?;
                    let added = prefs.add_favorite(media_type, &title);
                    prefs_store.save(&prefs).wrap_err("save preferences")?;
                    println!("{title} added={added}");
                }
                FavoriteCommand::Remove { title, series } => {
                    let media_type = media_type_for(series);
                    let title = resolve_title(&catalog, &title, media_type)?;
                    let removed = prefs.remove_favorite(media_type, &title);
                    prefs_store.save(&prefs).wrap_err("save preferences")?;
                    println!("{title} removed={removed}");
                }
                FavoriteCommand::List => {
                    for media_type in [MediaType::Movie, MediaType::Series] {
                        println!("{media_type}:");
                        for title in prefs.favorites(media_type) {
                            println!("  {title}");
                        }
                    }
                }
            }
        }
        Command::Achievements => {
            let store = WatchlistStore::open(&config.watchlist_path).wrap_err("open watchlist")?;
            for (achievement, ratio) in achievements::progress(&catalog, store.completed_titles()) {
                println!(
                    "{:<26} {:>5.1}%  {}",
                    achievement.to_string(),
                    ratio * 100.0,
                    achievement.description()
                );
            }
            announce_unlocked(&catalog, &store, &prefs_store)?;
        }
        Command::Export { kind, out } => {
            write_export(&catalog, kind, &out).wrap_err("export catalog")?;
            println!("saved={}", out.display());
        }
        Command::Recent => {
            let prefs = prefs_store.load().wrap_err("load preferences")?;
            if prefs.recent_searches.is_empty() {
                println!("no recent searches");
            }
            for (i, query) in prefs.recent_searches.iter().enumerate() {
                println!("{:>2}. {query}", i + 1);
            }
        }
        Command::Experience { command } => {
            let lineup = match command {
                ExperienceCommand::Marathon { limit } => {
                    experience::chronological_marathon(&catalog, limit)
                }
                ExperienceCommand::Double => experience::double_feature(&catalog),
                ExperienceCommand::Random { count, seed } => {
                    let mut rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_entropy(),
                    };
                    experience::random_mission(&catalog, count, &mut rng)
                }
            };
            print_experience(&lineup, &presentation(&prefs_store));
        }
        Command::Settings { color, emoji } => {
            let mut prefs = prefs_store.load().wrap_err("load preferences")?;
            if color.is_some() || emoji.is_some() {
                prefs.colorized_output = color.unwrap_or(prefs.colorized_output);
                prefs.emoji_output = emoji.unwrap_or(prefs.emoji_output);
                prefs_store.save(&prefs).wrap_err("save preferences")?;
                info!(
                    color = prefs.colorized_output,
                    emoji = prefs.emoji_output,
                    "updated output settings"
                );
            }
            println!("color={}", prefs.colorized_output);
            println!("emoji={}", prefs.emoji_output);
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn media_type_for(series: bool) -> MediaType {
    if series {
        MediaType::Series
    } else {
        MediaType::Movie
    }
}

/// A broken preferences file should not stop read-only commands from printing.
fn presentation(store: &PreferencesStore) -> Presentation {
    match store.load() {
        Ok(prefs) => Presentation::from_prefs(&prefs),
        Err(e) => {
            warn!("using plain output, could not load preferences: {e:#}");
            Presentation::default()
        }
    }
}

/// Maps user input to the catalog's spelling of the title, suggesting close
/// matches when there is no exact one.
fn resolve_title(
    catalog: &MediaCatalog,
    title: &str,
    media_type: MediaType,
) -> eyre::Result<String> {
    let found = match media_type {
        MediaType::Movie => catalog.find_movie(title).map(|m| m.title.clone()),
        MediaType::Series => catalog.find_series(title).map(|s| s.title.clone()),
    };
    if let Some(found) = found {
        return Ok(found);
    }

    let suggestions = match media_type {
        MediaType::Movie => catalog.suggest_movie_titles(title, SUGGESTIONS_ON_MISS),
        MediaType::Series => catalog.suggest_series_titles(title, SUGGESTIONS_ON_MISS),
    };
    let kind = media_type.to_string().to_lowercase();
    if suggestions.is_empty() {
        eyre::bail!("unknown {kind}: {title:?}");
    }
    eyre::bail!(
        "unknown {kind}: {title:?} (did you mean: {})",
        suggestions.join(", ")
    )
}

fn remember_search(store: &PreferencesStore, query: &str) -> eyre::Result<()> {
    let mut prefs = store.load().wrap_err("load preferences")?;
    prefs.add_recent_search(query.trim());
    store.save(&prefs).wrap_err("save preferences")
}

fn announce_unlocked(
    catalog: &MediaCatalog,
    store: &WatchlistStore,
    prefs_store: &PreferencesStore,
) -> eyre::Result<()> {
    let mut prefs = prefs_store.load().wrap_err("load preferences")?;
    let mut changed = false;
    for achievement in achievements::unlocked(catalog, store.completed_titles()) {
        let id = achievement.to_string();
        if prefs.acknowledged_achievements.contains(&id) {
            continue;
        }
        println!("achievement unlocked: {id} ({})", achievement.description());
        prefs.acknowledge_achievement(&id);
        changed = true;
    }
    if changed {
        prefs_store.save(&prefs).wrap_err("save preferences")?;
    }
    Ok(())
}

fn print_hits<T>(hits: &[SearchResult<&T>], describe: impl Fn(&T) -> String) {
    if hits.is_empty() {
        println!("no matches");
        return;
    }
    for (rank, hit) in hits.iter().enumerate() {
        println!("{:>2}. [{:.2}] {}", rank + 1, hit.score, describe(hit.value));
        println!("    matched: {}", hit.matched_field);
    }
}

fn print_experience(lineup: &Experience<'_>, show: &Presentation) {
    println!("{}", show.heading(lineup.name));
    println!("{}", lineup.description);
    for (i, movie) in lineup.movies.iter().enumerate() {
        println!("{:>2}. {}", i + 1, show.movie(movie));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_filter_covers_every_workspace_crate() {
        for target in ["catalog_cli", "media_catalog", "catalog_search"] {
            assert!(DEFAULT_LOG_FILTER.contains(&format!("{target}=info")));
        }
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
