use models::{Movie, MovieCategory};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::{MediaCatalog, MovieSort};

/// A themed lineup of films picked from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Experience<'a> {
    pub name: &'static str,
    pub description: String,
    pub movies: Vec<&'a Movie>,
}

/// Films in release order, cut to `limit` (`0` keeps all of them).
pub fn chronological_marathon(catalog: &MediaCatalog, limit: usize) -> Experience<'_> {
    let mut movies = catalog.sorted_movies(MovieSort::ReleaseAsc);
    if limit > 0 {
        movies.truncate(limit);
    }
    Experience {
        name: "Chronological Marathon",
        description: format!("Chronological marathon featuring {} key holos", movies.len()),
        movies,
    }
}

/// The two earliest films of the first era (alphabetically) that has at
/// least two, or the two oldest films when no era does.
pub fn double_feature(catalog: &MediaCatalog) -> Experience<'_> {
    let oldest = catalog.sorted_movies(MovieSort::ReleaseAsc);
    if oldest.len() < 2 {
        return Experience {
            name: "Double Feature",
            description: "Not enough films to build a pairing.".to_string(),
            movies: oldest,
        };
    }

    let era_pair = catalog.movie_eras().into_iter().find_map(|era| {
        let films = catalog.by_era(era);
        (films.len() >= 2).then(|| (era, films[..2].to_vec()))
    });
    let (description, movies) = match era_pair {
        Some((era, pair)) => (format!("Stories set during the {era}"), pair),
        None => (
            "Back-to-back classics from the archives".to_string(),
            oldest[..2].to_vec(),
        ),
    };

    Experience {
        name: "Tonight's Double Feature",
        description,
        movies,
    }
}

/// Up to `count` distinct films drawn without replacement, favoring short
/// runtimes and the less central categories.
pub fn random_mission<'a, R: Rng + ?Sized>(
    catalog: &'a MediaCatalog,
    count: usize,
    rng: &mut R,
) -> Experience<'a> {
    let mut pool = catalog.movies().iter().collect::<Vec<_>>();
    let mut picks = Vec::with_capacity(count.min(pool.len()));

    while picks.len() < count {
        let weights = pool.iter().map(|m| mission_weight(m));
        let Ok(weights) = WeightedIndex::<f64>::new(weights) else {
            break;
        };
        picks.push(pool.remove(weights.sample(rng)));
    }

    Experience {
        name: "Random Mission",
        description: "A surprise lineup pulling from every corner of the galaxy.".to_string(),
        movies: picks,
    }
}

fn mission_weight(movie: &Movie) -> f64 {
    let category_bias = match movie.category {
        MovieCategory::Saga => 0.9,
        MovieCategory::Anthology => 1.1,
        MovieCategory::AnimatedFeature => 1.2,
        MovieCategory::TvFilm => 1.3,
        MovieCategory::LegoSpecial => 1.4,
    };
    category_bias * 180.0 / f64::from(estimated_runtime_minutes(movie.category))
}

fn estimated_runtime_minutes(category: MovieCategory) -> u32 {
    match category {
        MovieCategory::Saga => 135,
        MovieCategory::Anthology => 125,
        MovieCategory::AnimatedFeature => 98,
        MovieCategory::TvFilm => 90,
        MovieCategory::LegoSpecial => 45,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(title: &str, year: i32, category: MovieCategory) -> Movie {
        Movie {
            title: title.to_string(),
            episode_number: None,
            episode_roman: None,
            release_year: year,
            category,
            era: None,
            synopsis: None,
            streaming: None,
            notes: None,
        }
    }

    #[test]
    fn short_specials_outweigh_saga_films() {
        let saga = mission_weight(&film("Saga", 1977, MovieCategory::Saga));
        let lego = mission_weight(&film("Lego", 2020, MovieCategory::LegoSpecial));
        assert!((saga - 1.2).abs() < 1e-9);
        assert!((lego - 5.6).abs() < 1e-9);
    }

    #[test]
    fn double_feature_without_eras_takes_the_two_oldest() {
        let catalog = MediaCatalog::new(
            vec![
                film("Newest", 2020, MovieCategory::LegoSpecial),
                film("Oldest", 1977, MovieCategory::Saga),
                film("Middle", 1984, MovieCategory::TvFilm),
            ],
            Vec::new(),
        );
        let pick = double_feature(&catalog);
        assert_eq!(pick.description, "Back-to-back classics from the archives");
        assert_eq!(
            pick.movies.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(),
            vec!["Oldest", "Middle"]
        );
    }

    #[test]
    fn double_feature_needs_two_films() {
        let catalog =
            MediaCatalog::new(vec![film("Only", 1977, MovieCategory::Saga)], Vec::new());
        let pick = double_feature(&catalog);
        assert_eq!(pick.name, "Double Feature");
        assert_eq!(pick.movies.len(), 1);
    }
}
