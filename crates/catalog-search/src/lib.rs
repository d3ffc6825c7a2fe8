//! Typo-tolerant, alias-aware ranking of catalog entries against free text.
//!
//! Everything here is a pure function of the catalog slice and the query:
//! nothing is cached between calls and nothing can fail. Malformed input
//! (blank queries, empty catalogs, entities without optional fields) just
//! produces fewer aliases or an empty result list.

mod aliases;
mod normalize;
mod ranking;
mod similarity;

pub use aliases::{build_aliases, Aliases};
pub use normalize::{normalize, roman_to_arabic};
pub use ranking::{
    search_entries, suggest_titles, Ranker, SearchConfig, DEFAULT_MIN_SCORE,
    DEFAULT_SUGGESTION_LIMIT,
};
pub use similarity::{similarity, DEFAULT_TOKEN_BOOST};

/// Read-only view of one catalog item as seen by the search engine.
///
/// `title` must be non-empty; loaders are expected to reject entries that
/// violate this before they reach a search call.
pub trait SearchableEntity {
    fn title(&self) -> &str;

    fn episode_number(&self) -> Option<u32> {
        None
    }

    fn episode_roman(&self) -> Option<&str> {
        None
    }

    fn era(&self) -> Option<&str> {
        None
    }

    fn synopsis(&self) -> Option<&str> {
        None
    }

    fn notes(&self) -> Option<&str> {
        None
    }

    /// Key into [`SearchConfig::category_bias`].
    fn category_tag(&self) -> Option<&str> {
        None
    }
}

impl<T: SearchableEntity + ?Sized> SearchableEntity for &T {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn episode_number(&self) -> Option<u32> {
        (**self).episode_number()
    }

    fn episode_roman(&self) -> Option<&str> {
        (**self).episode_roman()
    }

    fn era(&self) -> Option<&str> {
        (**self).era()
    }

    fn synopsis(&self) -> Option<&str> {
        (**self).synopsis()
    }

    fn notes(&self) -> Option<&str> {
        (**self).notes()
    }

    fn category_tag(&self) -> Option<&str> {
        (**self).category_tag()
    }
}

/// Best-scoring alias of one entity for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchScore {
    pub matched_field: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<T> {
    pub value: T,
    /// Similarity plus category bias, clamped to `[0, 1]`.
    pub score: f64,
    /// The normalized alias that produced `score`.
    pub matched_field: String,
}
