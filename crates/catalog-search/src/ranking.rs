use std::collections::HashMap;

use tracing::debug;

use crate::aliases::build_aliases;
use crate::normalize::normalize;
use crate::similarity::{similarity_with_boost, DEFAULT_TOKEN_BOOST};
use crate::{MatchScore, SearchResult, SearchableEntity};

pub const DEFAULT_MIN_SCORE: f64 = 0.32;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Tuning knobs for [`Ranker`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Results scoring below this after the category bias are dropped.
    pub min_score: f64,
    /// Added once per query token found verbatim in a candidate.
    pub token_boost: f64,
    /// Additive bias keyed by [`SearchableEntity::category_tag`]. Missing tags get 0.
    pub category_bias: HashMap<String, f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            token_boost: DEFAULT_TOKEN_BOOST,
            category_bias: HashMap::from([
                ("SAGA".to_string(), 0.05),
                ("ANTHOLOGY".to_string(), 0.03),
            ]),
        }
    }
}

impl SearchConfig {
    pub fn with_category_bias(mut self, tag: impl Into<String>, bias: f64) -> Self {
        self.category_bias.insert(tag.into(), bias);
        self
    }

    pub fn bias_for(&self, tag: Option<&str>) -> f64 {
        tag.and_then(|t| self.category_bias.get(t))
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: SearchConfig,
}

impl Ranker {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Scores every entity against `query` and returns the ones above the
    /// threshold, best first. `limit == 0` means no limit.
    pub fn search<'c, 'q, T: SearchableEntity>(
        &self,
        catalog: &'c [T],
        query: impl Into<Option<&'q str>>,
        limit: usize,
    ) -> Vec<SearchResult<&'c T>> {
        let Some(query) = query.into().filter(|q| !q.trim().is_empty()) else {
            return Vec::new();
        };
        let normalized_query = normalize(query);
        if normalized_query.is_empty() {
            return Vec::new();
        }

        let mut hits = catalog
            .iter()
            .filter_map(|entity| {
                let best = self.score_entity(&normalized_query, entity);
                (best.score >= self.config.min_score).then(|| SearchResult {
                    value: entity,
                    score: best.score,
                    matched_field: best.matched_field,
                })
            })
            .collect::<Vec<_>>();

        // Stable: equal scores keep catalog order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        if limit > 0 {
            hits.truncate(limit);
        }

        debug!(
            query = %normalized_query,
            catalog_size = catalog.len(),
            hits = hits.len(),
            "fuzzy search"
        );
        hits
    }

    /// Titles of the best matches, de-duplicated in score order.
    /// `limit == 0` falls back to [`DEFAULT_SUGGESTION_LIMIT`].
    pub fn suggest<'q, T: SearchableEntity>(
        &self,
        catalog: &[T],
        query: impl Into<Option<&'q str>>,
        limit: usize,
    ) -> Vec<String> {
        let limit = if limit == 0 {
            DEFAULT_SUGGESTION_LIMIT
        } else {
            limit
        };

        let mut titles: Vec<String> = Vec::new();
        for hit in self.search(catalog, query, limit) {
            let title = hit.value.title();
            if !titles.iter().any(|t| t == title) {
                titles.push(title.to_string());
            }
        }
        titles
    }

    /// Best alias for one entity, with the category bias applied and clamped.
    pub fn score_entity<T: SearchableEntity + ?Sized>(
        &self,
        normalized_query: &str,
        entity: &T,
    ) -> MatchScore {
        let best = build_aliases(entity)
            .iter()
            .fold(MatchScore::default(), |best, alias| {
                let score =
                    similarity_with_boost(normalized_query, alias, self.config.token_boost);
                if score > best.score {
                    MatchScore {
                        matched_field: alias.to_string(),
                        score,
                    }
                } else {
                    best
                }
            });

        let bias = self.config.bias_for(entity.category_tag());
        MatchScore {
            score: (best.score + bias).min(1.0),
            ..best
        }
    }
}

pub fn search_entries<'c, 'q, T: SearchableEntity>(
    catalog: &'c [T],
    query: impl Into<Option<&'q str>>,
    limit: usize,
) -> Vec<SearchResult<&'c T>> {
    Ranker::default().search(catalog, query, limit)
}

pub fn suggest_titles<'q, T: SearchableEntity>(
    catalog: &[T],
    query: impl Into<Option<&'q str>>,
    limit: usize,
) -> Vec<String> {
    Ranker::default().suggest(catalog, query, limit)
}
