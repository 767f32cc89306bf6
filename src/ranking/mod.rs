//! Optional similarity re-ranking of coarse search results.
//!
//! Two strategies sit behind [`SearchRanker`]:
//! - [`SimilarityRanker`] (cargo feature `fuzzy`): scores each candidate,
//!   keeps those at or above [`SCORE_THRESHOLD`], best first
//! - [`PassThroughRanker`]: returns the coarse pool untouched
//!
//! The strategy is picked once at startup by [`select_ranker`]; ranking
//! itself never fails.

#[cfg(feature = "fuzzy")]
pub mod similarity;

use std::sync::Arc;

use crate::models::Recipe;

/// Minimum similarity (0-100) for a candidate to survive re-ranking
pub const SCORE_THRESHOLD: f64 = 55.0;

/// Strategy for ordering a coarse result pool against the user's query
pub trait SearchRanker: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn rank<'a>(&self, query: &str, pool: Vec<&'a Recipe>) -> Vec<&'a Recipe>;
}

/// Leaves the coarse pool as-is
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughRanker;

impl SearchRanker for PassThroughRanker {
    fn name(&self) -> &'static str {
        "pass-through"
    }

    fn rank<'a>(&self, _query: &str, pool: Vec<&'a Recipe>) -> Vec<&'a Recipe> {
        pool
    }
}

/// Re-ranks by the better of a title partial match and a word-set match
/// over title, cuisine and ingredients
#[cfg(feature = "fuzzy")]
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    threshold: f64,
}

#[cfg(feature = "fuzzy")]
impl Default for SimilarityRanker {
    fn default() -> Self {
        Self {
            threshold: SCORE_THRESHOLD,
        }
    }
}

#[cfg(feature = "fuzzy")]
impl SimilarityRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one recipe against the raw query
    pub fn score(&self, query: &str, recipe: &Recipe) -> f64 {
        similarity::partial_ratio(query, &recipe.title)
            .max(similarity::token_set_ratio(query, &recipe.search_text()))
    }
}

#[cfg(feature = "fuzzy")]
impl SearchRanker for SimilarityRanker {
    fn name(&self) -> &'static str {
        "similarity"
    }

    fn rank<'a>(&self, query: &str, pool: Vec<&'a Recipe>) -> Vec<&'a Recipe> {
        if query.is_empty() || pool.is_empty() {
            return pool;
        }

        let mut scored: Vec<(f64, &'a Recipe)> = pool
            .iter()
            .map(|&recipe| (self.score(query, recipe), recipe))
            .collect();
        // Stable: equal scores keep coarse order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let ranked: Vec<&'a Recipe> = scored
            .into_iter()
            .filter(|(score, _)| *score >= self.threshold)
            .map(|(_, recipe)| recipe)
            .collect();

        if ranked.is_empty() {
            tracing::debug!(
                "No candidate reached score {} for {:?}; returning {} coarse hits",
                self.threshold,
                query,
                pool.len()
            );
            return pool;
        }
        ranked
    }
}

/// Pick the ranking strategy for this process.
///
/// Similarity ranking needs both the `fuzzy` feature and `enabled`.
pub fn select_ranker(enabled: bool) -> Arc<dyn SearchRanker> {
    if !enabled {
        tracing::info!("Search ranking: pass-through");
        return Arc::new(PassThroughRanker);
    }

    match similarity_ranker() {
        Some(ranker) => {
            tracing::info!("Search ranking: similarity (threshold {})", SCORE_THRESHOLD);
            ranker
        }
        None => {
            tracing::warn!("Fuzzy ranking requested but not compiled in; using pass-through");
            Arc::new(PassThroughRanker)
        }
    }
}

#[cfg(feature = "fuzzy")]
fn similarity_ranker() -> Option<Arc<dyn SearchRanker>> {
    Some(Arc::new(SimilarityRanker::new()))
}

#[cfg(not(feature = "fuzzy"))]
fn similarity_ranker() -> Option<Arc<dyn SearchRanker>> {
    None
}
