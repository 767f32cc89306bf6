//! Search results page: coarse substring search, then the configured ranker

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::pages::SearchHit;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub cuisine: String,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let snapshot = state.store.snapshot();
    let filter = Some(params.cuisine.as_str()).filter(|c| !c.is_empty());

    let pool = snapshot.search(&params.q, filter);
    let pool_size = pool.len();
    let ranked = state.ranker.rank(&params.q, pool);
    tracing::debug!(
        "Search q={:?} cuisine={:?}: {} coarse hits, {} after {} ranking",
        params.q,
        params.cuisine,
        pool_size,
        ranked.len(),
        state.ranker.name()
    );

    let results: Vec<SearchHit> = ranked.into_iter().map(SearchHit::from).collect();
    let html = state
        .pages
        .search_results(&params.q, &params.cuisine, &results)?;
    Ok(Html(html))
}
