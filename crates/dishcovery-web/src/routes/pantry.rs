//! Pantry to Plate: what each recipe still needs given the ingredients on hand

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use dishcovery::missing_ingredients;

use crate::error::AppError;
use crate::pages::PantryMatch;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PantryParams {
    /// Comma-separated ingredients
    #[serde(default)]
    pub have: String,
    #[serde(default)]
    pub cuisine: String,
}

impl PantryParams {
    pub fn pantry_items(&self) -> Vec<String> {
        self.have
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub async fn pantry(
    State(state): State<AppState>,
    Query(params): Query<PantryParams>,
) -> Result<Html<String>, AppError> {
    let snapshot = state.store.snapshot();
    let have = params.pantry_items();

    let pool = if params.cuisine.trim().is_empty() {
        snapshot.recipes().iter().collect()
    } else {
        snapshot.by_cuisine(&params.cuisine)
    };

    let mut matches: Vec<PantryMatch<'_>> = if have.is_empty() {
        Vec::new()
    } else {
        pool.into_iter()
            .map(|recipe| {
                let missing = missing_ingredients(recipe, have.as_slice());
                PantryMatch {
                    recipe,
                    ready: missing.is_empty(),
                    missing,
                }
            })
            .collect()
    };
    // Closest to cookable first; ties keep catalog order
    matches.sort_by_key(|m| m.missing.len());
    tracing::debug!("Pantry of {} items matched {} recipes", have.len(), matches.len());

    let html = state.pages.pantry(&have, &params.cuisine, &matches)?;
    Ok(Html(html))
}

pub async fn ping() -> Json<Value> {
    Json(json!({ "ok": true, "feature": "pantry-to-plate" }))
}
