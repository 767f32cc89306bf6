//! Home, browse, detail and cook mode pages plus the catalog maintenance endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::pages::title_case;
use crate::state::AppState;

type PageResult = Result<(StatusCode, Html<String>), AppError>;

pub async fn home(State(state): State<AppState>) -> PageResult {
    let snapshot = state.store.snapshot();
    let north = snapshot.by_cuisine("north indian");
    let south = snapshot.by_cuisine("south indian");
    let html = state.pages.home(&north, &south)?;
    Ok((StatusCode::OK, Html(html)))
}

pub async fn list_all(State(state): State<AppState>) -> PageResult {
    let snapshot = state.store.snapshot();
    let recipes: Vec<_> = snapshot.recipes().iter().collect();
    let html = state
        .pages
        .browse("Browse All Recipes", &recipes, &snapshot.all_cuisines())?;
    Ok((StatusCode::OK, Html(html)))
}

pub async fn list_by_cuisine(
    State(state): State<AppState>,
    Path(cuisine): Path<String>,
) -> PageResult {
    let snapshot = state.store.snapshot();
    let recipes = snapshot.by_cuisine(&cuisine);
    tracing::debug!("Cuisine {:?} matched {} recipes", cuisine, recipes.len());

    let heading = format!("{} Recipes", title_case(&cuisine));
    let html = state
        .pages
        .browse(&heading, &recipes, &snapshot.all_cuisines())?;
    Ok((StatusCode::OK, Html(html)))
}

/// Re-read the seed file without restarting the process
pub async fn reload(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let store = state.store.clone();
    let count = tokio::task::spawn_blocking(move || store.reload())
        .await
        .map_err(|e| AppError::Internal(format!("reload task failed: {}", e)))??;
    Ok(Json(json!({ "reloaded": count })))
}

/// Recipe counts per cuisine label
pub async fn stats(State(state): State<AppState>) -> Json<Value> {
    let counts = state.store.snapshot().cuisine_counts();
    let total: usize = counts.values().sum();
    Json(json!({ "cuisines": counts, "total": total }))
}

pub async fn detail(State(state): State<AppState>, Path(slug): Path<String>) -> PageResult {
    let snapshot = state.store.snapshot();
    let recipe = snapshot.get(&slug);
    let status = if recipe.is_some() {
        StatusCode::OK
    } else {
        tracing::debug!("No recipe for slug {:?}", slug);
        StatusCode::NOT_FOUND
    };
    Ok((status, Html(state.pages.detail(recipe)?)))
}

pub async fn cook(State(state): State<AppState>, Path(slug): Path<String>) -> PageResult {
    let snapshot = state.store.snapshot();
    let recipe = snapshot.get(&slug);
    let status = if recipe.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Html(state.pages.cook(recipe)?)))
}
