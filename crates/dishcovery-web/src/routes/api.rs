//! JSON CRUD for persisted recipes
//!
//! Mounted only when a database is configured. Malformed bodies are
//! reported as 400 with the usual `{"error": ...}` envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use dishcovery::database::{
    NewRecipe, RecipeRepository, RecipeUpdate, StoredRecipe, DEFAULT_LIST_LIMIT,
};

use crate::error::AppError;

pub fn router(repository: RecipeRepository) -> Router {
    Router::new()
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/:slug",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .with_state(repository)
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_recipes(
    State(repo): State<RecipeRepository>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let offset = params.offset.unwrap_or(0).max(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(0);

    let recipes = repo.list(offset, limit).await?;
    let total = repo.count().await?;
    Ok(Json(json!({
        "recipes": recipes,
        "offset": offset,
        "limit": limit,
        "total": total,
    })))
}

pub async fn create_recipe(
    State(repo): State<RecipeRepository>,
    payload: Result<Json<NewRecipe>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredRecipe>), AppError> {
    let Json(data) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let created = repo.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_recipe(
    State(repo): State<RecipeRepository>,
    Path(slug): Path<String>,
) -> Result<Json<StoredRecipe>, AppError> {
    repo.get_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("recipe '{}'", slug)))
}

pub async fn update_recipe(
    State(repo): State<RecipeRepository>,
    Path(slug): Path<String>,
    payload: Result<Json<RecipeUpdate>, JsonRejection>,
) -> Result<Json<StoredRecipe>, AppError> {
    let Json(changes) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    repo.update(&slug, &changes)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("recipe '{}'", slug)))
}

pub async fn delete_recipe(
    State(repo): State<RecipeRepository>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    if repo.delete(&slug).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("recipe '{}'", slug)))
    }
}
