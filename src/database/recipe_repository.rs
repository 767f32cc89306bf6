//! Recipe repository: durable create/read/update/delete keyed by slug
//!
//! Independent of the seed-backed catalog; nothing here touches the
//! in-memory snapshot.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::{RepositoryError, RepositoryResult};

/// Default page size for [`RecipeRepository::list`]
pub const DEFAULT_LIST_LIMIT: i64 = 50;

const RECIPE_COLUMNS: &str = "id, slug, title, cuisine, time_total, servings, \
                              ingredients, steps, created_at, updated_at";

static SLUG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn slug_pattern() -> &'static Regex {
    SLUG_PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").expect("slug pattern compiles"))
}

/// A persisted recipe row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRecipe {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub cuisine: String,
    pub time_total: i64,
    pub servings: i64,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a recipe; every field is required
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewRecipe {
    pub slug: String,
    pub title: String,
    pub cuisine: String,
    pub time_total: i64,
    pub servings: i64,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl NewRecipe {
    pub fn validate(&self) -> RepositoryResult<()> {
        if !slug_pattern().is_match(&self.slug) {
            return Err(RepositoryError::Validation(format!(
                "slug '{}' must match ^[a-z0-9-]+$",
                self.slug
            )));
        }
        Ok(())
    }
}

/// Partial update: only `Some` fields are written
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub time_total: Option<i64>,
    pub servings: Option<i64>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
}

impl RecipeUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.cuisine.is_none()
            && self.time_total.is_none()
            && self.servings.is_none()
            && self.ingredients.is_none()
            && self.steps.is_none()
    }
}

#[derive(Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new recipe. A taken slug is reported as a conflict.
    pub async fn create(&self, data: &NewRecipe) -> RepositoryResult<StoredRecipe> {
        data.validate()?;

        let row = sqlx::query(&format!(
            r#"INSERT INTO recipes (
                   slug, title, cuisine, time_total, servings,
                   ingredients, steps, created_at
               ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {RECIPE_COLUMNS}"#
        ))
        .bind(&data.slug)
        .bind(&data.title)
        .bind(&data.cuisine)
        .bind(data.time_total)
        .bind(data.servings)
        .bind(encode_list(&data.ingredients))
        .bind(encode_list(&data.steps))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_database(e, &data.slug))?;

        let recipe = recipe_from_row(&row)?;
        tracing::info!("Created recipe {} (id {})", recipe.slug, recipe.id);
        Ok(recipe)
    }

    pub async fn get_by_slug(&self, slug: &str) -> RepositoryResult<Option<StoredRecipe>> {
        let row = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(recipe_from_row).transpose()
    }

    /// Recipes ordered by id, `limit` rows starting at `offset`
    pub async fn list(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<StoredRecipe>> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(limit.max(0))
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(recipe_from_row).collect()
    }

    /// Apply the supplied fields. `None` when the slug does not exist.
    pub async fn update(
        &self,
        slug: &str,
        changes: &RecipeUpdate,
    ) -> RepositoryResult<Option<StoredRecipe>> {
        if changes.is_empty() {
            return self.get_by_slug(slug).await;
        }

        let row = sqlx::query(&format!(
            r#"UPDATE recipes SET
                   title = COALESCE(?, title),
                   cuisine = COALESCE(?, cuisine),
                   time_total = COALESCE(?, time_total),
                   servings = COALESCE(?, servings),
                   ingredients = COALESCE(?, ingredients),
                   steps = COALESCE(?, steps),
                   updated_at = ?
               WHERE slug = ?
               RETURNING {RECIPE_COLUMNS}"#
        ))
        .bind(changes.title.as_deref())
        .bind(changes.cuisine.as_deref())
        .bind(changes.time_total)
        .bind(changes.servings)
        .bind(changes.ingredients.as_deref().map(encode_list))
        .bind(changes.steps.as_deref().map(encode_list))
        .bind(Utc::now())
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let recipe = recipe_from_row(&row)?;
                tracing::info!("Updated recipe {}", recipe.slug);
                Ok(Some(recipe))
            }
            None => Ok(None),
        }
    }

    /// Remove a recipe. Returns whether a row was deleted.
    pub async fn delete(&self, slug: &str) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!("Deleted recipe {}", slug);
        }
        Ok(deleted)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn encode_list(items: &[String]) -> String {
    // Serializing a slice of strings cannot fail
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

fn decode_list(raw: &str, column: &'static str) -> RepositoryResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|source| RepositoryError::Decode { column, source })
}

fn recipe_from_row(row: &SqliteRow) -> RepositoryResult<StoredRecipe> {
    let ingredients: String = row.try_get("ingredients")?;
    let steps: String = row.try_get("steps")?;

    Ok(StoredRecipe {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        title: row.try_get("title")?,
        cuisine: row.try_get("cuisine")?,
        time_total: row.try_get("time_total")?,
        servings: row.try_get("servings")?,
        ingredients: decode_list(&ingredients, "ingredients")?,
        steps: decode_list(&steps, "steps")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn conflict_or_database(err: sqlx::Error, slug: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Conflict {
            slug: slug.to_string(),
        },
        _ => RepositoryError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{connect, ensure_schema};

    async fn repository() -> RecipeRepository {
        let pool = connect("sqlite::memory:").await.unwrap();
        ensure_schema(&pool).await.unwrap();
        RecipeRepository::new(pool)
    }

    fn dosa() -> NewRecipe {
        NewRecipe {
            slug: "masala-dosa".into(),
            title: "Masala Dosa".into(),
            cuisine: "South Indian".into(),
            time_total: 90,
            servings: 4,
            ingredients: vec!["dosa batter".into(), "potato".into()],
            steps: vec!["Spread batter".into(), "Fill and fold".into()],
        }
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let repo = repository().await;
        let created = repo.create(&dosa()).await.unwrap();
        assert_eq!(created.slug, "masala-dosa");
        assert!(created.updated_at.is_none());

        let fetched = repo.get_by_slug("masala-dosa").await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Masala Dosa");
        assert_eq!(fetched.cuisine, "South Indian");
        assert_eq!(fetched.time_total, 90);
        assert_eq!(fetched.servings, 4);
        assert_eq!(fetched.ingredients, vec!["dosa batter", "potato"]);
        assert_eq!(fetched.steps, vec!["Spread batter", "Fill and fold"]);
    }

    #[tokio::test]
    async fn test_get_missing_slug_is_none() {
        let repo = repository().await;
        assert!(repo.get_by_slug("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let repo = repository().await;
        repo.create(&dosa()).await.unwrap();
        let err = repo.create(&dosa()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { ref slug } if slug == "masala-dosa"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_slug_is_rejected() {
        let repo = repository().await;
        let mut data = dosa();
        data.slug = "Masala Dosa!".into();
        let err = repo.create(&data).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_partial_update_touches_only_supplied_fields() {
        let repo = repository().await;
        let created = repo.create(&dosa()).await.unwrap();

        let changes = RecipeUpdate {
            title: Some("Mysore Masala Dosa".into()),
            servings: Some(2),
            ..Default::default()
        };
        let updated = repo
            .update("masala-dosa", &changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Mysore Masala Dosa");
        assert_eq!(updated.servings, 2);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.cuisine, created.cuisine);
        assert_eq!(updated.time_total, created.time_total);
        assert_eq!(updated.ingredients, created.ingredients);
        assert_eq!(updated.steps, created.steps);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_lists() {
        let repo = repository().await;
        repo.create(&dosa()).await.unwrap();

        let changes = RecipeUpdate {
            ingredients: Some(vec!["rice".into(), "urad dal".into()]),
            ..Default::default()
        };
        let updated = repo.update("masala-dosa", &changes).await.unwrap().unwrap();
        assert_eq!(updated.ingredients, vec!["rice", "urad dal"]);
        assert_eq!(updated.steps.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_slug_is_none() {
        let repo = repository().await;
        let changes = RecipeUpdate {
            title: Some("Ghost".into()),
            ..Default::default()
        };
        assert!(repo.update("ghost", &changes).await.unwrap().is_none());
        assert!(repo
            .update("ghost", &RecipeUpdate::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository().await;
        repo.create(&dosa()).await.unwrap();

        assert!(repo.delete("masala-dosa").await.unwrap());
        assert!(!repo.delete("masala-dosa").await.unwrap());
        assert!(!repo.delete("never-existed").await.unwrap());
        assert!(repo.get_by_slug("masala-dosa").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_window() {
        let repo = repository().await;
        for slug in ["a-1", "b-2", "c-3", "d-4"] {
            let mut data = dosa();
            data.slug = slug.into();
            repo.create(&data).await.unwrap();
        }

        let all = repo.list(0, DEFAULT_LIST_LIMIT).await.unwrap();
        let slugs: Vec<_> = all.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a-1", "b-2", "c-3", "d-4"]);

        let page = repo.list(1, 2).await.unwrap();
        let slugs: Vec<_> = page.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b-2", "c-3"]);

        assert!(repo.list(10, 5).await.unwrap().is_empty());
    }
}
