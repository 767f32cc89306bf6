//! Persisted recipe storage (SQLite via sqlx)

pub mod recipe_repository;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub use recipe_repository::{
    NewRecipe, RecipeRepository, RecipeUpdate, StoredRecipe, DEFAULT_LIST_LIMIT,
};

/// Open a connection pool, creating the database file if needed.
///
/// In-memory URLs get a single long-lived connection: every new connection
/// would otherwise see its own empty database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool_options.connect_with(options).await
}

/// Create the `recipes` table and its indexes if they are missing
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS recipes (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               slug TEXT NOT NULL UNIQUE,
               title TEXT NOT NULL,
               cuisine TEXT NOT NULL DEFAULT '',
               time_total INTEGER NOT NULL DEFAULT 0,
               servings INTEGER NOT NULL DEFAULT 0,
               ingredients TEXT NOT NULL DEFAULT '[]',
               steps TEXT NOT NULL DEFAULT '[]',
               created_at TEXT NOT NULL,
               updated_at TEXT
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_cuisine ON recipes (cuisine)")
        .execute(pool)
        .await?;

    tracing::debug!("Recipe schema ready");
    Ok(())
}
