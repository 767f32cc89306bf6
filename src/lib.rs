//! Dishcovery recipe catalog
//!
//! - [`catalog`]: seed-backed in-memory store, region overrides, queries
//! - [`ranking`]: optional similarity re-ranking of search hits
//! - [`database`]: persisted recipe CRUD, independent of the catalog
//! - [`config`]: environment-driven process settings

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod ranking;

pub use catalog::{missing_ingredients, CatalogSnapshot, RecipeStore};
pub use config::AppConfig;
pub use error::{CatalogError, RepositoryError};
pub use models::Recipe;
pub use ranking::{select_ranker, SearchRanker};
