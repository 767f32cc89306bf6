//! In-memory recipe catalog: seed loading, region overrides and queries

pub mod query;
pub mod regions;
pub mod store;

pub use query::{dedupe_by_slug, missing_ingredients};
pub use regions::region_for;
pub use store::{CatalogSnapshot, RecipeStore, DEFAULT_SEED_PATH};
