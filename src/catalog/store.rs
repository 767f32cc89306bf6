//! In-memory recipe store backed by the JSON seed file.
//!
//! The live [`CatalogSnapshot`] sits behind an [`ArcSwap`]: readers grab the
//! current `Arc` and keep using it even if a reload lands mid-request, and a
//! reload publishes a fully built snapshot in one pointer swap.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::Value;

use super::regions::region_for;
use crate::error::{CatalogError, CatalogResult};
use crate::models::Recipe;

/// Default location of the seed document, relative to the working directory
pub const DEFAULT_SEED_PATH: &str = "data/seed_recipes.json";

/// One consistent view of the catalog: ordered list plus slug index
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl CatalogSnapshot {
    /// Build a snapshot from decoded records.
    ///
    /// Region overrides are applied, then duplicate slugs collapse onto the
    /// position of their first occurrence carrying the values of the last.
    pub fn from_recipes(records: impl IntoIterator<Item = Recipe>) -> Self {
        let mut recipes: Vec<Recipe> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for mut recipe in records {
            if let Some(region) = region_for(&recipe.slug) {
                recipe.set_cuisine(region);
            }
            match index.get(&recipe.slug) {
                Some(&pos) => recipes[pos] = recipe,
                None => {
                    index.insert(recipe.slug.clone(), recipes.len());
                    recipes.push(recipe);
                }
            }
        }

        Self { recipes, index }
    }

    /// Decode a seed document: a top-level array or `{"recipes": [...]}`
    pub fn from_document(doc: &Value, path: &Path) -> CatalogResult<Self> {
        let items = match doc {
            Value::Array(items) => items,
            Value::Object(obj) => match obj.get("recipes") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(CatalogError::Format {
                        path: path.to_path_buf(),
                    })
                }
            },
            _ => {
                return Err(CatalogError::Format {
                    path: path.to_path_buf(),
                })
            }
        };

        let total = items.len();
        let snapshot = Self::from_recipes(items.iter().filter_map(Recipe::from_seed));
        if snapshot.len() < total {
            tracing::debug!(
                "Seed {}: {} elements, {} unique recipes kept",
                path.display(),
                total,
                snapshot.len()
            );
        }
        Ok(snapshot)
    }

    /// All recipes in load order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, slug: &str) -> Option<&Recipe> {
        self.index.get(slug).map(|&pos| &self.recipes[pos])
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Shared handle to the seed-backed catalog
pub struct RecipeStore {
    seed_path: PathBuf,
    current: ArcSwap<CatalogSnapshot>,
}

impl RecipeStore {
    /// Create a store and perform the initial load. Load failures are fatal.
    pub fn open(seed_path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let store = Self::with_snapshot(seed_path, CatalogSnapshot::default());
        store.load()?;
        Ok(store)
    }

    /// Create a store around an existing snapshot without touching disk
    pub fn with_snapshot(seed_path: impl Into<PathBuf>, snapshot: CatalogSnapshot) -> Self {
        Self {
            seed_path: seed_path.into(),
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Read the seed file and publish a new snapshot. Returns its record count.
    ///
    /// On any error the previous snapshot stays live.
    pub fn load(&self) -> CatalogResult<usize> {
        let path = self.seed_path.as_path();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: Value = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot = CatalogSnapshot::from_document(&doc, path)?;
        let count = snapshot.len();
        self.current.store(Arc::new(snapshot));

        tracing::info!("Loaded {} recipes from {}", count, path.display());
        Ok(count)
    }

    /// Re-read the seed file, picking up on-disk edits
    pub fn reload(&self) -> CatalogResult<usize> {
        match self.load() {
            Ok(count) => Ok(count),
            Err(e) => {
                tracing::error!("Catalog reload failed, keeping previous snapshot: {}", e);
                Err(e)
            }
        }
    }

    /// The snapshot current at call time
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }

    /// All recipes of the current snapshot, in load order
    pub fn all(&self) -> Vec<Recipe> {
        self.current.load().recipes().to_vec()
    }

    pub fn by_slug(&self, slug: &str) -> Option<Recipe> {
        self.current.load().get(slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}
