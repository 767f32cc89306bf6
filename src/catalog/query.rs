//! Read-only queries over a catalog snapshot.
//!
//! Matching is plain case-insensitive substring containment on trimmed text.
//! No tokenization or stemming happens here; see [`crate::ranking`] for the
//! optional similarity pass.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::store::CatalogSnapshot;
use crate::models::{normalize, Recipe};

impl CatalogSnapshot {
    /// Recipes for a cuisine label: exact match first, substring fallback
    pub fn by_cuisine(&self, label: &str) -> Vec<&Recipe> {
        let wanted = normalize(label);

        let exact: Vec<&Recipe> = self
            .recipes()
            .iter()
            .filter(|r| r.cuisine_norm() == wanted)
            .collect();
        if !exact.is_empty() {
            return dedupe_by_slug(exact);
        }

        if wanted.is_empty() {
            return Vec::new();
        }

        let partial = self
            .recipes()
            .iter()
            .filter(|r| r.cuisine_norm().contains(&wanted))
            .collect();
        dedupe_by_slug(partial)
    }

    /// Distinct non-empty cuisine labels, sorted
    pub fn all_cuisines(&self) -> Vec<String> {
        self.recipes()
            .iter()
            .filter(|r| !r.cuisine.is_empty())
            .map(|r| r.cuisine.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Substring search over title, cuisine and ingredients.
    ///
    /// With a non-empty cuisine filter the pool is [`Self::by_cuisine`];
    /// an empty query returns the whole pool. A whitespace-only filter is
    /// still a filter: it selects recipes without a cuisine.
    pub fn search(&self, query: &str, cuisine: Option<&str>) -> Vec<&Recipe> {
        let pool: Vec<&Recipe> = match cuisine.filter(|c| !c.is_empty()) {
            Some(label) => self.by_cuisine(label),
            None => self.recipes().iter().collect(),
        };

        let needle = normalize(query);
        if needle.is_empty() {
            return pool;
        }

        let hits = pool
            .into_iter()
            .filter(|r| r.haystack().contains(&needle))
            .collect();
        dedupe_by_slug(hits)
    }

    /// Record count per cuisine label, including "" for recipes without one
    pub fn cuisine_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for recipe in self.recipes() {
            *counts.entry(recipe.cuisine.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Ingredients not covered by the pantry.
///
/// An ingredient counts as covered when any pantry item is a substring of it
/// ("chick" covers "chicken thighs"). A blank item is a substring of every
/// ingredient, so it covers them all; callers parsing user input drop blanks
/// before getting here.
pub fn missing_ingredients<S: AsRef<str>>(recipe: &Recipe, pantry: &[S]) -> Vec<String> {
    let have: Vec<String> = pantry.iter().map(|item| normalize(item.as_ref())).collect();

    recipe
        .ingredients
        .iter()
        .filter(|ingredient| {
            let ingredient = normalize(ingredient);
            !have.iter().any(|item| ingredient.contains(item.as_str()))
        })
        .cloned()
        .collect()
}

/// Keep the first occurrence of each slug, preserving order
pub fn dedupe_by_slug(items: Vec<&Recipe>) -> Vec<&Recipe> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|&r| seen.insert(r.slug.as_str()))
        .collect()
}
