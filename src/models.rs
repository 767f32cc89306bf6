//! Recipe value type shared by the catalog, the ranker and the page renderer

use serde::Serialize;
use serde_json::{Map, Value};

/// A recipe as held by the in-memory catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub slug: String,
    pub title: String,
    pub cuisine: String,
    #[serde(skip)]
    cuisine_norm: String,
    pub time_total: i64,
    pub servings: i64,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl Recipe {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        cuisine: impl Into<String>,
        time_total: i64,
        servings: i64,
        ingredients: Vec<String>,
        steps: Vec<String>,
    ) -> Self {
        let cuisine = cuisine.into();
        Self {
            slug: slug.into(),
            title: title.into(),
            cuisine_norm: normalize(&cuisine),
            cuisine,
            time_total,
            servings,
            ingredients,
            steps,
        }
    }

    /// Trimmed, lowercased cuisine used for matching only
    pub fn cuisine_norm(&self) -> &str {
        &self.cuisine_norm
    }

    /// Replace the cuisine label, keeping the normalized copy in step
    pub fn set_cuisine(&mut self, cuisine: impl Into<String>) {
        self.cuisine = cuisine.into();
        self.cuisine_norm = normalize(&self.cuisine);
    }

    /// Lowercased "title cuisine ingredient..." text used by substring search
    pub fn haystack(&self) -> String {
        self.search_text().to_lowercase()
    }

    /// Space-joined title, cuisine and ingredients in their original case
    pub fn search_text(&self) -> String {
        let mut parts = Vec::with_capacity(self.ingredients.len() + 2);
        parts.push(self.title.as_str());
        parts.push(self.cuisine.as_str());
        parts.extend(self.ingredients.iter().map(String::as_str));
        parts.join(" ")
    }

    /// Decode one element of the seed document.
    ///
    /// Returns `None` when the element is not an object or has no usable slug.
    /// Mistyped fields fall back to empty/zero values.
    pub fn from_seed(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let slug = obj.get("slug").and_then(Value::as_str).unwrap_or("").trim();
        if slug.is_empty() {
            return None;
        }

        Some(Self::new(
            slug,
            str_field(obj, "title"),
            str_field(obj, "cuisine"),
            int_field(obj, "time_total"),
            int_field(obj, "servings"),
            list_field(obj, "ingredients"),
            list_field(obj, "steps"),
        ))
    }
}

/// Trim and lowercase, the comparison form used by every matcher
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn int_field(obj: &Map<String, Value>, key: &str) -> i64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
