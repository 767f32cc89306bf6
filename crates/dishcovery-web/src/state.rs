//! Shared application state
//!
//! Page handlers read the catalog snapshot through `store` and rank search
//! hits with `ranker`. The persisted CRUD API carries its own state.

use std::sync::Arc;

use dishcovery::{RecipeStore, SearchRanker};

use crate::pages::Pages;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecipeStore>,
    pub ranker: Arc<dyn SearchRanker>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(store: Arc<RecipeStore>, ranker: Arc<dyn SearchRanker>, pages: Pages) -> Self {
        Self {
            store,
            ranker,
            pages: Arc::new(pages),
        }
    }
}
