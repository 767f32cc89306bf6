//! Dishcovery web server
//!
//! HTML pages over the seed catalog, JSON maintenance endpoints, and the
//! optional persisted-recipe API.

pub mod error;
pub mod pages;
pub mod routes;
pub mod state;

use std::path::Path;

use axum::{routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use dishcovery::database::RecipeRepository;

pub use error::AppError;
pub use pages::Pages;
pub use state::AppState;

/// Assemble the full application router.
///
/// The `/api/recipes` routes are only mounted when `repository` is given.
pub fn build_router(
    state: AppState,
    static_dir: &Path,
    repository: Option<RecipeRepository>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/", get(routes::recipes::home))
        // Catalog pages
        .route("/recipes", get(routes::recipes::list_all))
        .route("/recipes/__reload", get(routes::recipes::reload))
        .route("/recipes/__stats", get(routes::recipes::stats))
        .route(
            "/recipes/cuisine/:cuisine",
            get(routes::recipes::list_by_cuisine),
        )
        .route("/recipes/:slug", get(routes::recipes::detail))
        .route("/recipes/:slug/cook", get(routes::recipes::cook))
        // Search and pantry
        .route("/search", get(routes::search::search))
        .route("/pantry", get(routes::pantry::pantry))
        .route("/pantry/ping", get(routes::pantry::ping))
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=3600"),
                ))
                .service(ServeDir::new(static_dir)),
        )
        .with_state(state);

    match repository {
        Some(repo) => {
            app = app.merge(routes::api::router(repo));
        }
        None => tracing::info!("No DATABASE_URL configured; /api/recipes not mounted"),
    }

    app.layer(TraceLayer::new_for_http()).layer(cors)
}
