//! Dishcovery web server binary
//!
//! Loads the seed catalog, picks the search ranker, optionally opens the
//! recipe database, and serves the router built by `dishcovery_web`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dishcovery::database::{self, RecipeRepository};
use dishcovery::{select_ranker, AppConfig, RecipeStore};
use dishcovery_web::{build_router, AppState, Pages};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dishcovery=info,dishcovery_web=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Dishcovery");

    let config = AppConfig::from_env();

    let store = match RecipeStore::open(config.seed_path.clone()) {
        Ok(store) => store,
        Err(e) => {
            if e.is_not_found() {
                tracing::error!(
                    "Seed file {} not found; set DISHCOVERY_SEED_PATH",
                    config.seed_path.display()
                );
            }
            return Err(e).with_context(|| {
                format!(
                    "failed to load seed recipes from {}",
                    config.seed_path.display()
                )
            });
        }
    };
    let ranker = select_ranker(config.fuzzy_search);

    let repository = match config.database_url.as_deref() {
        Some(url) => {
            let pool = database::connect(url)
                .await
                .with_context(|| format!("failed to connect to database at {}", url))?;
            database::ensure_schema(&pool)
                .await
                .context("failed to prepare recipe schema")?;
            tracing::info!("Database connection established");
            Some(RecipeRepository::new(pool))
        }
        None => None,
    };
    let api_enabled = repository.is_some();

    let pages = Pages::new().context("failed to register page templates")?;
    let state = AppState::new(Arc::new(store), ranker, pages);

    tracing::info!("Serving static files from: {}", config.static_dir.display());
    let app = build_router(state, &config.static_dir, repository);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    tracing::info!("");
    tracing::info!("===========================================");
    tracing::info!("  Dishcovery running on http://{}", addr);
    tracing::info!("===========================================");
    tracing::info!("");
    tracing::info!("Pages:");
    tracing::info!("  /                     - Home");
    tracing::info!("  /recipes              - Browse all recipes");
    tracing::info!("  /recipes/:slug/cook   - Cook mode");
    tracing::info!("  /search?q=            - Search");
    tracing::info!("  /pantry?have=         - Pantry to Plate");
    if api_enabled {
        tracing::info!("API Endpoints:");
        tracing::info!("  /api/recipes          - Persisted recipe CRUD");
    }
    tracing::info!("");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!("Port {} is already in use; set SERVER_PORT", config.port);
            }
            return Err(e).with_context(|| format!("failed to bind to {}", addr));
        }
    };

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
