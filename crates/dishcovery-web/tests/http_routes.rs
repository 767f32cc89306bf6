//! HTTP-level tests driving the full router with `oneshot`.
//!
//! The catalog is loaded from a temporary seed file; the CRUD API runs
//! against an in-memory SQLite database.

use std::io::{Seek, Write};
use std::sync::Arc;

use axum::body::Body;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::{NamedTempFile, TempDir};
use tower::ServiceExt;

use dishcovery::database::{self, RecipeRepository};
use dishcovery::{select_ranker, RecipeStore};
use dishcovery_web::{build_router, AppState, Pages};

// ── Fixtures ───────────────────────────────────────────────────

fn seed_document() -> Value {
    json!([
        {
            "slug": "butter-chicken",
            "title": "Butter Chicken",
            "cuisine": "North Indian",
            "time_total": 60,
            "servings": 4,
            "ingredients": ["chicken", "tomato", "butter", "cream"],
            "steps": ["s1", "s2", "s3"]
        },
        {
            "slug": "masala-dosa",
            "title": "Masala Dosa",
            "cuisine": "South Indian",
            "time_total": 90,
            "servings": 4,
            "ingredients": ["dosa batter", "potato", "mustard", "curry leaves"],
            "steps": ["s1", "s2", "s3"]
        },
        {
            "slug": "ragi-ball",
            "title": "Ragi Ball (Ragi Mudde)",
            "cuisine": "South Indian",
            "time_total": 20,
            "servings": 3,
            "ingredients": ["ragi flour", "water", "salt"],
            "steps": ["s1", "s2", "s3"]
        },
        {
            "slug": "pav-bhaji",
            "title": "Pav Bhaji",
            "cuisine": "West Indian",
            "time_total": 45,
            "servings": 4,
            "ingredients": ["pav", "potato", "tomato", "butter"],
            "steps": ["s1", "s2", "s3"]
        }
    ])
}

struct TestApp {
    router: axum::Router,
    seed: NamedTempFile,
    _static_dir: TempDir,
}

fn write_raw(file: &mut NamedTempFile, contents: &[u8]) {
    let file = file.as_file_mut();
    file.set_len(0).unwrap();
    file.rewind().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
}

fn write_seed(file: &mut NamedTempFile, doc: &Value) {
    write_raw(file, doc.to_string().as_bytes());
}

fn build_app(repository: Option<RecipeRepository>) -> TestApp {
    let mut seed = NamedTempFile::new().unwrap();
    write_seed(&mut seed, &seed_document());

    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("style.css"), "body { margin: 0; }").unwrap();

    let store = RecipeStore::open(seed.path()).unwrap();
    let state = AppState::new(Arc::new(store), select_ranker(true), Pages::new().unwrap());
    let router = build_router(state, static_dir.path(), repository);

    TestApp {
        router,
        seed,
        _static_dir: static_dir,
    }
}

async fn build_app_with_db() -> TestApp {
    let pool = database::connect("sqlite::memory:").await.unwrap();
    database::ensure_schema(&pool).await.unwrap();
    build_app(Some(RecipeRepository::new(pool)))
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(router: &axum::Router, uri: &str) -> (StatusCode, String) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send_json(
    router: &axum::Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

// ── Pages ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_home_lists_both_regions() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Butter Chicken"));
    assert!(body.contains("Masala Dosa"));
    assert!(!body.contains("Pav Bhaji"));
}

#[tokio::test]
async fn test_browse_all_recipes() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/recipes").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.to_lowercase();
    assert!(body.contains("browse all recipes"));
    assert!(body.contains("butter chicken"));
    assert!(body.contains("masala dosa"));
    assert!(body.contains("pav bhaji"));
}

#[tokio::test]
async fn test_browse_by_cuisine_north() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/recipes/cuisine/north%20indian").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("North Indian Recipes"));
    let body = body.to_lowercase();
    assert!(body.contains("butter chicken"));
    assert!(!body.contains("masala dosa"));
}

#[tokio::test]
async fn test_browse_by_partial_cuisine() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/recipes/cuisine/indian").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Butter Chicken"));
    assert!(body.contains("Masala Dosa"));
    assert!(body.contains("Pav Bhaji"));
}

#[tokio::test]
async fn test_recipe_detail_ok() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/recipes/masala-dosa").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Masala Dosa"));
    assert!(body.contains("curry leaves"));
}

#[tokio::test]
async fn test_recipe_detail_not_found() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/recipes/not-a-slug").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Not Found"));
    assert!(body.contains("This recipe does not exist."));
}

#[tokio::test]
async fn test_cook_mode() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/recipes/ragi-ball/cook").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ragi Ball (Ragi Mudde)"));
    assert!(body.contains("cook-step"));

    let (status, _) = get(&app.router, "/recipes/not-a-slug/cook").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Maintenance endpoints ──────────────────────────────────────

#[tokio::test]
async fn test_reload_and_stats() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/recipes/__reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["reloaded"], 4);

    let (status, body) = get(&app.router, "/recipes/__stats").await;
    assert_eq!(status, StatusCode::OK);
    let data = parse(&body);
    assert_eq!(data["total"], 4);
    assert_eq!(data["cuisines"]["North Indian"], 1);
    assert_eq!(data["cuisines"]["South Indian"], 2);
}

#[tokio::test]
async fn test_reload_picks_up_seed_changes() {
    let mut app = build_app(None);
    let mut doc = seed_document();
    doc.as_array_mut().unwrap().push(json!({
        "slug": "poha",
        "title": "Kanda Poha",
        "cuisine": "",
        "time_total": 20,
        "servings": 2,
        "ingredients": ["flattened rice", "onion"],
        "steps": ["Rinse", "Toss"]
    }));
    write_seed(&mut app.seed, &doc);

    let (status, body) = get(&app.router, "/recipes/__reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["reloaded"], 5);

    // Region override fills in the blank cuisine
    let (_, body) = get(&app.router, "/recipes/__stats").await;
    assert_eq!(parse(&body)["cuisines"]["West Indian"], 2);

    let (status, body) = get(&app.router, "/recipes/poha").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Kanda Poha"));
}

#[tokio::test]
async fn test_failed_reload_keeps_serving() {
    let mut app = build_app(None);
    write_raw(&mut app.seed, b"{ not json");

    let (status, body) = get(&app.router, "/recipes/__reload").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(parse(&body)["error"].is_string());

    let (status, _) = get(&app.router, "/recipes/butter-chicken").await;
    assert_eq!(status, StatusCode::OK);
}

// ── Search and pantry ──────────────────────────────────────────

#[tokio::test]
async fn test_search_basic() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/search?q=butter").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.to_lowercase();
    assert!(body.contains("butter chicken"));
    assert!(!body.contains("masala dosa"));
}

#[tokio::test]
async fn test_search_with_cuisine_filter() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/search?q=dosa&cuisine=South%20Indian").await;
    assert_eq!(status, StatusCode::OK);
    let body = body.to_lowercase();
    assert!(body.contains("masala dosa"));
    assert!(!body.contains("butter chicken"));
    assert!(body.contains("4 servings"));
}

#[tokio::test]
async fn test_search_without_query_lists_everything() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Butter Chicken"));
    assert!(body.contains("Pav Bhaji"));
}

#[tokio::test]
async fn test_search_blank_cuisine_filter_matches_uncategorised_only() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/search?q=&cuisine=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No recipes found."));
    assert!(!body.contains("Butter Chicken"));
}

#[tokio::test]
async fn test_pantry_page() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/pantry").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.to_lowercase().contains("pantry"));

    let (status, body) = get(&app.router, "/pantry?have=chick&cuisine=north%20indian").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Butter Chicken"));
    assert!(body.contains("Missing: tomato, butter, cream"));
    assert!(!body.contains("Masala Dosa"));
}

#[tokio::test]
async fn test_pantry_ping() {
    let app = build_app(None);
    let (status, body) = get(&app.router, "/pantry/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({ "ok": true, "feature": "pantry-to-plate" }));
}

#[tokio::test]
async fn test_static_assets() {
    let app = build_app(None);
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/static/style.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::CACHE_CONTROL));
}

// ── Persisted recipe API ───────────────────────────────────────

const POHA: &str = r#"{
    "slug": "poha",
    "title": "Kanda Poha",
    "cuisine": "West Indian",
    "time_total": 20,
    "servings": 2,
    "ingredients": ["flattened rice", "onion"],
    "steps": ["Rinse", "Toss"]
}"#;

#[tokio::test]
async fn test_api_not_mounted_without_database() {
    let app = build_app(None);
    let (status, _) = get(&app.router, "/api/recipes").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_create_get_and_conflict() {
    let app = build_app_with_db().await;

    let (status, body) = send_json(&app.router, Method::POST, "/api/recipes", POHA).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = parse(&body);
    assert_eq!(created["slug"], "poha");
    assert_eq!(created["ingredients"], json!(["flattened rice", "onion"]));
    assert!(created["updated_at"].is_null());

    let (status, body) = get(&app.router, "/api/recipes/poha").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["title"], "Kanda Poha");

    let (status, body) = send_json(&app.router, Method::POST, "/api/recipes", POHA).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(parse(&body)["error"].is_string());

    let (status, _) = get(&app.router, "/api/recipes/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_rejects_bad_payloads() {
    let app = build_app_with_db().await;

    let (status, _) = send_json(&app.router, Method::POST, "/api/recipes", "{ nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/recipes",
        r#"{"slug": "x", "title": "X", "cuisine": "", "time_total": "soon",
            "servings": 1, "ingredients": [], "steps": []}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad_slug = POHA.replace("\"poha\"", "\"Kanda Poha!\"");
    let (status, body) = send_json(&app.router, Method::POST, "/api/recipes", &bad_slug).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(parse(&body)["error"].as_str().unwrap().contains("slug"));
}

#[tokio::test]
async fn test_api_partial_update() {
    let app = build_app_with_db().await;
    send_json(&app.router, Method::POST, "/api/recipes", POHA).await;

    let (status, body) = send_json(
        &app.router,
        Method::PATCH,
        "/api/recipes/poha",
        r#"{"servings": 4}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = parse(&body);
    assert_eq!(updated["servings"], 4);
    assert_eq!(updated["title"], "Kanda Poha");
    assert!(updated["updated_at"].is_string());

    let (status, _) = send_json(
        &app.router,
        Method::PATCH,
        "/api/recipes/missing",
        r#"{"servings": 4}"#,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app.router,
        Method::PATCH,
        "/api/recipes/poha",
        r#"{"servings": "four"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_list_and_delete() {
    let app = build_app_with_db().await;
    send_json(&app.router, Method::POST, "/api/recipes", POHA).await;
    let dhokla = POHA.replace("\"poha\"", "\"dhokla\"");
    send_json(&app.router, Method::POST, "/api/recipes", &dhokla).await;

    let (status, body) = get(&app.router, "/api/recipes?offset=1&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    let page = parse(&body);
    assert_eq!(page["total"], 2);
    assert_eq!(page["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(page["recipes"][0]["slug"], "dhokla");

    let delete = |slug: &str| {
        Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/recipes/{}", slug))
            .body(Body::empty())
            .unwrap()
    };
    let (status, _) = send(&app.router, delete("poha")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app.router, delete("poha")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
