//! Process configuration from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `DISHCOVERY_SEED_PATH` | `data/seed_recipes.json` |
//! | `DATABASE_URL` | unset: CRUD API disabled |
//! | `SERVER_PORT` | `3000` |
//! | `STATIC_DIR` | `static` |
//! | `DISHCOVERY_FUZZY` | on |

use std::path::PathBuf;

use crate::catalog::DEFAULT_SEED_PATH;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed_path: PathBuf,
    pub database_url: Option<String>,
    pub port: u16,
    pub static_dir: PathBuf,
    pub fuzzy_search: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
            database_url: None,
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            fuzzy_search: true,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("SERVER_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid SERVER_PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let fuzzy_search = match get("DISHCOVERY_FUZZY") {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!("Invalid DISHCOVERY_FUZZY {:?}, leaving fuzzy search on", raw);
                true
            }),
            None => defaults.fuzzy_search,
        };

        Self {
            seed_path: get("DISHCOVERY_SEED_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.seed_path),
            database_url: get("DATABASE_URL"),
            port,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            fuzzy_search,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
