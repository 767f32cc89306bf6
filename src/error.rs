//! Error types for the recipe catalog and the persisted recipe store
//!
//! Lookups that find nothing are not errors: they return `None` or an
//! empty list. These enums only cover structural failures.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the seed document into the in-memory catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Seed file {path} must be a JSON array or an object with a 'recipes' array")]
    Format { path: PathBuf },
}

impl CatalogError {
    /// True when the seed file does not exist at all
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Failures from the persisted recipe repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Recipe with slug '{slug}' already exists")]
    Conflict { slug: String },

    #[error("Invalid recipe data: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt stored value in column '{column}': {source}")]
    Decode {
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Conflict { .. } => 409,
            Self::Validation(_) => 400,
            Self::Database(_) | Self::Decode { .. } => 500,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
pub type RepositoryResult<T> = Result<T, RepositoryError>;
