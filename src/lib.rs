//! # Recipebook - console recipe database
//!
//! Recipebook keeps recipes in a local SQLite database and provides:
//! - CRUD over recipes, categories, ingredients and units
//! - Recipe ↔ category links with duplicate/absent detection
//! - Category filter and "contains all ingredients" search
//! - An interactive numbered-menu shell on top of the controller layer

pub mod model;
pub mod storage;
pub mod controller;
pub mod shell;
pub mod ui;
pub mod config;

// Re-exports for convenient access
pub use model::{Category, Ingredient, Recipe, RecipeField, RecipeForm, RecipeIngredient, Step, Unit};
pub use controller::RecipeController;
pub use storage::SqliteStore;

/// Result type alias for Recipebook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Recipebook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or empty input, detected before touching the store
    #[error("{0}")]
    Validation(String),

    #[error("No {entity} found with {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Error::NotFound { entity, key: key.into() }
    }

    /// True for errors the shell reports as plain messages rather than failures
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound { .. })
    }
}
