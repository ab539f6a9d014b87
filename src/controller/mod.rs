//! Controller layer - recipe operations over the store
//!
//! Each menu action maps to one method on [`RecipeController`]. Methods
//! never print; they return entities, a named outcome for expected
//! alternate results (duplicate link, missing ingredient, ...) or an
//! [`Error`](crate::Error) for invalid input, missing entities and store
//! failures.

mod categories;
mod recipes;
mod search;

use crate::model::{Category, Recipe, RecipeField};
use crate::storage::SqliteStore;
use serde::Serialize;

/// Recipe operations bound to an open store
pub struct RecipeController<'a> {
    store: &'a SqliteStore,
}

impl<'a> RecipeController<'a> {
    /// Create a controller over an already-open store
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }
}

/// Result of linking a category to a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked { recipe: Recipe, category: Category },
    /// The link was already present; nothing was written
    AlreadyLinked { recipe: Recipe, category: Category },
}

/// Result of unlinking a category from a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlinkOutcome {
    Unlinked { recipe: Recipe, category: Category },
    /// The recipe has no category with the requested name
    NotLinked { recipe: Recipe, category_name: String },
}

/// Result of creating a uniquely-named entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<T> {
    Created(T),
    /// An entity with the same name (ignoring case) exists; nothing was written
    AlreadyExists(T),
}

/// Result of a single-field recipe update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Recipe),
    /// Numeric input did not parse; the field keeps its old value
    FieldUnchanged { recipe: Recipe, field: RecipeField },
}

/// Result of the contains-all-ingredients search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngredientSearch {
    /// Recipes holding every requested ingredient (may be empty)
    Found { recipes: Vec<Recipe> },
    /// Names that match no ingredient; the search was not run
    MissingIngredients { names: Vec<String> },
}

/// A recipe removed by [`RecipeController::delete_recipe`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedRecipe {
    pub recipe: Recipe,
    pub steps_removed: usize,
}

impl<T> CreateOutcome<T> {
    /// The created or pre-existing entity
    pub fn entity(&self) -> &T {
        match self {
            CreateOutcome::Created(e) | CreateOutcome::AlreadyExists(e) => e,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }
}
