//! Storage Layer - SQLite-backed persistence
//!
//! Tables:
//! - recipe(id, name, description, prep_time, cook_time, servings)
//! - category(id, name), ingredient(id, name), unit(id, name)
//! - step(id, recipe_id, step_number, instruction)
//! - recipe_category(recipe_id, category_id)
//! - recipe_ingredient(recipe_id, ingredient_id, quantity, unit_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
