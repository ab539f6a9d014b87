//! SQLite storage implementation

use std::path::Path;
use std::str::FromStr;
use rusqlite::{Connection, params, params_from_iter, OptionalExtension, Row};
use rust_decimal::Decimal;
use crate::Result;
use crate::model::{
    name_key, Category, Ingredient, IngredientLine, NewRecipe, Recipe, RecipeIngredient, Step, Unit,
};
use super::schema;

const RECIPE_COLUMNS: &str = "r.id, r.name, r.description, r.prep_time, r.cook_time, r.servings";

/// SQLite-backed storage for the recipe database
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema and seed default units
    fn initialize_schema(&self) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", true)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        for unit in schema::DEFAULT_UNITS {
            self.conn.execute(
                "INSERT OR IGNORE INTO unit (name, name_key) VALUES (?1, ?2)",
                [*unit, name_key(unit).as_str()],
            )?;
        }
        Ok(())
    }

    // ========== Recipe Operations ==========

    /// Insert a recipe and return it with its assigned id
    pub fn insert_recipe(&self, recipe: &NewRecipe) -> Result<Recipe> {
        self.conn.execute(
            r#"
            INSERT INTO recipe (name, description, prep_time, cook_time, servings)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                recipe.name,
                recipe.description,
                recipe.prep_time,
                recipe.cook_time,
                recipe.servings,
            ],
        )?;
        Ok(Recipe {
            id: self.conn.last_insert_rowid(),
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
        })
    }

    /// Get a recipe by id
    pub fn get_recipe(&self, id: i64) -> Result<Option<Recipe>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM recipe r WHERE r.id = ?1", RECIPE_COLUMNS),
                [id],
                Self::row_to_recipe,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All recipes in storage order
    pub fn all_recipes(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM recipe r ORDER BY r.id", RECIPE_COLUMNS))?;
        let recipes = stmt
            .query_map([], Self::row_to_recipe)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(recipes)
    }

    /// Overwrite every column of an existing recipe. Returns false if no row matched.
    pub fn update_recipe(&self, recipe: &Recipe) -> Result<bool> {
        let changed = self.conn.execute(
            r#"
            UPDATE recipe
            SET name = ?2, description = ?3, prep_time = ?4, cook_time = ?5, servings = ?6
            WHERE id = ?1
            "#,
            params![
                recipe.id,
                recipe.name,
                recipe.description,
                recipe.prep_time,
                recipe.cook_time,
                recipe.servings,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a recipe together with its steps, ingredient lines and category links.
    ///
    /// Runs in one transaction. Returns the number of steps removed.
    pub fn delete_recipe(&self, id: i64) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let steps = tx.execute("DELETE FROM step WHERE recipe_id = ?1", [id])?;
        tx.execute("DELETE FROM recipe_ingredient WHERE recipe_id = ?1", [id])?;
        tx.execute("DELETE FROM recipe_category WHERE recipe_id = ?1", [id])?;
        tx.execute("DELETE FROM recipe WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(steps)
    }

    /// Recipes linked to a category with the given name (case-insensitive)
    pub fn recipes_in_category(&self, category_name: &str) -> Result<Vec<Recipe>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT DISTINCT {}
            FROM recipe r
            JOIN recipe_category rc ON rc.recipe_id = r.id
            JOIN category c ON c.id = rc.category_id
            WHERE c.name_key = ?1
            ORDER BY r.id
            "#,
            RECIPE_COLUMNS
        ))?;
        let recipes = stmt
            .query_map([name_key(category_name)], Self::row_to_recipe)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(recipes)
    }

    /// Recipes that have a recipe_ingredient row for every one of `ingredient_ids`.
    ///
    /// Counts the distinct requested ingredients each recipe carries and keeps
    /// recipes where that count equals the size of the requested set.
    pub fn recipes_with_all_ingredients(&self, ingredient_ids: &[i64]) -> Result<Vec<Recipe>> {
        let mut ids = ingredient_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return self.all_recipes();
        }

        let placeholders = (1..=ids.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            r#"
            SELECT {columns}
            FROM recipe r
            WHERE (
                SELECT COUNT(DISTINCT ri.ingredient_id)
                FROM recipe_ingredient ri
                WHERE ri.recipe_id = r.id AND ri.ingredient_id IN ({placeholders})
            ) = ?{count}
            ORDER BY r.id
            "#,
            columns = RECIPE_COLUMNS,
            placeholders = placeholders,
            count = ids.len() + 1,
        );

        let mut values = ids.clone();
        values.push(ids.len() as i64);

        let mut stmt = self.conn.prepare(&sql)?;
        let recipes = stmt
            .query_map(params_from_iter(values.iter()), Self::row_to_recipe)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(recipes)
    }

    /// Count all recipes
    pub fn count_recipes(&self) -> Result<usize> {
        self.count_rows("recipe")
    }

    fn row_to_recipe(row: &Row) -> rusqlite::Result<Recipe> {
        Ok(Recipe {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            prep_time: row.get(3)?,
            cook_time: row.get(4)?,
            servings: row.get(5)?,
        })
    }

    // ========== Category Operations ==========

    pub fn insert_category(&self, name: &str) -> Result<Category> {
        let id = self.insert_named("category", name)?;
        Ok(Category { id, name: name.to_string() })
    }

    /// Find a category by name (case-insensitive)
    pub fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.find_named("category", name, |row| {
            Ok(Category { id: row.get(0)?, name: row.get(1)? })
        })
    }

    pub fn all_categories(&self) -> Result<Vec<Category>> {
        self.all_named("category", |row| Ok(Category { id: row.get(0)?, name: row.get(1)? }))
    }

    /// Categories linked to a recipe
    pub fn categories_for_recipe(&self, recipe_id: i64) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.id, c.name
            FROM category c
            JOIN recipe_category rc ON rc.category_id = c.id
            WHERE rc.recipe_id = ?1
            ORDER BY c.id
            "#,
        )?;
        let categories = stmt
            .query_map([recipe_id], |row| Ok(Category { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    /// Insert a recipe/category link. Returns false if the link already existed.
    pub fn link_category(&self, recipe_id: i64, category_id: i64) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO recipe_category (recipe_id, category_id) VALUES (?1, ?2)",
            [recipe_id, category_id],
        )?;
        Ok(inserted > 0)
    }

    /// Remove a recipe/category link. Returns false if there was none.
    pub fn unlink_category(&self, recipe_id: i64, category_id: i64) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM recipe_category WHERE recipe_id = ?1 AND category_id = ?2",
            [recipe_id, category_id],
        )?;
        Ok(removed > 0)
    }

    pub fn is_category_linked(&self, recipe_id: i64, category_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM recipe_category WHERE recipe_id = ?1 AND category_id = ?2",
            [recipe_id, category_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ========== Ingredient Operations ==========

    pub fn insert_ingredient(&self, name: &str) -> Result<Ingredient> {
        let id = self.insert_named("ingredient", name)?;
        Ok(Ingredient { id, name: name.to_string() })
    }

    /// Find an ingredient by name (case-insensitive)
    pub fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        self.find_named("ingredient", name, |row| {
            Ok(Ingredient { id: row.get(0)?, name: row.get(1)? })
        })
    }

    pub fn all_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.all_named("ingredient", |row| Ok(Ingredient { id: row.get(0)?, name: row.get(1)? }))
    }

    /// Insert or replace the quantity/unit of an ingredient in a recipe
    pub fn upsert_recipe_ingredient(&self, line: &RecipeIngredient) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO recipe_ingredient (recipe_id, ingredient_id, quantity, unit_id)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(recipe_id, ingredient_id) DO UPDATE SET
                quantity = excluded.quantity,
                unit_id = excluded.unit_id
            "#,
            params![
                line.recipe_id,
                line.ingredient_id,
                line.quantity.to_string(),
                line.unit_id,
            ],
        )?;
        Ok(())
    }

    /// Raw join rows of a recipe
    pub fn recipe_ingredients(&self, recipe_id: i64) -> Result<Vec<RecipeIngredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT recipe_id, ingredient_id, quantity, unit_id FROM recipe_ingredient WHERE recipe_id = ?1 ORDER BY ingredient_id",
        )?;
        let lines = stmt
            .query_map([recipe_id], |row| {
                Ok(RecipeIngredient {
                    recipe_id: row.get(0)?,
                    ingredient_id: row.get(1)?,
                    quantity: Self::column_decimal(row, 2)?,
                    unit_id: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(lines)
    }

    /// Join rows of a recipe resolved to ingredient and unit names
    pub fn ingredient_lines(&self, recipe_id: i64) -> Result<Vec<IngredientLine>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT i.name, ri.quantity, u.name
            FROM recipe_ingredient ri
            JOIN ingredient i ON i.id = ri.ingredient_id
            JOIN unit u ON u.id = ri.unit_id
            WHERE ri.recipe_id = ?1
            ORDER BY i.name
            "#,
        )?;
        let lines = stmt
            .query_map([recipe_id], |row| {
                Ok(IngredientLine {
                    ingredient: row.get(0)?,
                    quantity: Self::column_decimal(row, 1)?,
                    unit: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(lines)
    }

    fn column_decimal(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
        let text: String = row.get(idx)?;
        Decimal::from_str(&text).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
    }

    // ========== Unit Operations ==========

    pub fn insert_unit(&self, name: &str) -> Result<Unit> {
        let id = self.insert_named("unit", name)?;
        Ok(Unit { id, name: name.to_string() })
    }

    /// Find a unit by name (case-insensitive)
    pub fn find_unit_by_name(&self, name: &str) -> Result<Option<Unit>> {
        self.find_named("unit", name, |row| Ok(Unit { id: row.get(0)?, name: row.get(1)? }))
    }

    pub fn all_units(&self) -> Result<Vec<Unit>> {
        self.all_named("unit", |row| Ok(Unit { id: row.get(0)?, name: row.get(1)? }))
    }

    // ========== Step Operations ==========

    /// Append a step after the recipe's current last step
    pub fn insert_step(&self, recipe_id: i64, instruction: &str) -> Result<Step> {
        let step_number: i32 = self.conn.query_row(
            "SELECT COALESCE(MAX(step_number), 0) + 1 FROM step WHERE recipe_id = ?1",
            [recipe_id],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO step (recipe_id, step_number, instruction) VALUES (?1, ?2, ?3)",
            params![recipe_id, step_number, instruction],
        )?;
        Ok(Step {
            id: self.conn.last_insert_rowid(),
            recipe_id,
            step_number,
            instruction: instruction.to_string(),
        })
    }

    /// Steps of a recipe ordered by step number
    pub fn steps_for_recipe(&self, recipe_id: i64) -> Result<Vec<Step>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, recipe_id, step_number, instruction FROM step WHERE recipe_id = ?1 ORDER BY step_number",
        )?;
        let steps = stmt
            .query_map([recipe_id], |row| {
                Ok(Step {
                    id: row.get(0)?,
                    recipe_id: row.get(1)?,
                    step_number: row.get(2)?,
                    instruction: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(steps)
    }

    // ========== Shared helpers ==========

    /// Insert into a named table. A name whose key is taken fails the UNIQUE constraint.
    fn insert_named(&self, table: &str, name: &str) -> Result<i64> {
        self.conn.execute(
            &format!("INSERT INTO {} (name, name_key) VALUES (?1, ?2)", table),
            [name, name_key(name).as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_named<T>(
        &self,
        table: &str,
        name: &str,
        map: impl FnOnce(&Row) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        self.conn
            .query_row(
                &format!("SELECT id, name FROM {} WHERE name_key = ?1", table),
                [name_key(name)],
                map,
            )
            .optional()
            .map_err(Into::into)
    }

    fn all_named<T>(&self, table: &str, map: impl FnMut(&Row) -> rusqlite::Result<T>) -> Result<Vec<T>> {
        let mut stmt = self.conn.prepare(&format!("SELECT id, name FROM {} ORDER BY id", table))?;
        let rows = stmt.query_map([], map)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            recipes: self.count_recipes()?,
            categories: self.count_rows("category")?,
            ingredients: self.count_rows("ingredient")?,
            units: self.count_rows("unit")?,
            steps: self.count_rows("step")?,
            category_links: self.count_rows("recipe_category")?,
            ingredient_lines: self.count_rows("recipe_ingredient")?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub recipes: usize,
    pub categories: usize,
    pub ingredients: usize,
    pub units: usize,
    pub steps: usize,
    pub category_links: usize,
    pub ingredient_lines: usize,
}

impl DbStats {
    /// Label/value pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("Recipes", self.recipes),
            ("Categories", self.categories),
            ("Ingredients", self.ingredients),
            ("Units", self.units),
            ("Steps", self.steps),
            ("Category links", self.category_links),
            ("Ingredient lines", self.ingredient_lines),
        ]
    }
}
