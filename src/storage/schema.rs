//! Database schema definitions

/// SQL to create the recipe table
pub const CREATE_RECIPE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS recipe (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    prep_time INTEGER,
    cook_time INTEGER,
    servings INTEGER
)
"#;

/// SQL to create the category table
/// `name_key` is the Unicode lower-cased name; uniqueness and lookups go through it
pub const CREATE_CATEGORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS category (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    name_key TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the ingredient table
pub const CREATE_INGREDIENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ingredient (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    name_key TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the unit table
pub const CREATE_UNIT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS unit (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    name_key TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the step table
/// Rows are removed by the recipe delete, not by a storage cascade
pub const CREATE_STEP_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS step (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    recipe_id INTEGER NOT NULL REFERENCES recipe(id),
    step_number INTEGER NOT NULL,
    instruction TEXT NOT NULL
)
"#;

/// SQL to create the recipe/category join table
pub const CREATE_RECIPE_CATEGORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS recipe_category (
    recipe_id INTEGER NOT NULL REFERENCES recipe(id),
    category_id INTEGER NOT NULL REFERENCES category(id),
    PRIMARY KEY (recipe_id, category_id)
)
"#;

/// SQL to create the recipe/ingredient join table
/// Quantity is kept as fixed two-decimal text so it round-trips exactly
pub const CREATE_RECIPE_INGREDIENT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS recipe_ingredient (
    recipe_id INTEGER NOT NULL REFERENCES recipe(id),
    ingredient_id INTEGER NOT NULL REFERENCES ingredient(id),
    quantity TEXT NOT NULL,
    unit_id INTEGER NOT NULL REFERENCES unit(id),
    PRIMARY KEY (recipe_id, ingredient_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_step_recipe ON step(recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_recipe_category_category ON recipe_category(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_recipe_ingredient_ingredient ON recipe_ingredient(ingredient_id)",
];

/// Units available in a fresh database
pub const DEFAULT_UNITS: &[&str] = &["g", "kg", "ml", "l", "tsp", "tbsp", "cup", "pcs"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_RECIPE_TABLE,
        CREATE_CATEGORY_TABLE,
        CREATE_INGREDIENT_TABLE,
        CREATE_UNIT_TABLE,
        CREATE_STEP_TABLE,
        CREATE_RECIPE_CATEGORY_TABLE,
        CREATE_RECIPE_INGREDIENT_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
