//! Entity types for the recipe database
//!
//! Six record kinds live in the store:
//! - `Recipe`: the dish itself, with optional timing and servings
//! - `Category`, `Ingredient`, `Unit`: named lookup entities
//! - `RecipeIngredient`: recipe ↔ ingredient join carrying quantity and unit
//! - `Step`: numbered instruction owned by a single recipe

use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A recipe row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Preparation time in minutes
    pub prep_time: Option<i32>,
    /// Cooking time in minutes
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
}

impl Recipe {
    /// Value of a single field rendered for display
    pub fn field_value(&self, field: RecipeField) -> String {
        let number = |v: Option<i32>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
        match field {
            RecipeField::Name => self.name.clone(),
            RecipeField::Description => self.description.clone().unwrap_or_default(),
            RecipeField::PrepTime => number(self.prep_time),
            RecipeField::CookTime => number(self.cook_time),
            RecipeField::Servings => number(self.servings),
        }
    }
}

/// Validated values for inserting a new recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub description: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
}

/// Raw text of a recipe as typed by the user.
///
/// Nothing is written until [`RecipeForm::validate`] accepts every field.
#[derive(Debug, Clone, Default)]
pub struct RecipeForm {
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
}

impl RecipeForm {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        prep_time: impl Into<String>,
        cook_time: impl Into<String>,
        servings: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            prep_time: prep_time.into(),
            cook_time: cook_time.into(),
            servings: servings.into(),
        }
    }

    pub fn validate(&self) -> Result<NewRecipe> {
        Ok(NewRecipe {
            name: required_name("Recipe", &self.name)?,
            description: optional_text(&self.description),
            prep_time: parse_count(RecipeField::PrepTime, &self.prep_time)?,
            cook_time: parse_count(RecipeField::CookTime, &self.cook_time)?,
            servings: parse_count(RecipeField::Servings, &self.servings)?,
        })
    }
}

/// The single field touched by a recipe update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeField {
    Name,
    Description,
    PrepTime,
    CookTime,
    Servings,
}

impl RecipeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeField::Name => "name",
            RecipeField::Description => "description",
            RecipeField::PrepTime => "prep_time",
            RecipeField::CookTime => "cook_time",
            RecipeField::Servings => "servings",
        }
    }

    /// Human label used in prompts and notices
    pub fn label(&self) -> &'static str {
        match self {
            RecipeField::Name => "Name",
            RecipeField::Description => "Description",
            RecipeField::PrepTime => "Prep time",
            RecipeField::CookTime => "Cook time",
            RecipeField::Servings => "Servings",
        }
    }

    pub fn all() -> &'static [RecipeField] {
        &[
            RecipeField::Name,
            RecipeField::Description,
            RecipeField::PrepTime,
            RecipeField::CookTime,
            RecipeField::Servings,
        ]
    }
}

impl FromStr for RecipeField {
    type Err = Error;

    /// Accepts field names in any case and with or without separators,
    /// as well as the 1-based menu position.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "1" | "name" => Ok(RecipeField::Name),
            "2" | "description" | "desc" => Ok(RecipeField::Description),
            "3" | "preptime" | "prep" => Ok(RecipeField::PrepTime),
            "4" | "cooktime" | "cook" => Ok(RecipeField::CookTime),
            "5" | "servings" => Ok(RecipeField::Servings),
            _ => Err(Error::validation("Invalid choice. No updates made.")),
        }
    }
}

impl std::fmt::Display for RecipeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
}

/// Recipe ↔ ingredient join row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    /// Non-negative, two decimal places
    pub quantity: Decimal,
    pub unit_id: i64,
}

/// A join row resolved to names, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient: String,
    pub quantity: Decimal,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: i64,
    pub recipe_id: i64,
    pub step_number: i32,
    pub instruction: String,
}

/// A recipe with everything hanging off it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub categories: Vec<Category>,
    pub ingredients: Vec<IngredientLine>,
    pub steps: Vec<Step>,
}

// ========== Input parsing ==========

/// Trimmed, non-empty name
pub fn required_name(entity: &str, raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::validation(format!("{} name cannot be empty.", entity)));
    }
    Ok(name.to_string())
}

fn optional_text(raw: &str) -> Option<String> {
    let text = raw.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parse a minutes/servings value. Blank means "not set".
pub fn parse_count(field: RecipeField, raw: &str) -> Result<Option<i32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<i32>() {
        Ok(n) if n >= 0 => Ok(Some(n)),
        _ => Err(Error::validation(format!(
            "{} must be a whole number of zero or more, got '{}'.",
            field.label(),
            raw
        ))),
    }
}

/// Parse an ingredient quantity, rounded to two decimal places
pub fn parse_quantity(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    let value = Decimal::from_str(raw)
        .map_err(|_| Error::validation(format!("Invalid quantity '{}'.", raw)))?;
    if value < Decimal::ZERO {
        return Err(Error::validation("Quantity cannot be negative."));
    }
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    Ok(rounded)
}

/// Lookup key for category, ingredient and unit names.
///
/// Unicode lower-casing, so "ÉCLAIR" and "éclair" share a key.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Split comma-separated ingredient input into lower-cased, trimmed,
/// de-duplicated names. Order of first appearance is kept.
pub fn normalize_ingredient_names(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in input.split(',').map(name_key) {
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
