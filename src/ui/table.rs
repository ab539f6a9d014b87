use crate::model::{Category, IngredientLine, Recipe, Step};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct RecipeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Prep (min)")]
    prep_time: String,
    #[tabled(rename = "Cook (min)")]
    cook_time: String,
    #[tabled(rename = "Servings")]
    servings: String,
}

impl From<&Recipe> for RecipeRow {
    fn from(recipe: &Recipe) -> Self {
        use crate::model::RecipeField;
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            description: recipe.field_value(RecipeField::Description),
            prep_time: recipe.field_value(RecipeField::PrepTime),
            cook_time: recipe.field_value(RecipeField::CookTime),
            servings: recipe.field_value(RecipeField::Servings),
        }
    }
}

#[derive(Tabled)]
struct NamedRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct IngredientRow {
    #[tabled(rename = "Ingredient")]
    ingredient: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Unit")]
    unit: String,
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "#")]
    number: i32,
    #[tabled(rename = "Instruction")]
    instruction: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Table")]
    label: String,
    #[tabled(rename = "Rows")]
    value: usize,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn recipes_table(recipes: &[Recipe]) -> String {
    render(recipes.iter().map(RecipeRow::from).collect())
}

pub fn categories_table(categories: &[Category]) -> String {
    named_table(categories.iter().map(|c| (c.id, c.name.as_str())))
}

/// Two-column table for any id/name entity
pub fn named_table<'a>(rows: impl IntoIterator<Item = (i64, &'a str)>) -> String {
    render(
        rows.into_iter()
            .map(|(id, name)| NamedRow { id, name: name.to_string() })
            .collect(),
    )
}

pub fn ingredient_lines_table(lines: &[IngredientLine]) -> String {
    render(
        lines
            .iter()
            .map(|l| IngredientRow {
                ingredient: l.ingredient.clone(),
                quantity: l.quantity.to_string(),
                unit: l.unit.clone(),
            })
            .collect(),
    )
}

pub fn steps_table(steps: &[Step]) -> String {
    render(
        steps
            .iter()
            .map(|s| StepRow { number: s.step_number, instruction: s.instruction.clone() })
            .collect(),
    )
}

pub fn stats_table(stats: &[(&str, usize)]) -> String {
    render(
        stats
            .iter()
            .map(|(label, value)| StatRow { label: label.to_string(), value: *value })
            .collect(),
    )
}
