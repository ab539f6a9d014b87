//! Recipe lookup, mutation and composition

use super::{DeletedRecipe, RecipeController, UpdateOutcome};
use crate::model::{
    parse_count, parse_quantity, required_name, Recipe, RecipeDetails, RecipeField, RecipeForm,
    RecipeIngredient, Step,
};
use crate::{Error, Result};

impl<'a> RecipeController<'a> {
    /// All recipes in storage order. An empty list is not an error.
    pub fn list_all_recipes(&self) -> Result<Vec<Recipe>> {
        let recipes = self.store.all_recipes()?;
        tracing::debug!(count = recipes.len(), "listed recipes");
        Ok(recipes)
    }

    pub fn find_recipe_by_id(&self, id: i64) -> Result<Recipe> {
        self.store
            .get_recipe(id)?
            .ok_or_else(|| Error::not_found("recipe", format!("ID {}", id)))
    }

    /// Recipe with its categories, ingredient lines and ordered steps
    pub fn recipe_details(&self, id: i64) -> Result<RecipeDetails> {
        let recipe = self.find_recipe_by_id(id)?;
        Ok(RecipeDetails {
            categories: self.store.categories_for_recipe(id)?,
            ingredients: self.store.ingredient_lines(id)?,
            steps: self.store.steps_for_recipe(id)?,
            recipe,
        })
    }

    /// Validate every field of `form`, then insert. Nothing is written on a validation error.
    pub fn create_recipe(&self, form: &RecipeForm) -> Result<Recipe> {
        let new_recipe = form.validate().inspect_err(|e| {
            tracing::warn!(error = %e, "rejected recipe input");
        })?;
        let recipe = self.store.insert_recipe(&new_recipe)?;
        tracing::info!(id = recipe.id, name = %recipe.name, "created recipe");
        Ok(recipe)
    }

    /// Change a single field of a recipe.
    ///
    /// A numeric field given a non-numeric value is left as it was and the
    /// call still succeeds with [`UpdateOutcome::FieldUnchanged`].
    pub fn update_recipe(&self, id: i64, field: RecipeField, new_value: &str) -> Result<UpdateOutcome> {
        let mut recipe = self.find_recipe_by_id(id)?;

        match field {
            RecipeField::Name => recipe.name = required_name("Recipe", new_value)?,
            RecipeField::Description => {
                let text = new_value.trim();
                recipe.description = (!text.is_empty()).then(|| text.to_string());
            }
            RecipeField::PrepTime | RecipeField::CookTime | RecipeField::Servings => {
                let value = match parse_count(field, new_value) {
                    Ok(Some(n)) => n,
                    Ok(None) | Err(_) => {
                        tracing::warn!(id, field = field.as_str(), input = new_value, "numeric field not changed");
                        return Ok(UpdateOutcome::FieldUnchanged { recipe, field });
                    }
                };
                match field {
                    RecipeField::PrepTime => recipe.prep_time = Some(value),
                    RecipeField::CookTime => recipe.cook_time = Some(value),
                    _ => recipe.servings = Some(value),
                }
            }
        }

        if !self.store.update_recipe(&recipe)? {
            return Err(Error::not_found("recipe", format!("ID {}", id)));
        }
        tracing::info!(id, field = field.as_str(), "updated recipe");
        Ok(UpdateOutcome::Updated(recipe))
    }

    /// Remove a recipe and everything it owns
    pub fn delete_recipe(&self, id: i64) -> Result<DeletedRecipe> {
        let recipe = self.find_recipe_by_id(id)?;
        let steps_removed = self.store.delete_recipe(id)?;
        tracing::info!(id, steps_removed, "deleted recipe");
        Ok(DeletedRecipe { recipe, steps_removed })
    }

    /// Put an ingredient into a recipe, replacing quantity and unit if it is already there
    pub fn add_ingredient_to_recipe(
        &self,
        recipe_id: i64,
        ingredient_name: &str,
        quantity: &str,
        unit_name: &str,
    ) -> Result<RecipeIngredient> {
        let ingredient_name = required_name("Ingredient", ingredient_name)?;
        let unit_name = required_name("Unit", unit_name)?;
        let quantity = parse_quantity(quantity)?;

        let recipe = self.find_recipe_by_id(recipe_id)?;
        let ingredient = self
            .store
            .find_ingredient_by_name(&ingredient_name)?
            .ok_or_else(|| Error::not_found("ingredient", format!("name '{}'", ingredient_name)))?;
        let unit = self
            .store
            .find_unit_by_name(&unit_name)?
            .ok_or_else(|| Error::not_found("unit", format!("name '{}'", unit_name)))?;

        let line = RecipeIngredient {
            recipe_id: recipe.id,
            ingredient_id: ingredient.id,
            quantity,
            unit_id: unit.id,
        };
        self.store.upsert_recipe_ingredient(&line)?;
        tracing::info!(recipe_id, ingredient = %ingredient.name, %quantity, unit = %unit.name, "set recipe ingredient");
        Ok(line)
    }

    /// Append an instruction as the recipe's next step
    pub fn add_step_to_recipe(&self, recipe_id: i64, instruction: &str) -> Result<Step> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(Error::validation("Step instruction cannot be empty."));
        }
        let recipe = self.find_recipe_by_id(recipe_id)?;
        let step = self.store.insert_step(recipe.id, instruction)?;
        tracing::info!(recipe_id, step = step.step_number, "added step");
        Ok(step)
    }
}
