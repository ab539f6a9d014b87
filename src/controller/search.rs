//! Category filter and contains-all-ingredients search

use super::{IngredientSearch, RecipeController};
use crate::model::{normalize_ingredient_names, Recipe};
use crate::{Error, Result};

impl<'a> RecipeController<'a> {
    /// Recipes linked to a category with this name, ignoring case
    pub fn find_recipes_by_category(&self, category_name: &str) -> Result<Vec<Recipe>> {
        let name = category_name.trim();
        if name.is_empty() {
            return Err(Error::validation("Category name cannot be empty."));
        }
        let recipes = self.store.recipes_in_category(name)?;
        tracing::debug!(category = name, count = recipes.len(), "category search");
        Ok(recipes)
    }

    /// Recipes containing every ingredient in a comma-separated list.
    ///
    /// All names must resolve to known ingredients before the search runs;
    /// otherwise the unresolved names come back as
    /// [`IngredientSearch::MissingIngredients`].
    pub fn find_recipes_containing_all_ingredients(&self, input: &str) -> Result<IngredientSearch> {
        let names = normalize_ingredient_names(input);
        if names.is_empty() {
            return Err(Error::validation("No valid ingredients entered."));
        }

        let mut ids = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in &names {
            match self.store.find_ingredient_by_name(name)? {
                Some(ingredient) => ids.push(ingredient.id),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            tracing::debug!(?missing, "ingredient search aborted");
            return Ok(IngredientSearch::MissingIngredients { names: missing });
        }

        let recipes = self.store.recipes_with_all_ingredients(&ids)?;
        tracing::debug!(ingredients = ?names, count = recipes.len(), "ingredient search");
        Ok(IngredientSearch::Found { recipes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::pancakes;
    use crate::model::RecipeForm;
    use crate::storage::SqliteStore;

    fn recipe_with(controller: &RecipeController, name: &str, ingredients: &[&str]) -> Recipe {
        let recipe = controller
            .create_recipe(&RecipeForm::new(name, "", "1", "1", "1"))
            .unwrap();
        for ingredient in ingredients {
            controller.add_ingredient_to_recipe(recipe.id, ingredient, "1", "pcs").unwrap();
        }
        recipe
    }

    fn names(search: IngredientSearch) -> Vec<String> {
        match search {
            IngredientSearch::Found { recipes } => recipes.into_iter().map(|r| r.name).collect(),
            other => panic!("expected recipes, got {:?}", other),
        }
    }

    #[test]
    fn test_contains_all_ingredients() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        for name in ["egg", "milk", "sugar"] {
            controller.create_ingredient(name).unwrap();
        }
        recipe_with(&controller, "A", &["egg", "milk", "sugar"]);
        recipe_with(&controller, "B", &["egg"]);
        recipe_with(&controller, "C", &["egg", "milk"]);

        let found = controller.find_recipes_containing_all_ingredients("egg,milk").unwrap();
        assert_eq!(names(found), vec!["A", "C"]);

        let found = controller.find_recipes_containing_all_ingredients(" EGG , Milk, egg ").unwrap();
        assert_eq!(names(found), vec!["A", "C"]);

        let found = controller.find_recipes_containing_all_ingredients("sugar").unwrap();
        assert_eq!(names(found), vec!["A"]);
    }

    #[test]
    fn test_unknown_ingredient_is_not_an_empty_result() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        controller.create_ingredient("egg").unwrap();
        recipe_with(&controller, "Omelette", &["egg"]);

        let result = controller.find_recipes_containing_all_ingredients("nonexistent").unwrap();
        assert_eq!(
            result,
            IngredientSearch::MissingIngredients { names: vec!["nonexistent".to_string()] }
        );

        let result = controller.find_recipes_containing_all_ingredients("egg, truffle").unwrap();
        assert_eq!(
            result,
            IngredientSearch::MissingIngredients { names: vec!["truffle".to_string()] }
        );
    }

    #[test]
    fn test_known_ingredients_without_recipes() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        controller.create_ingredient("egg").unwrap();
        controller.create_ingredient("kale").unwrap();
        recipe_with(&controller, "Omelette", &["egg"]);

        let result = controller.find_recipes_containing_all_ingredients("egg, kale").unwrap();
        assert_eq!(result, IngredientSearch::Found { recipes: vec![] });
    }

    #[test]
    fn test_empty_ingredient_input() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        assert!(matches!(
            controller.find_recipes_containing_all_ingredients(" , "),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_category_search_end_to_end() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        let recipe = pancakes(&controller);
        controller.create_category("Breakfast").unwrap();
        controller.add_category_to_recipe(recipe.id, "Breakfast").unwrap();

        let found = controller.find_recipes_by_category("breakfast").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Pancakes");

        assert!(controller.find_recipes_by_category("Dinner").unwrap().is_empty());
        assert!(matches!(controller.find_recipes_by_category(""), Err(Error::Validation(_))));
    }

    #[test]
    fn test_non_ascii_names_resolve_in_searches() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        controller.create_ingredient("ÉCLAIR").unwrap();
        controller.create_ingredient("crème").unwrap();
        recipe_with(&controller, "Patisserie", &["ÉCLAIR", "CRÈME"]);

        let found = controller.find_recipes_containing_all_ingredients("ÉCLAIR").unwrap();
        assert_eq!(names(found), vec!["Patisserie"]);
        let found = controller.find_recipes_containing_all_ingredients("éclair, Crème").unwrap();
        assert_eq!(names(found), vec!["Patisserie"]);

        let recipe = pancakes(&controller);
        controller.create_category("CRÊPES").unwrap();
        controller.add_category_to_recipe(recipe.id, "crêpes").unwrap();
        let found = controller.find_recipes_by_category("Crêpes").unwrap();
        assert_eq!(found, vec![recipe]);
    }
}
