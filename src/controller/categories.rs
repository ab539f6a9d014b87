//! Categories, ingredients, units and recipe ↔ category links

use super::{CreateOutcome, LinkOutcome, RecipeController, UnlinkOutcome};
use crate::model::{required_name, Category, Ingredient, Recipe, Unit};
use crate::{Error, Result};

impl<'a> RecipeController<'a> {
    pub fn list_all_categories(&self) -> Result<Vec<Category>> {
        self.store.all_categories()
    }

    pub fn list_all_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.store.all_ingredients()
    }

    pub fn list_all_units(&self) -> Result<Vec<Unit>> {
        self.store.all_units()
    }

    /// Add an ingredient unless one with the same name (ignoring case) exists
    pub fn create_ingredient(&self, name: &str) -> Result<CreateOutcome<Ingredient>> {
        let name = required_name("Ingredient", name)?;
        if let Some(existing) = self.store.find_ingredient_by_name(&name)? {
            tracing::debug!(name = %existing.name, "ingredient already exists");
            return Ok(CreateOutcome::AlreadyExists(existing));
        }
        let ingredient = self.store.insert_ingredient(&name)?;
        tracing::info!(id = ingredient.id, name = %ingredient.name, "created ingredient");
        Ok(CreateOutcome::Created(ingredient))
    }

    /// Add a category unless one with the same name (ignoring case) exists
    pub fn create_category(&self, name: &str) -> Result<CreateOutcome<Category>> {
        let name = required_name("Category", name)?;
        if let Some(existing) = self.store.find_category_by_name(&name)? {
            tracing::debug!(name = %existing.name, "category already exists");
            return Ok(CreateOutcome::AlreadyExists(existing));
        }
        let category = self.store.insert_category(&name)?;
        tracing::info!(id = category.id, name = %category.name, "created category");
        Ok(CreateOutcome::Created(category))
    }

    /// Add a unit of measure. Same duplicate handling as ingredients.
    pub fn create_unit(&self, name: &str) -> Result<CreateOutcome<Unit>> {
        let name = required_name("Unit", name)?;
        if let Some(existing) = self.store.find_unit_by_name(&name)? {
            tracing::debug!(name = %existing.name, "unit already exists");
            return Ok(CreateOutcome::AlreadyExists(existing));
        }
        let unit = self.store.insert_unit(&name)?;
        tracing::info!(id = unit.id, name = %unit.name, "created unit");
        Ok(CreateOutcome::Created(unit))
    }

    /// Link a category to a recipe. A second call for the same pair is a no-op.
    pub fn add_category_to_recipe(&self, recipe_id: i64, category_name: &str) -> Result<LinkOutcome> {
        let (recipe, category) = self.resolve_link(recipe_id, category_name)?;

        if self.store.is_category_linked(recipe.id, category.id)? {
            tracing::debug!(recipe_id, category = %category.name, "category already linked");
            return Ok(LinkOutcome::AlreadyLinked { recipe, category });
        }

        self.store.link_category(recipe.id, category.id)?;
        tracing::info!(recipe_id, category = %category.name, "linked category");
        Ok(LinkOutcome::Linked { recipe, category })
    }

    /// Unlink a category from a recipe. Unlinked pairs are reported, not rejected.
    pub fn remove_category_from_recipe(&self, recipe_id: i64, category_name: &str) -> Result<UnlinkOutcome> {
        let (recipe, category) = self.resolve_link(recipe_id, category_name)?;

        let linked = self
            .store
            .categories_for_recipe(recipe.id)?
            .into_iter()
            .find(|c| c.id == category.id);

        match linked {
            Some(category) => {
                self.store.unlink_category(recipe.id, category.id)?;
                tracing::info!(recipe_id, category = %category.name, "unlinked category");
                Ok(UnlinkOutcome::Unlinked { recipe, category })
            }
            None => Ok(UnlinkOutcome::NotLinked {
                recipe,
                category_name: category_name.trim().to_string(),
            }),
        }
    }

    fn resolve_link(&self, recipe_id: i64, category_name: &str) -> Result<(Recipe, Category)> {
        let name = required_name("Category", category_name)?;
        let recipe = self.find_recipe_by_id(recipe_id)?;
        let category = self
            .store
            .find_category_by_name(&name)?
            .ok_or_else(|| Error::not_found("category", format!("name '{}'", name)))?;
        Ok((recipe, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::pancakes;
    use crate::storage::SqliteStore;

    #[test]
    fn test_add_category_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        let recipe = pancakes(&controller);
        controller.create_category("Breakfast").unwrap();

        let first = controller.add_category_to_recipe(recipe.id, "Breakfast").unwrap();
        let second = controller.add_category_to_recipe(recipe.id, "BREAKFAST").unwrap();

        assert!(matches!(first, LinkOutcome::Linked { .. }));
        assert!(matches!(second, LinkOutcome::AlreadyLinked { .. }));
        assert_eq!(store.categories_for_recipe(recipe.id).unwrap().len(), 1);
    }

    #[test]
    fn test_add_category_missing_entities() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        let recipe = pancakes(&controller);
        controller.create_category("Dessert").unwrap();

        assert!(matches!(
            controller.add_category_to_recipe(recipe.id, "Lunch"),
            Err(Error::NotFound { entity: "category", .. })
        ));
        assert!(matches!(
            controller.add_category_to_recipe(777, "Dessert"),
            Err(Error::NotFound { entity: "recipe", .. })
        ));
        assert!(matches!(
            controller.add_category_to_recipe(recipe.id, "  "),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_remove_category() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        let recipe = pancakes(&controller);
        controller.create_category("Breakfast").unwrap();
        controller.create_category("Dessert").unwrap();
        controller.add_category_to_recipe(recipe.id, "Breakfast").unwrap();

        let outcome = controller.remove_category_from_recipe(recipe.id, "dessert").unwrap();
        assert!(matches!(outcome, UnlinkOutcome::NotLinked { .. }));
        assert_eq!(store.categories_for_recipe(recipe.id).unwrap().len(), 1);

        let outcome = controller.remove_category_from_recipe(recipe.id, "breakfast").unwrap();
        match outcome {
            UnlinkOutcome::Unlinked { category, .. } => assert_eq!(category.name, "Breakfast"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(store.categories_for_recipe(recipe.id).unwrap().is_empty());

        let again = controller.remove_category_from_recipe(recipe.id, "Breakfast").unwrap();
        assert!(matches!(again, UnlinkOutcome::NotLinked { .. }));
    }

    #[test]
    fn test_remove_unknown_category_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        let recipe = pancakes(&controller);
        controller.create_category("Breakfast").unwrap();
        controller.add_category_to_recipe(recipe.id, "Breakfast").unwrap();

        assert!(matches!(
            controller.remove_category_from_recipe(recipe.id, "Brunch"),
            Err(Error::NotFound { entity: "category", .. })
        ));
        assert!(matches!(
            controller.remove_category_from_recipe(404, "Breakfast"),
            Err(Error::NotFound { entity: "recipe", .. })
        ));
        assert_eq!(store.categories_for_recipe(recipe.id).unwrap().len(), 1);
    }

    #[test]
    fn test_create_ingredient_reports_duplicates() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);

        let first = controller.create_ingredient("  Egg ").unwrap();
        assert!(first.is_created());
        assert_eq!(first.entity().name, "Egg");

        let second = controller.create_ingredient("egg").unwrap();
        assert_eq!(second, CreateOutcome::AlreadyExists(first.entity().clone()));
        assert_eq!(controller.list_all_ingredients().unwrap().len(), 1);

        assert!(matches!(controller.create_ingredient(""), Err(Error::Validation(_))));
    }

    #[test]
    fn test_non_ascii_names_are_unique_ignoring_case() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);

        let eclair = controller.create_ingredient("ÉCLAIR").unwrap();
        assert!(eclair.is_created());
        let again = controller.create_ingredient("éclair").unwrap();
        assert_eq!(again, CreateOutcome::AlreadyExists(eclair.entity().clone()));

        controller.create_category("CRÊPES").unwrap();
        assert!(!controller.create_category("Crêpes").unwrap().is_created());
        assert_eq!(controller.list_all_categories().unwrap().len(), 1);
    }

    #[test]
    fn test_create_unit() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);
        let seeded = controller.list_all_units().unwrap().len();

        let pinch = controller.create_unit(" pinch ").unwrap();
        assert!(pinch.is_created());
        assert_eq!(pinch.entity().name, "pinch");

        assert!(!controller.create_unit("PINCH").unwrap().is_created());
        assert!(!controller.create_unit("Tbsp").unwrap().is_created());
        assert!(matches!(controller.create_unit(" "), Err(Error::Validation(_))));
        assert_eq!(controller.list_all_units().unwrap().len(), seeded + 1);

        let recipe = pancakes(&controller);
        controller.create_ingredient("salt").unwrap();
        controller.add_ingredient_to_recipe(recipe.id, "salt", "1", "Pinch").unwrap();
        assert_eq!(store.ingredient_lines(recipe.id).unwrap()[0].unit, "pinch");
    }

    #[test]
    fn test_create_category_and_list() {
        let store = SqliteStore::open_in_memory().unwrap();
        let controller = RecipeController::new(&store);

        controller.create_category("Dessert").unwrap();
        controller.create_category("Breakfast").unwrap();
        assert!(!controller.create_category("DESSERT").unwrap().is_created());

        let names: Vec<_> = controller
            .list_all_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Dessert", "Breakfast"]);
    }
}
