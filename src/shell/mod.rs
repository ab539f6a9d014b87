//! Interactive numbered-menu shell
//!
//! Reads choices and arguments line by line from any `BufRead`, calls the
//! matching [`RecipeController`] operation and renders the result to any
//! `Write`. A failed command never ends the session.

mod menu;

pub use menu::{MenuCommand, MENU};

use crate::controller::{CreateOutcome, IngredientSearch, LinkOutcome, RecipeController, UnlinkOutcome, UpdateOutcome};
use crate::model::{RecipeField, RecipeForm};
use crate::ui::{self, Icons};
use crate::{Error, Result};
use std::io::{BufRead, Write};

const SEPARATOR: &str = "============== ************* ==============";

pub struct Shell<'a, R, W> {
    controller: RecipeController<'a>,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(controller: RecipeController<'a>, input: R, out: W) -> Self {
        Self { controller, input, out }
    }

    /// Consume the shell and hand back the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                tracing::debug!("input closed, leaving shell");
                break;
            };

            match MenuCommand::from_choice(&choice) {
                Some(MenuCommand::Exit) => break,
                Some(command) => self.run_command(command)?,
                None => ui::warn(&mut self.out, "Invalid selection. Try again.")?,
            }

            writeln!(self.out)?;
            writeln!(self.out, "{}", SEPARATOR)?;
        }
        ui::success(&mut self.out, "Goodbye!")?;
        Ok(())
    }

    /// Run one command, reporting its failure instead of propagating it.
    /// Only a broken input/output stream ends the session.
    fn run_command(&mut self, command: MenuCommand) -> Result<()> {
        tracing::debug!(?command, "dispatch");
        match self.dispatch(command) {
            Ok(()) => Ok(()),
            Err(Error::Io(e)) => Err(Error::Io(e)),
            Err(e) if e.is_user_facing() => Ok(ui::warn(&mut self.out, &e.to_string())?),
            Err(e) => {
                tracing::error!(error = %e, ?command, "command failed");
                Ok(ui::error(&mut self.out, &format!("Something went wrong: {}", e))?)
            }
        }
    }

    fn dispatch(&mut self, command: MenuCommand) -> Result<()> {
        match command {
            MenuCommand::ListRecipes => self.list_recipes(),
            MenuCommand::AddRecipe => self.add_recipe(),
            MenuCommand::UpdateRecipe => self.update_recipe(),
            MenuCommand::DeleteRecipe => self.delete_recipe(),
            MenuCommand::RecipesByCategory => self.recipes_by_category(),
            MenuCommand::SearchByIngredients => self.search_by_ingredients(),
            MenuCommand::AddCategoryToRecipe => self.add_category_to_recipe(),
            MenuCommand::RemoveCategoryFromRecipe => self.remove_category_from_recipe(),
            MenuCommand::AddIngredient => self.add_ingredient(),
            MenuCommand::AddCategory => self.add_category(),
            MenuCommand::AddIngredientToRecipe => self.add_ingredient_to_recipe(),
            MenuCommand::AddStepToRecipe => self.add_step_to_recipe(),
            MenuCommand::ShowRecipe => self.show_recipe(),
            MenuCommand::ListCategories => self.list_categories(),
            MenuCommand::AddUnit => self.add_unit(),
            MenuCommand::Exit => Ok(()),
        }
    }

    // ========== Input ==========

    fn print_menu(&mut self) -> Result<()> {
        ui::banner(&mut self.out, "Recipe Database App")?;
        for (key, command) in MENU {
            writeln!(self.out, "{:>3}. {}", key, command.label())?;
        }
        self.prompt_marker("Select an option")
    }

    fn prompt_marker(&mut self, label: &str) -> Result<()> {
        write!(self.out, "{}: ", label)?;
        self.out.flush()?;
        Ok(())
    }

    /// One line without its terminator, or `None` once input is exhausted
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask(&mut self, label: &str) -> Result<String> {
        self.prompt_marker(label)?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn ask_recipe_id(&mut self, label: &str) -> Result<i64> {
        let raw = self.ask(label)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| Error::validation("Invalid Recipe ID. Please enter a valid numeric ID."))
    }

    // ========== Listing ==========

    /// Print all recipes; returns false when there are none
    fn show_recipe_list(&mut self) -> Result<bool> {
        let recipes = self.controller.list_all_recipes()?;
        if recipes.is_empty() {
            ui::notice(&mut self.out, "There were no recipes found!")?;
            return Ok(false);
        }
        ui::section(&mut self.out, "Recipe list")?;
        writeln!(self.out, "{}", ui::recipes_table(&recipes))?;
        Ok(true)
    }

    fn show_category_list(&mut self) -> Result<()> {
        let categories = self.controller.list_all_categories()?;
        if categories.is_empty() {
            ui::notice(&mut self.out, "There were no categories found!")?;
            return Ok(());
        }
        ui::section(&mut self.out, "Category list")?;
        writeln!(self.out, "{}", ui::categories_table(&categories))?;
        Ok(())
    }

    fn list_recipes(&mut self) -> Result<()> {
        self.show_recipe_list().map(|_| ())
    }

    fn list_categories(&mut self) -> Result<()> {
        self.show_category_list()
    }

    fn show_recipe(&mut self) -> Result<()> {
        if !self.show_recipe_list()? {
            return Ok(());
        }
        let id = self.ask_recipe_id("Enter recipe ID to show")?;
        let details = self.controller.recipe_details(id)?;
        let recipe = &details.recipe;

        ui::section(&mut self.out, &recipe.name)?;
        for field in RecipeField::all().iter().skip(1) {
            ui::info(&mut self.out, field.label(), &recipe.field_value(*field))?;
        }
        let categories: Vec<_> = details.categories.iter().map(|c| c.name.as_str()).collect();
        ui::info(&mut self.out, "Categories", &categories.join(", "))?;

        if !details.ingredients.is_empty() {
            ui::section(&mut self.out, "Ingredients")?;
            writeln!(self.out, "{}", ui::ingredient_lines_table(&details.ingredients))?;
        }
        if !details.steps.is_empty() {
            ui::section(&mut self.out, "Steps")?;
            writeln!(self.out, "{}", ui::steps_table(&details.steps))?;
        }
        Ok(())
    }

    // ========== Recipe mutation ==========

    fn add_recipe(&mut self) -> Result<()> {
        let form = RecipeForm {
            name: self.ask("Write recipe name")?,
            description: self.ask("Write recipe description")?,
            prep_time: self.ask("Write the preparation time (in minutes)")?,
            cook_time: self.ask("Write the cook time (in minutes)")?,
            servings: self.ask("Write how many servings")?,
        };
        let recipe = self.controller.create_recipe(&form)?;
        ui::success(
            &mut self.out,
            &format!("Recipe '{}' added successfully (ID {}).", recipe.name, recipe.id),
        )?;
        Ok(())
    }

    fn update_recipe(&mut self) -> Result<()> {
        if !self.show_recipe_list()? {
            return Ok(());
        }
        let id = self.ask_recipe_id("Select Recipe to update by its ID (number)")?;
        self.controller.find_recipe_by_id(id)?;

        writeln!(self.out)?;
        writeln!(self.out, "Select the number for the option you want to update:")?;
        for (i, field) in RecipeField::all().iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, field.label())?;
        }
        let field: RecipeField = self.ask("Choose")?.parse()?;
        let value = self.ask(&format!("Enter new {}", field.label().to_lowercase()))?;

        match self.controller.update_recipe(id, field, &value)? {
            UpdateOutcome::Updated(_) => {}
            UpdateOutcome::FieldUnchanged { field, .. } => {
                ui::warn(&mut self.out, &format!("Invalid input. {} not changed.", field.label()))?;
            }
        }
        ui::success(&mut self.out, "Recipe updated successfully.")?;
        Ok(())
    }

    fn delete_recipe(&mut self) -> Result<()> {
        if !self.show_recipe_list()? {
            return Ok(());
        }
        let id = self.ask_recipe_id("Select Recipe to delete by its ID (number)")?;
        let deleted = self.controller.delete_recipe(id)?;
        ui::success(
            &mut self.out,
            &format!(
                "{} Recipe with ID {} has been deleted ({} steps removed).",
                Icons::DEL,
                deleted.recipe.id,
                deleted.steps_removed
            ),
        )?;
        Ok(())
    }

    fn add_ingredient_to_recipe(&mut self) -> Result<()> {
        if !self.show_recipe_list()? {
            return Ok(());
        }
        let id = self.ask_recipe_id("Enter recipe ID to add an ingredient to")?;
        self.controller.find_recipe_by_id(id)?;

        let ingredients = self.controller.list_all_ingredients()?;
        ui::section(&mut self.out, "Ingredient list")?;
        writeln!(self.out, "{}", ui::named_table(ingredients.iter().map(|i| (i.id, i.name.as_str()))))?;
        let ingredient = self.ask("Enter ingredient name")?;
        let quantity = self.ask("Enter quantity")?;

        let units: Vec<_> = self.controller.list_all_units()?.into_iter().map(|u| u.name).collect();
        let unit = self.ask(&format!("Enter unit ({})", units.join(", ")))?;

        let line = self.controller.add_ingredient_to_recipe(id, &ingredient, &quantity, &unit)?;
        ui::success(
            &mut self.out,
            &format!("Added {} {} of '{}' to recipe {}.", line.quantity, unit.trim(), ingredient.trim(), id),
        )?;
        Ok(())
    }

    fn add_step_to_recipe(&mut self) -> Result<()> {
        if !self.show_recipe_list()? {
            return Ok(());
        }
        let id = self.ask_recipe_id("Enter recipe ID to add a step to")?;
        self.controller.find_recipe_by_id(id)?;
        let instruction = self.ask("Enter step instruction")?;
        let step = self.controller.add_step_to_recipe(id, &instruction)?;
        ui::success(&mut self.out, &format!("Step {} added to recipe {}.", step.step_number, id))?;
        Ok(())
    }

    // ========== Categories and ingredients ==========

    fn add_category_to_recipe(&mut self) -> Result<()> {
        if !self.show_recipe_list()? {
            return Ok(());
        }
        let id = self.ask_recipe_id("Enter recipe number (id) to add a category to")?;
        self.controller.find_recipe_by_id(id)?;
        self.show_category_list()?;
        let name = self.ask("Enter the Category name to associate (e.g., Dessert)")?;

        match self.controller.add_category_to_recipe(id, &name)? {
            LinkOutcome::Linked { recipe, category } => ui::success(
                &mut self.out,
                &format!("{} Category '{}' added to recipe '{}'.", Icons::LINK, category.name, recipe.name),
            )?,
            LinkOutcome::AlreadyLinked { recipe, category } => ui::notice(
                &mut self.out,
                &format!("The recipe '{}' already belongs to the '{}' category.", recipe.name, category.name),
            )?,
        }
        Ok(())
    }

    fn remove_category_from_recipe(&mut self) -> Result<()> {
        if !self.show_recipe_list()? {
            return Ok(());
        }
        let id = self.ask_recipe_id("Enter the recipe number (ID) to remove a category from")?;
        self.controller.find_recipe_by_id(id)?;
        self.show_category_list()?;
        let name = self.ask("Enter the Category name to remove (e.g., Dessert)")?;

        match self.controller.remove_category_from_recipe(id, &name)? {
            UnlinkOutcome::Unlinked { recipe, category } => ui::success(
                &mut self.out,
                &format!("Category '{}' removed from recipe '{}'.", category.name, recipe.name),
            )?,
            UnlinkOutcome::NotLinked { recipe, category_name } => ui::notice(
                &mut self.out,
                &format!(
                    "The recipe '{}' is not associated with the category '{}'.",
                    recipe.name, category_name
                ),
            )?,
        }
        Ok(())
    }

    fn add_ingredient(&mut self) -> Result<()> {
        let name = self.ask("Enter Name of Ingredient")?;
        match self.controller.create_ingredient(&name)? {
            CreateOutcome::Created(i) => {
                ui::success(&mut self.out, &format!("Ingredient '{}' added successfully.", i.name))?
            }
            CreateOutcome::AlreadyExists(i) => {
                ui::notice(&mut self.out, &format!("Ingredient '{}' already exists.", i.name))?
            }
        }
        Ok(())
    }

    fn add_category(&mut self) -> Result<()> {
        let name = self.ask("Enter Name of Category")?;
        match self.controller.create_category(&name)? {
            CreateOutcome::Created(c) => {
                ui::success(&mut self.out, &format!("Category '{}' added successfully.", c.name))?
            }
            CreateOutcome::AlreadyExists(c) => {
                ui::notice(&mut self.out, &format!("Category '{}' already exists.", c.name))?
            }
        }
        Ok(())
    }

    fn add_unit(&mut self) -> Result<()> {
        let existing = self.controller.list_all_units()?;
        ui::section(&mut self.out, "Units")?;
        writeln!(self.out, "{}", ui::named_table(existing.iter().map(|u| (u.id, u.name.as_str()))))?;

        let name = self.ask("Enter Name of Unit")?;
        match self.controller.create_unit(&name)? {
            CreateOutcome::Created(u) => {
                ui::success(&mut self.out, &format!("Unit '{}' added successfully.", u.name))?
            }
            CreateOutcome::AlreadyExists(u) => {
                ui::notice(&mut self.out, &format!("Unit '{}' already exists.", u.name))?
            }
        }
        Ok(())
    }

    // ========== Search ==========

    fn recipes_by_category(&mut self) -> Result<()> {
        let name = self.ask("Enter category name to search recipes (e.g., Dessert, Breakfast)")?;
        let recipes = self.controller.find_recipes_by_category(&name)?;
        let name = name.trim();
        if recipes.is_empty() {
            ui::notice(&mut self.out, &format!("No recipes found in the '{}' category.", name))?;
            return Ok(());
        }
        ui::section(&mut self.out, &format!("Recipes in the '{}' category", name))?;
        writeln!(self.out, "{}", ui::recipes_table(&recipes))?;
        Ok(())
    }

    fn search_by_ingredients(&mut self) -> Result<()> {
        let input = self.ask("Enter ingredient names separated by commas (e.g., egg, milk, sugar)")?;
        match self.controller.find_recipes_containing_all_ingredients(&input)? {
            IngredientSearch::MissingIngredients { names } => ui::warn(
                &mut self.out,
                &format!("Some ingredients were not found in the database: {}", names.join(", ")),
            )?,
            IngredientSearch::Found { recipes } if recipes.is_empty() => ui::notice(
                &mut self.out,
                &format!("{} No recipes found with all the specified ingredients.", Icons::EMPTY),
            )?,
            IngredientSearch::Found { recipes } => {
                ui::section(&mut self.out, &format!("{} Recipes containing all specified ingredients", Icons::SEARCH))?;
                writeln!(self.out, "{}", ui::recipes_table(&recipes))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;
    use std::io::Cursor;

    fn run_script(store: &SqliteStore, script: &str) -> String {
        let controller = RecipeController::new(store);
        let mut shell = Shell::new(controller, Cursor::new(script.to_string()), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn test_exit_and_invalid_selection() {
        let store = SqliteStore::open_in_memory().unwrap();
        let output = run_script(&store, "42\n0\n");
        assert!(output.contains("Invalid selection. Try again."));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_leaves_shell() {
        let store = SqliteStore::open_in_memory().unwrap();
        let output = run_script(&store, "1\n");
        assert!(output.contains("There were no recipes found!"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_add_recipe_then_list() {
        let store = SqliteStore::open_in_memory().unwrap();
        let output = run_script(&store, "2\nPancakes\nFluffy\n10\n15\n4\n1\n0\n");
        assert!(output.contains("Recipe 'Pancakes' added successfully (ID 1)."));
        assert!(output.contains("Fluffy"));
        assert_eq!(store.count_recipes().unwrap(), 1);
    }

    #[test]
    fn test_invalid_recipe_input_keeps_session_alive() {
        let store = SqliteStore::open_in_memory().unwrap();
        let output = run_script(&store, "2\nSoup\n\nten\n5\n2\n1\n0\n");
        assert!(output.contains("Prep time must be a whole number"));
        assert!(output.contains("There were no recipes found!"));
    }

    #[test]
    fn test_update_quirk_reports_success() {
        let store = SqliteStore::open_in_memory().unwrap();
        let output = run_script(&store, "2\nPancakes\n\n10\n15\n4\n3\n1\n4\nnot-a-number\n0\n");
        assert!(output.contains("Invalid input. Cook time not changed."));
        assert!(output.contains("Recipe updated successfully."));
        assert_eq!(store.get_recipe(1).unwrap().unwrap().cook_time, Some(15));
    }

    #[test]
    fn test_add_unit_messages() {
        let store = SqliteStore::open_in_memory().unwrap();
        let output = run_script(&store, "15\npinch\n15\nPINCH\n15\nTbsp\n0\n");
        assert!(output.contains("Unit 'pinch' added successfully."));
        assert!(output.contains("Unit 'pinch' already exists."));
        assert!(output.contains("Unit 'tbsp' already exists."));
        assert!(store.find_unit_by_name("Pinch").unwrap().is_some());
    }

    #[test]
    fn test_storage_failure_keeps_session_alive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.db");
        let store = SqliteStore::open(&path).unwrap();
        crate::controller::test_support::pancakes(&RecipeController::new(&store));

        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("DROP TABLE step")
            .unwrap();

        let output = run_script(&store, "12\n1\nMix the batter\n9\nEgg\n0\n");
        let failure = output.find("Something went wrong:").expect("storage error reported");
        assert!(output[failure..].contains("no such table"));
        assert!(output[failure..].contains("Ingredient 'Egg' added successfully."));
    }

    #[test]
    fn test_missing_recipe_reported() {
        let store = SqliteStore::open_in_memory().unwrap();
        let output = run_script(&store, "2\nPancakes\n\n1\n1\n1\n4\n99\n4\nabc\n0\n");
        assert!(output.contains("No recipe found with ID 99"));
        assert!(output.contains("Invalid Recipe ID."));
    }

    #[test]
    fn test_category_link_messages() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_category("Breakfast").unwrap();
        let script = "2\nPancakes\n\n10\n15\n4\n\
                      7\n1\nbreakfast\n\
                      7\n1\nBreakfast\n\
                      5\nBREAKFAST\n\
                      8\n1\nDessert\n\
                      0\n";
        let output = run_script(&store, script);
        assert!(output.contains("Category 'Breakfast' added to recipe 'Pancakes'."));
        assert!(output.contains("The recipe 'Pancakes' already belongs to the 'Breakfast' category."));
        assert!(output.contains("Recipes in the 'BREAKFAST' category"));
        assert!(output.contains("No category found with name 'Dessert'"));
        assert_eq!(store.categories_for_recipe(1).unwrap().len(), 1);
    }

    #[test]
    fn test_ingredient_search_messages() {
        let store = SqliteStore::open_in_memory().unwrap();
        let script = "2\nOmelette\n\n5\n5\n1\n\
                      9\negg\n\
                      9\nEGG\n\
                      11\n1\negg\n2\npcs\n\
                      6\negg\n\
                      6\negg, caviar\n\
                      0\n";
        let output = run_script(&store, script);
        assert!(output.contains("Ingredient 'egg' added successfully."));
        assert!(output.contains("Ingredient 'egg' already exists."));
        assert!(output.contains("Added 2.00 pcs of 'egg' to recipe 1."));
        assert!(output.contains("Recipes containing all specified ingredients"));
        assert!(output.contains("Some ingredients were not found in the database: caviar"));
    }
}
