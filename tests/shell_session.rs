// End-to-end sessions against a database file on disk

use recipebook::controller::IngredientSearch;
use recipebook::shell::Shell;
use recipebook::{RecipeController, SqliteStore};
use std::io::Cursor;
use std::path::Path;

fn run_session(db: &Path, script: &str) -> String {
    let store = SqliteStore::open(db).unwrap();
    let controller = RecipeController::new(&store);
    let mut shell = Shell::new(controller, Cursor::new(script.to_string()), Vec::new());
    shell.run().unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}

#[test]
fn test_breakfast_scenario_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("recipes.db");

    // Given: a category exists
    let output = run_session(&db, "10\nBreakfast\n0\n");
    assert!(output.contains("Category 'Breakfast' added successfully."));

    // When: Pancakes is created and linked to it in a second session
    let script = "2\nPancakes\nSunday classic\n10\n15\n4\n\
                  7\n1\nBreakfast\n\
                  0\n";
    run_session(&db, script);

    // Then: a third session finds it with a lower-case category search
    let output = run_session(&db, "5\nbreakfast\n0\n");
    assert!(output.contains("Pancakes"));

    // And: the stored fields equal the input
    let store = SqliteStore::open(&db).unwrap();
    let controller = RecipeController::new(&store);
    let recipe = controller.find_recipe_by_id(1).unwrap();
    assert_eq!(recipe.description.as_deref(), Some("Sunday classic"));
    assert_eq!((recipe.prep_time, recipe.cook_time, recipe.servings), (Some(10), Some(15), Some(4)));
}

#[test]
fn test_delete_removes_recipe_and_steps() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("recipes.db");

    let script = "2\nStew\n\n20\n90\n6\n\
                  12\n1\nBrown the meat\n\
                  12\n1\nSimmer for an hour\n\
                  13\n1\n\
                  4\n1\n\
                  0\n";
    let output = run_session(&db, script);

    assert!(output.contains("Step 2 added to recipe 1."));
    assert!(output.contains("Simmer for an hour"));
    assert!(output.contains("Recipe with ID 1 has been deleted (2 steps removed)."));

    let store = SqliteStore::open(&db).unwrap();
    assert_eq!(store.stats().unwrap().steps, 0);
    assert!(store.get_recipe(1).unwrap().is_none());
}

#[test]
fn test_subset_search_over_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("recipes.db");

    let script = "9\negg\n9\nmilk\n9\nsugar\n\
                  2\nA\n\n1\n1\n1\n2\nB\n\n1\n1\n1\n2\nC\n\n1\n1\n1\n\
                  11\n1\negg\n2\npcs\n11\n1\nmilk\n100\nml\n11\n1\nsugar\n1.5\ntbsp\n\
                  11\n2\negg\n1\npcs\n\
                  11\n3\negg\n3\npcs\n11\n3\nmilk\n0.25\nl\n\
                  0\n";
    run_session(&db, script);

    let store = SqliteStore::open(&db).unwrap();
    let controller = RecipeController::new(&store);
    let result = controller.find_recipes_containing_all_ingredients("egg, milk").unwrap();
    let names: Vec<String> = match result {
        IngredientSearch::Found { recipes } => recipes.into_iter().map(|r| r.name).collect(),
        other => panic!("unexpected search result: {:?}", other),
    };
    assert_eq!(names, vec!["A", "C"]);

    let details = controller.recipe_details(1).unwrap();
    let sugar = details.ingredients.iter().find(|l| l.ingredient == "sugar").unwrap();
    assert_eq!(sugar.quantity.to_string(), "1.50");
    assert_eq!(sugar.unit, "tbsp");
}
