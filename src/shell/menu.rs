//! Menu entries and the choice → command table

/// Every action offered by the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    ListRecipes,
    AddRecipe,
    UpdateRecipe,
    DeleteRecipe,
    RecipesByCategory,
    SearchByIngredients,
    AddCategoryToRecipe,
    RemoveCategoryFromRecipe,
    AddIngredient,
    AddCategory,
    AddIngredientToRecipe,
    AddStepToRecipe,
    ShowRecipe,
    ListCategories,
    AddUnit,
    Exit,
}

/// Menu order and the key the user types for each entry
pub const MENU: &[(&str, MenuCommand)] = &[
    ("1", MenuCommand::ListRecipes),
    ("2", MenuCommand::AddRecipe),
    ("3", MenuCommand::UpdateRecipe),
    ("4", MenuCommand::DeleteRecipe),
    ("5", MenuCommand::RecipesByCategory),
    ("6", MenuCommand::SearchByIngredients),
    ("7", MenuCommand::AddCategoryToRecipe),
    ("8", MenuCommand::RemoveCategoryFromRecipe),
    ("9", MenuCommand::AddIngredient),
    ("10", MenuCommand::AddCategory),
    ("11", MenuCommand::AddIngredientToRecipe),
    ("12", MenuCommand::AddStepToRecipe),
    ("13", MenuCommand::ShowRecipe),
    ("14", MenuCommand::ListCategories),
    ("15", MenuCommand::AddUnit),
    ("0", MenuCommand::Exit),
];

impl MenuCommand {
    pub fn from_choice(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        MENU.iter().find(|(key, _)| *key == choice).map(|(_, command)| *command)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuCommand::ListRecipes => "List All Recipes",
            MenuCommand::AddRecipe => "Add New Recipe",
            MenuCommand::UpdateRecipe => "Update Recipe",
            MenuCommand::DeleteRecipe => "Delete Recipe",
            MenuCommand::RecipesByCategory => "Fetch Recipes by Category",
            MenuCommand::SearchByIngredients => "Search Recipes by Ingredients",
            MenuCommand::AddCategoryToRecipe => "Add Category to Recipe",
            MenuCommand::RemoveCategoryFromRecipe => "Remove Category from Recipe",
            MenuCommand::AddIngredient => "Add New Ingredient",
            MenuCommand::AddCategory => "Add New Category",
            MenuCommand::AddIngredientToRecipe => "Add Ingredient to Recipe",
            MenuCommand::AddStepToRecipe => "Add Step to Recipe",
            MenuCommand::ShowRecipe => "Show Recipe Details",
            MenuCommand::ListCategories => "List All Categories",
            MenuCommand::AddUnit => "Add New Unit",
            MenuCommand::Exit => "Exit",
        }
    }
}
