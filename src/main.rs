//! Recipebook CLI - interactive recipe database shell and one-shot queries

use clap::{Parser, Subcommand, ValueEnum};
use recipebook::config::{self, RecipebookConfig};
use recipebook::controller::IngredientSearch;
use recipebook::shell::Shell;
use recipebook::ui::{self, Icons};
use recipebook::{Recipe, RecipeController, SqliteStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "recipebook")]
#[command(version)]
#[command(about = "Console recipe database - recipes, categories and ingredient search")]
#[command(long_about = r#"
Recipebook keeps recipes, categories, ingredients and steps in a local SQLite
database. Run without a subcommand to open the interactive menu.

Example usage:
  recipebook init
  recipebook
  recipebook search --category breakfast
  recipebook search --ingredients "egg, milk" --format json
  recipebook stats --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu (default)
    Shell,

    /// Write a config file and create the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// List all recipes
    List {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Search recipes by category or by ingredients they all contain
    Search {
        /// Category name (case-insensitive)
        #[arg(long, conflicts_with = "ingredients", required_unless_present = "ingredients")]
        category: Option<String>,

        /// Comma-separated ingredient names; recipes must contain every one
        #[arg(long)]
        ingredients: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show row counts for every table
    Stats {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with menu output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let loaded = RecipebookConfig::load(&config::config_path(cli.config.as_deref()))?;
    let cwd = std::env::current_dir()?;
    let database = config::resolve_database_path(cli.database.as_deref(), loaded.as_ref(), &cwd);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let store = open_store(&database)?;
            let controller = RecipeController::new(&store);
            let stdin = std::io::stdin();
            let mut shell = Shell::new(controller, stdin.lock(), std::io::stdout());
            shell.run()?;
        }

        Commands::Init { force } => {
            let config_path = config::config_path(cli.config.as_deref());
            let stored_path = cli
                .database
                .clone()
                .unwrap_or_else(|| config::default_database_path(Path::new("")));
            let new_config = RecipebookConfig::for_database(&stored_path);
            new_config.save(&config_path, force)?;

            let database = config::resolve_database_path(None, Some(&new_config), &cwd);
            open_store(&database)?;

            let mut out = std::io::stdout();
            ui::success(&mut out, &format!("Wrote {}", config_path.display()))?;
            ui::info(&mut out, &format!("{} Database", Icons::DATABASE), &database.display().to_string())?;
        }

        Commands::List { format } => {
            let store = open_store(&database)?;
            let recipes = RecipeController::new(&store).list_all_recipes()?;
            print_recipes(&recipes, format, "There were no recipes found!")?;
        }

        Commands::Search { category, ingredients, format } => {
            let store = open_store(&database)?;
            let controller = RecipeController::new(&store);

            if let Some(category) = category {
                let recipes = controller.find_recipes_by_category(&category)?;
                let empty = format!("No recipes found in the '{}' category.", category.trim());
                print_recipes(&recipes, format, &empty)?;
            } else if let Some(ingredients) = ingredients {
                let result = controller.find_recipes_containing_all_ingredients(&ingredients)?;
                match (format, result) {
                    (Format::Json, result) => println!("{}", serde_json::to_string_pretty(&result)?),
                    (Format::Text, IngredientSearch::MissingIngredients { names }) => {
                        ui::warn(
                            &mut std::io::stdout(),
                            &format!("Some ingredients were not found in the database: {}", names.join(", ")),
                        )?;
                    }
                    (Format::Text, IngredientSearch::Found { recipes }) => {
                        print_recipes(&recipes, format, "No recipes found with all the specified ingredients.")?;
                    }
                }
            }
        }

        Commands::Stats { format } => {
            let store = open_store(&database)?;
            let stats = store.stats()?;

            let mut out = std::io::stdout();
            match format {
                Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?,
                Format::Text => {
                    writeln!(out, "{} Recipebook Statistics ({})", Icons::STATS, database.display())?;
                    writeln!(out, "{}", ui::stats_table(&stats.rows()))?;
                }
            }
        }
    }

    Ok(())
}

fn open_store(database: &Path) -> anyhow::Result<SqliteStore> {
    config::create_database_dir(database)?;
    tracing::debug!("opening database {}", database.display());
    Ok(SqliteStore::open(database)?)
}

fn print_recipes(recipes: &[Recipe], format: Format, empty_message: &str) -> anyhow::Result<()> {
    let mut out = std::io::stdout();
    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(recipes)?)?,
        Format::Text if recipes.is_empty() => ui::notice(&mut out, empty_message)?,
        Format::Text => writeln!(out, "{}", ui::recipes_table(recipes))?,
    }
    Ok(())
}
