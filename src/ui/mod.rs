pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{banner, error, info, notice, section, success, warn};
pub use table::{categories_table, ingredient_lines_table, named_table, recipes_table, stats_table, steps_table};
pub use theme::{theme, Theme};
