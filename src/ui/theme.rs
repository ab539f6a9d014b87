//! Colour roles for shell and CLI output

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// One style per kind of message the menu prints
#[derive(Debug, Clone)]
pub struct Theme {
    /// Menu banner and section titles
    pub title: Style,
    /// Completed mutations ("Recipe updated successfully.")
    pub done: Style,
    /// Storage failures
    pub failure: Style,
    /// Rejected input and not-found lookups
    pub caution: Style,
    /// Icon of a named outcome such as "already exists"
    pub outcome: Style,
    /// Left-hand label of a label/value line
    pub label: Style,
}

impl Theme {
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self::for_terminal(console::Term::stdout().is_term() && !no_color)
    }

    pub fn for_terminal(colored: bool) -> Self {
        if !colored {
            let plain = Style::new();
            return Self {
                title: plain.clone(),
                done: plain.clone(),
                failure: plain.clone(),
                caution: plain.clone(),
                outcome: plain.clone(),
                label: plain,
            };
        }
        Self {
            title: Style::new().cyan().bold(),
            done: Style::new().green().bold(),
            failure: Style::new().red().bold(),
            caution: Style::new().yellow().bold(),
            outcome: Style::new().magenta(),
            label: Style::new().white().dimmed(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
