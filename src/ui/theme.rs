use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for CLI status lines and request banners
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    /// Banner of a read request
    pub read: Style,
    /// Banner of a mutation, which also writes a table
    pub mutation: Style,
}

/// Whether colors are used, given `NO_COLOR`, `CLICOLOR_FORCE` and the terminal
pub fn use_color(no_color: Option<&str>, force: Option<&str>, is_term: bool) -> bool {
    let set = |v: Option<&str>| v.is_some_and(|v| !v.is_empty() && v != "0");
    if set(no_color) {
        return false;
    }
    set(force) || is_term
}

impl Theme {
    pub fn detect() -> Self {
        let no_color = std::env::var("NO_COLOR").ok();
        let force = std::env::var("CLICOLOR_FORCE").ok();
        let is_term = console::Term::stdout().is_term();

        if use_color(no_color.as_deref(), force.as_deref(), is_term) {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().yellow().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().bright_yellow(),
            info: Style::new().cyan(),
            dim: Style::new().white().dimmed(),
            read: Style::new().bright_cyan().bold(),
            mutation: Style::new().bright_magenta().bold(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            read: Style::new(),
            mutation: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
