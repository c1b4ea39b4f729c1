use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for the parts of a load summary
#[derive(Debug, Clone)]
pub struct Theme {
    /// Banner and section titles
    pub heading: Style,
    /// Completed stages
    pub ok: Style,
    /// Failed stages
    pub failed: Style,
    /// Nonzero skipped counts and notices
    pub skipped: Style,
    /// Row labels and icons
    pub label: Style,
    /// Dump and database paths
    pub path: Style,
}

impl Theme {
    /// Plain output when stdout is not a terminal or `NO_COLOR` is set
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() || std::env::var_os("NO_COLOR").is_some() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            heading: Style::new().cyan().bold(),
            ok: Style::new().green().bold(),
            failed: Style::new().red().bold(),
            skipped: Style::new().yellow(),
            label: Style::new().dimmed(),
            path: Style::new().blue().underline(),
        }
    }

    pub fn plain() -> Self {
        Self {
            heading: Style::new(),
            ok: Style::new(),
            failed: Style::new(),
            skipped: Style::new(),
            label: Style::new(),
            path: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
