use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub success: Style,
    pub warn: Style,
    pub dim: Style,
    /// Prefix lines with icons; off when stdout is not a terminal
    pub icons: bool,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            success: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
            dim: Style::new().white().dimmed(),
            icons: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warn: Style::new(),
            dim: Style::new(),
            icons: false,
        }
    }

    /// `icon` followed by a space, or nothing in plain mode
    pub fn prefix(&self, icon: &str) -> String {
        if self.icons {
            format!("{} ", icon)
        } else {
            String::new()
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
