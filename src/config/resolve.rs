//! Environment overrides and defaulted accessors.

use tracing::warn;

use super::types::Config;
use crate::constants::{DEFAULT_SYNTAX_THEME, DEFAULT_TAB_WIDTH, ENV_SCREEN_READER, ENV_TAB_WIDTH};
use crate::render::Theme;

impl Config {
    /// Apply `DIFFVIEW_*` environment variables over file values.
    pub(super) fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable source. Unparseable values are ignored.
    pub(super) fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_SCREEN_READER) {
            self.screen_reader = Some(is_truthy(&value));
        }
        if let Some(value) = lookup(ENV_TAB_WIDTH) {
            match value.trim().parse::<usize>() {
                Ok(width) => self.tab_width = Some(width),
                Err(_) => warn!(var = ENV_TAB_WIDTH, value = %value, "ignoring invalid tab width"),
            }
        }
    }

    /// Spaces per tab.
    pub fn tab_width(&self) -> usize {
        self.tab_width.unwrap_or(DEFAULT_TAB_WIDTH)
    }

    /// Whether screen-reader output is enabled.
    pub fn screen_reader(&self) -> bool {
        self.screen_reader.unwrap_or(false)
    }

    /// Whether ANSI colors are wanted on stdout.
    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }

    /// Syntect theme name.
    pub fn syntax_theme(&self) -> &str {
        self.syntax_theme.as_deref().unwrap_or(DEFAULT_SYNTAX_THEME)
    }

    /// Diff palette with the configured overrides applied.
    pub fn theme(&self) -> Theme {
        Theme::from_config(&self.theme)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
