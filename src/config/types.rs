//! Struct definitions for diffview configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for diffview, deserialized from `config.toml`.
///
/// Every field is optional so project files can override only what they
/// set; defaults are applied by the accessors in `resolve.rs`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Spaces per tab in rendered lines.
    #[serde(default)]
    pub tab_width: Option<usize>,
    /// Maximum rows of a printed diff. Unlimited when absent.
    #[serde(default)]
    pub max_height: Option<usize>,
    /// Name of the syntect theme used for syntax coloring.
    #[serde(default)]
    pub syntax_theme: Option<String>,
    /// Render plain `"<kind>: <text>"` lines for screen readers.
    #[serde(default)]
    pub screen_reader: Option<bool>,
    /// Emit ANSI colors on stdout.
    #[serde(default)]
    pub color: Option<bool>,
    /// Diff palette overrides.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Color overrides for the diff palette.
///
/// Values use ratatui's color syntax: a name (`"green"`), a hex string
/// (`"#22863a"`) or an ANSI index (`"34"`).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ThemeConfig {
    pub added_bg: Option<String>,
    pub removed_bg: Option<String>,
    pub added_fg: Option<String>,
    pub removed_fg: Option<String>,
    pub highlight_added_bg: Option<String>,
    pub highlight_removed_bg: Option<String>,
    pub gutter: Option<String>,
    pub gap: Option<String>,
    pub placeholder: Option<String>,
}

impl ThemeConfig {
    /// Field-wise merge; values from `over` win.
    pub(super) fn merge(base: ThemeConfig, over: ThemeConfig) -> ThemeConfig {
        ThemeConfig {
            added_bg: over.added_bg.or(base.added_bg),
            removed_bg: over.removed_bg.or(base.removed_bg),
            added_fg: over.added_fg.or(base.added_fg),
            removed_fg: over.removed_fg.or(base.removed_fg),
            highlight_added_bg: over.highlight_added_bg.or(base.highlight_added_bg),
            highlight_removed_bg: over.highlight_removed_bg.or(base.highlight_removed_bg),
            gutter: over.gutter.or(base.gutter),
            gap: over.gap.or(base.gap),
            placeholder: over.placeholder.or(base.placeholder),
        }
    }
}
