//! Colors used by the diff view.

use std::str::FromStr;

use ratatui::style::Color;
use tracing::warn;

use crate::config::ThemeConfig;

/// Palette for diff rows, gutters and notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Background of an added row.
    pub added_bg: Color,
    /// Background of a removed row.
    pub removed_bg: Color,
    /// Foreground of added text and the `+` marker.
    pub added_fg: Color,
    /// Foreground of removed text and the `-` marker.
    pub removed_fg: Color,
    /// Background of the words that changed inside an added row.
    pub highlight_added_bg: Color,
    /// Background of the words that changed inside a removed row.
    pub highlight_removed_bg: Color,
    pub gutter: Color,
    pub gap: Color,
    pub placeholder: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            added_bg: Color::Rgb(0x12, 0x33, 0x1d),
            removed_bg: Color::Rgb(0x3f, 0x16, 0x18),
            added_fg: Color::Green,
            removed_fg: Color::Red,
            highlight_added_bg: Color::Rgb(0x1f, 0x6b, 0x35),
            highlight_removed_bg: Color::Rgb(0x8c, 0x25, 0x2b),
            gutter: Color::DarkGray,
            gap: Color::DarkGray,
            placeholder: Color::Yellow,
        }
    }
}

impl Theme {
    /// Default palette with every color named in `config` replaced.
    ///
    /// Values use ratatui's color syntax (`"green"`, `"#22863a"`, `"42"`).
    /// Unparseable values are logged and ignored.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();
        let fields: [(&str, &Option<String>, &mut Color); 9] = [
            ("added_bg", &config.added_bg, &mut theme.added_bg),
            ("removed_bg", &config.removed_bg, &mut theme.removed_bg),
            ("added_fg", &config.added_fg, &mut theme.added_fg),
            ("removed_fg", &config.removed_fg, &mut theme.removed_fg),
            (
                "highlight_added_bg",
                &config.highlight_added_bg,
                &mut theme.highlight_added_bg,
            ),
            (
                "highlight_removed_bg",
                &config.highlight_removed_bg,
                &mut theme.highlight_removed_bg,
            ),
            ("gutter", &config.gutter, &mut theme.gutter),
            ("gap", &config.gap, &mut theme.gap),
            ("placeholder", &config.placeholder, &mut theme.placeholder),
        ];

        for (name, value, slot) in fields {
            let Some(value) = value else { continue };
            match Color::from_str(value) {
                Ok(color) => *slot = color,
                Err(_) => warn!(field = name, value = %value, "ignoring invalid theme color"),
            }
        }
        theme
    }
}
