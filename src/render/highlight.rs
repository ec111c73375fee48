//! Syntax coloring for diff rows and new-file content.
//!
//! The renderer only depends on the [`Highlighter`] trait.
//! [`SyntectHighlighter`] is the real implementation; [`PlainHighlighter`]
//! leaves text uncolored (used for `--no-color` and in tests).

use std::path::Path;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::{debug, warn};

use crate::constants::DEFAULT_SYNTAX_THEME;

/// Map a file extension to the language name handed to the highlighter.
///
/// Unknown extensions return `None`, which disables coloring.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "js" => Some("javascript"),
        "ts" => Some("typescript"),
        "py" => Some("python"),
        "json" => Some("json"),
        "css" => Some("css"),
        "html" => Some("html"),
        "sh" => Some("bash"),
        "md" => Some("markdown"),
        "yaml" | "yml" => Some("yaml"),
        "txt" => Some("plaintext"),
        "java" => Some("java"),
        "c" => Some("c"),
        "cpp" => Some("cpp"),
        "rb" => Some("ruby"),
        _ => None,
    }
}

/// Language of a file name, derived from its extension.
pub fn language_for_filename(filename: &str) -> Option<&'static str> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(language_for_extension)
}

/// Turns code into styled spans.
pub trait Highlighter {
    /// Color a single line without context from surrounding lines.
    fn colorize_line(&self, text: &str, language: Option<&str>) -> Vec<Span<'static>>;

    /// Color a whole block, one [`Line`] per `\n`-separated segment.
    ///
    /// Blank segments are kept, including a trailing one, so every source
    /// line maps to exactly one output line.
    fn highlight_block(&self, code: &str, language: Option<&str>) -> Vec<Line<'static>> {
        code.split('\n')
            .map(|line| Line::from(self.colorize_line(line, language)))
            .collect()
    }
}

/// Highlighter that never applies styles.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn colorize_line(&self, text: &str, _language: Option<&str>) -> Vec<Span<'static>> {
        vec![Span::raw(text.to_string())]
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_nonewlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// [`Highlighter`] backed by syntect's bundled syntaxes and themes.
pub struct SyntectHighlighter {
    theme: Option<&'static Theme>,
}

impl SyntectHighlighter {
    /// Create a highlighter using the named syntect theme.
    ///
    /// Falls back to the default theme, then to any bundled theme, when the
    /// name is unknown. With no themes at all, text is left uncolored.
    pub fn new(theme_name: &str) -> Self {
        let themes = &theme_set().themes;
        let theme = themes.get(theme_name).or_else(|| {
            warn!(theme = theme_name, "unknown syntax theme, using default");
            themes
                .get(DEFAULT_SYNTAX_THEME)
                .or_else(|| themes.values().next())
        });
        Self { theme }
    }

    fn syntax_for(&self, language: Option<&str>) -> Option<&'static SyntaxReference> {
        let language = language?;
        let set = syntax_set();
        let syntax = set
            .find_syntax_by_token(language)
            .or_else(|| set.find_syntax_by_extension(language));
        if syntax.is_none() {
            debug!(language, "no syntax definition for language");
        }
        syntax
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_SYNTAX_THEME)
    }
}

impl Highlighter for SyntectHighlighter {
    fn colorize_line(&self, text: &str, language: Option<&str>) -> Vec<Span<'static>> {
        let (Some(theme), Some(syntax)) = (self.theme, self.syntax_for(language)) else {
            return vec![Span::raw(text.to_string())];
        };
        let mut highlighter = HighlightLines::new(syntax, theme);
        highlight_with(&mut highlighter, text)
    }

    fn highlight_block(&self, code: &str, language: Option<&str>) -> Vec<Line<'static>> {
        let (Some(theme), Some(syntax)) = (self.theme, self.syntax_for(language)) else {
            return code.split('\n').map(|l| Line::raw(l.to_string())).collect();
        };
        // One highlighter for the whole block so multi-line constructs keep state.
        let mut highlighter = HighlightLines::new(syntax, theme);
        code.split('\n')
            .map(|line| Line::from(highlight_with(&mut highlighter, line)))
            .collect()
    }
}

fn highlight_with(highlighter: &mut HighlightLines<'_>, text: &str) -> Vec<Span<'static>> {
    if text.is_empty() {
        return Vec::new();
    }
    match highlighter.highlight_line(text, syntax_set()) {
        Ok(ranges) => ranges
            .into_iter()
            .map(|(style, piece)| Span::styled(piece.to_string(), convert_style(style)))
            .collect(),
        Err(err) => {
            debug!(%err, "syntax highlighting failed, leaving line plain");
            vec![Span::raw(text.to_string())]
        }
    }
}

/// Convert a syntect style to a ratatui style, foreground and font only.
/// Backgrounds are left to the diff row.
fn convert_style(style: SyntectStyle) -> Style {
    let mut out = Style::default();
    let fg = style.foreground;
    if fg.a != 0 {
        out = out.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}
