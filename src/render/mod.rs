//! Diff-to-display pipeline entry point.
//!
//! [`render_diff`] turns raw unified diff text into a [`DiffBlock`] of
//! styled ratatui lines that fit the requested width and height:
//!
//! 1. empty input → "No diff content." placeholder
//! 2. parse, expand tabs
//! 3. screen-reader mode → one `"<kind>: <text>"` line per record
//! 4. no numbered lines → "No changes detected." placeholder
//! 5. entirely new file → syntax-highlighted content without gutters
//! 6. otherwise pair, insert gaps, lay out rows
//! 7. clip to the height/width budget
//!
//! Every step is pure; [`RenderCache`] reuses the previous block when the
//! inputs repeat.

mod accessible;
mod bounded;
mod cache;
pub mod highlight;
pub mod layout;
pub mod theme;

pub use cache::RenderCache;
pub use highlight::{Highlighter, PlainHighlighter, SyntectHighlighter};
pub use theme::Theme;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use tracing::debug;

use crate::constants::{
    DEFAULT_TAB_WIDTH, FALLBACK_TERMINAL_WIDTH, NO_CHANGES_DETECTED, NO_DIFF_CONTENT,
};
use crate::diff::{
    build_render_items, displayable_lines, insert_gaps, is_entirely_new_file, new_file_content,
    parse,
};

use accessible::screen_reader_lines;
use bounded::bound;
use highlight::language_for_filename;
use layout::{expand_tabs, layout_rows, wrap_lines, LayoutContext};

/// Inputs that shape a rendered block besides the diff text.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// File name used for language detection and the block key.
    pub filename: Option<String>,
    /// Spaces per tab.
    pub tab_width: usize,
    /// Row budget; `None` renders everything.
    pub max_height: Option<usize>,
    /// Column budget for every row.
    pub max_width: usize,
    /// Emit plain `"<kind>: <text>"` lines instead of the visual layout.
    pub screen_reader: bool,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            filename: None,
            tab_width: DEFAULT_TAB_WIDTH,
            max_height: None,
            max_width: FALLBACK_TERMINAL_WIDTH,
            screen_reader: false,
            theme: Theme::default(),
        }
    }
}

/// A rendered diff ready to be drawn or printed.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffBlock {
    /// Stable identifier derived from the file name and diff content.
    pub key: String,
    pub lines: Vec<Line<'static>>,
    /// Rows removed by the height budget.
    pub hidden_rows: usize,
}

impl DiffBlock {
    /// Unstyled text of every line.
    #[cfg(test)]
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.to_string()).collect()
    }
}

/// Render unified diff text as a bounded block of styled lines.
///
/// Never fails: malformed or empty input produces a placeholder.
pub fn render_diff(
    diff: &str,
    options: &RenderOptions,
    highlighter: &dyn Highlighter,
) -> DiffBlock {
    let key = block_key(diff, options.filename.as_deref());

    if diff.is_empty() {
        return placeholder(key, NO_DIFF_CONTENT, options);
    }

    let mut records = parse(diff);
    for record in &mut records {
        if record.text.contains('\t') {
            record.text = expand_tabs(&record.text, options.tab_width);
        }
    }
    debug!(records = records.len(), key = %key, "parsed diff");

    if options.screen_reader {
        if records.is_empty() {
            return placeholder(key, NO_CHANGES_DETECTED, options);
        }
        return DiffBlock {
            key,
            lines: screen_reader_lines(&records),
            hidden_rows: 0,
        };
    }

    let displayable = displayable_lines(&records);
    if displayable.is_empty() {
        return placeholder(key, NO_CHANGES_DETECTED, options);
    }

    let language = options.filename.as_deref().and_then(language_for_filename);

    let content = if is_entirely_new_file(&records) {
        debug!(?language, "rendering as new file");
        let code = new_file_content(&records);
        wrap_lines(highlighter.highlight_block(&code, language), options.max_width)
    } else {
        let items = build_render_items(&displayable);
        let rows = insert_gaps(items);
        let ctx = LayoutContext {
            max_width: options.max_width,
            language,
            theme: &options.theme,
            highlighter,
        };
        layout_rows(&rows, &displayable, &ctx)
    };

    let bounded = bound(content, options.max_height, options.max_width);
    if bounded.hidden_rows > 0 {
        debug!(hidden = bounded.hidden_rows, "diff truncated to height budget");
    }

    DiffBlock {
        key,
        lines: bounded.lines,
        hidden_rows: bounded.hidden_rows,
    }
}

fn placeholder(key: String, text: &str, options: &RenderOptions) -> DiffBlock {
    let line = Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(options.theme.placeholder),
    ));
    DiffBlock {
        key,
        lines: vec![line],
        hidden_rows: 0,
    }
}

/// Key that stays the same across renders of the same diff.
fn block_key(diff: &str, filename: Option<&str>) -> String {
    let mut hasher = DefaultHasher::new();
    diff.hash(&mut hasher);
    let hash = hasher.finish();
    match filename {
        Some(name) => format!("diff-{}-{:016x}", name, hash),
        None => format!("diff-{:016x}", hash),
    }
}

#[cfg(test)]
mod tests;
