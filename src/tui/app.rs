//! Pager state for the diff view.
//!
//! Holds the diff text, the options it is rendered with, and the scroll
//! position. Rendering goes through a [`RenderCache`] so redraws at the same
//! frame size reuse the previous block.

use crate::render::{DiffBlock, Highlighter, RenderCache, RenderOptions};

/// Core application state for the pager.
pub struct App {
    /// Raw unified diff text being shown.
    pub diff: String,
    /// Options the block is rendered with; the width follows the frame.
    pub options: RenderOptions,
    pub highlighter: Box<dyn Highlighter>,
    cache: RenderCache,
    /// Index of the first visible row.
    pub scroll_offset: u16,
    /// Rows visible in the last drawn frame.
    pub viewport_height: u16,
}

impl App {
    pub fn new(diff: String, options: RenderOptions, highlighter: Box<dyn Highlighter>) -> Self {
        Self {
            diff,
            // The pager scrolls instead of truncating.
            options: RenderOptions {
                max_height: None,
                ..options
            },
            highlighter,
            cache: RenderCache::new(),
            scroll_offset: 0,
            viewport_height: 0,
        }
    }

    /// Render (or reuse) the block for a content area `width` columns wide.
    pub fn block_for_width(&mut self, width: usize) -> &DiffBlock {
        self.options.max_width = width.max(1);
        self.cache
            .get_or_render(&self.diff, &self.options, self.highlighter.as_ref())
    }

    /// Largest valid scroll offset for the current block and viewport.
    fn max_scroll(&mut self) -> u16 {
        let width = self.options.max_width;
        let rows = self.block_for_width(width).lines.len();
        let max = rows.saturating_sub(self.viewport_height as usize);
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    /// Keep the offset inside the content after a resize.
    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Scrolls down by `lines` rows.
    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
        self.clamp_scroll();
    }

    /// Scrolls up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Rows moved by PageUp/PageDown.
    pub fn page_size(&self) -> u16 {
        if self.viewport_height == 0 {
            crate::constants::PAGE_SCROLL_LINES
        } else {
            self.viewport_height.saturating_sub(1).max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlainHighlighter;

    fn app_with_rows(n: usize) -> App {
        let body: String = (1..=n).map(|i| format!(" row {}\n", i)).collect();
        let diff = format!("@@ -1,{n} +1,{n} @@\n{body}");
        let mut app = App::new(diff, RenderOptions::default(), Box::new(PlainHighlighter));
        app.block_for_width(40);
        app.viewport_height = 10;
        app
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut app = app_with_rows(25);
        app.scroll_down(100);
        assert_eq!(app.scroll_offset, 15);
        app.scroll_up(5);
        assert_eq!(app.scroll_offset, 10);
    }

    #[test]
    fn test_top_and_bottom() {
        let mut app = app_with_rows(25);
        app.scroll_to_bottom();
        assert_eq!(app.scroll_offset, 15);
        app.scroll_to_top();
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_short_content_does_not_scroll() {
        let mut app = app_with_rows(3);
        app.scroll_down(1);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_height_budget_ignored_in_pager() {
        let options = RenderOptions {
            max_height: Some(2),
            ..Default::default()
        };
        let app = App::new(String::new(), options, Box::new(PlainHighlighter));
        assert_eq!(app.options.max_height, None);
    }
}
