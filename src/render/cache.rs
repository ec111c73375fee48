use tracing::trace;

use super::{render_diff, DiffBlock, Highlighter, RenderOptions};

/// Remembers the last rendered block and its inputs.
///
/// The pager redraws every tick; rendering only reruns when the diff text or
/// the options (usually the frame size) change. A cache must be used with a
/// single highlighter, since the highlighter is not part of the key.
#[derive(Debug, Default)]
pub struct RenderCache {
    last: Option<(String, RenderOptions, DiffBlock)>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached block for these inputs, rendering it if needed.
    pub fn get_or_render(
        &mut self,
        diff: &str,
        options: &RenderOptions,
        highlighter: &dyn Highlighter,
    ) -> &DiffBlock {
        let hit = matches!(
            &self.last,
            Some((cached_diff, cached_options, _))
                if cached_diff == diff && cached_options == options
        );
        if !hit {
            trace!(width = options.max_width, height = ?options.max_height, "render cache miss");
            self.last = None;
        }
        let (_, _, block) = self.last.get_or_insert_with(|| {
            let block = render_diff(diff, options, highlighter);
            (diff.to_string(), options.clone(), block)
        });
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlainHighlighter;
    use std::cell::Cell;

    struct CountingHighlighter {
        calls: Cell<usize>,
    }

    impl Highlighter for CountingHighlighter {
        fn colorize_line(
            &self,
            text: &str,
            language: Option<&str>,
        ) -> Vec<ratatui::text::Span<'static>> {
            self.calls.set(self.calls.get() + 1);
            PlainHighlighter.colorize_line(text, language)
        }
    }

    const DIFF: &str = "@@ -1,2 +1,2 @@\n a\n b\n";

    #[test]
    fn test_same_inputs_hit_cache() {
        let highlighter = CountingHighlighter { calls: Cell::new(0) };
        let mut cache = RenderCache::new();
        let options = RenderOptions::default();

        let first = cache.get_or_render(DIFF, &options, &highlighter).clone();
        let calls = highlighter.calls.get();
        let second = cache.get_or_render(DIFF, &options, &highlighter).clone();

        assert_eq!(first, second);
        assert_eq!(highlighter.calls.get(), calls);
    }

    #[test]
    fn test_changed_width_rerenders() {
        let highlighter = CountingHighlighter { calls: Cell::new(0) };
        let mut cache = RenderCache::new();
        let mut options = RenderOptions::default();

        cache.get_or_render(DIFF, &options, &highlighter);
        let calls = highlighter.calls.get();
        options.max_width = 20;
        cache.get_or_render(DIFF, &options, &highlighter);

        assert!(highlighter.calls.get() > calls);
    }

    #[test]
    fn test_new_diff_replaces_cached_block() {
        let highlighter = CountingHighlighter { calls: Cell::new(0) };
        let mut cache = RenderCache::new();
        let options = RenderOptions::default();
        let other = "@@ -4 +4 @@\n c\n";

        let first = cache.get_or_render(DIFF, &options, &highlighter).clone();
        let second = cache.get_or_render(other, &options, &highlighter).clone();
        let calls = highlighter.calls.get();
        let again = cache.get_or_render(other, &options, &highlighter).clone();

        assert_ne!(first.key, second.key);
        assert_eq!(second, again);
        assert_eq!(highlighter.calls.get(), calls);
        assert_eq!(second, render_diff(other, &options, &PlainHighlighter));
    }

    #[test]
    fn test_cached_block_matches_direct_render() {
        let mut cache = RenderCache::new();
        let options = RenderOptions::default();
        let cached = cache.get_or_render(DIFF, &options, &PlainHighlighter).clone();
        assert_eq!(cached, render_diff(DIFF, &options, &PlainHighlighter));
    }
}
