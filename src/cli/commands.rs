//! Handlers for the diff-producing subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::ViewArgs;
use crate::config::Config;
use crate::constants::FALLBACK_TERMINAL_WIDTH;
use crate::diff::{self, generate};
use crate::input::{self, Source};
use crate::output::{Renderer, StdoutRenderer};
use crate::render::{self, Highlighter, PlainHighlighter, RenderOptions, SyntectHighlighter};

/// `diffview show`: render a diff read from a file or stdin.
pub(crate) async fn show(input: Option<&Path>, view: &ViewArgs, config: &Config) -> Result<()> {
    let text = Source::from_arg(input).read()?;
    let filename = view.filename.clone().or_else(|| diff::target_filename(&text));
    present(&text, filename, view, config).await
}

/// `diffview compare`: diff two files with `similar` and render the result.
///
/// A missing `old` file renders `new` as a newly created file.
pub(crate) async fn compare(old: &Path, new: &Path, view: &ViewArgs, config: &Config) -> Result<()> {
    let new_text = input::read_file(new)?;
    let name = new.display().to_string();
    let text = match input::read_optional(old)? {
        Some(old_text) => generate::unified_diff(&old_text, &new_text, &name),
        None => {
            debug!(path = ?old, "old file missing, rendering as new file");
            generate::new_file_diff(&new_text, &name)
        }
    };
    let filename = view.filename.clone().or(Some(name));
    present(&text, filename, view, config).await
}

/// `diffview parse`: dump the parsed records and the rebuilt first hunk header.
pub(crate) fn parse(input: Option<&Path>) -> Result<()> {
    let text = Source::from_arg(input).read()?;
    let records = diff::parse(&text);
    let report = serde_json::json!({
        "filename": diff::target_filename(&text),
        "first_hunk": diff::format_hunk_header(&records),
        "new_file": diff::is_entirely_new_file(&records),
        "records": records,
    });
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize records")?;
    println!("{}", json);
    Ok(())
}

async fn present(
    text: &str,
    filename: Option<String>,
    view: &ViewArgs,
    config: &Config,
) -> Result<()> {
    let color = !view.no_color && config.color_enabled();
    if !color {
        colored::control::set_override(false);
    }
    let highlighter: Box<dyn Highlighter> = if color {
        Box::new(SyntectHighlighter::new(config.syntax_theme()))
    } else {
        Box::new(PlainHighlighter)
    };
    let options = render_options(view, config, filename);

    if view.tui {
        return crate::tui::run_pager(text.to_string(), options, highlighter).await;
    }

    let block = render::render_diff(text, &options, highlighter.as_ref());
    let mut renderer = StdoutRenderer::new();
    renderer.render_block(&block)?;
    debug!(rows = renderer.rows_written(), key = %block.key, "printed diff");
    Ok(())
}

/// Combine flags, config and terminal size into render options.
pub(crate) fn render_options(
    view: &ViewArgs,
    config: &Config,
    filename: Option<String>,
) -> RenderOptions {
    RenderOptions {
        filename,
        tab_width: view.tab_width.unwrap_or_else(|| config.tab_width()),
        max_height: view.height.or(config.max_height),
        max_width: view.width.unwrap_or_else(terminal_width),
        screen_reader: view.screen_reader || config.screen_reader(),
        theme: config.theme(),
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
        .max(1) // prevent a zero-width layout
}
