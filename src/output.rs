//! Output rendering abstraction for diffview.
//!
//! Defines the [`Renderer`] trait that decouples a rendered [`DiffBlock`]
//! from where it is shown. [`StdoutRenderer`] prints it as ANSI text; the
//! pager in [`crate::tui`] draws the same lines with ratatui instead.

use std::io::{self, Write};

use anyhow::Result;
use colored::{ColoredString, Colorize};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::render::DiffBlock;

/// Trait for presenting a rendered diff.
pub trait Renderer {
    /// Present every line of the block.
    fn render_block(&mut self, block: &DiffBlock) -> Result<()>;
}

/// Prints blocks to a writer (stdout by default), one terminal row per line.
///
/// Coloring follows `colored`'s global switch, so `--no-color`, `NO_COLOR`
/// and non-TTY output all print plain text.
pub struct StdoutRenderer<W: Write = io::Stdout> {
    out: W,
    rows_written: usize,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for StdoutRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            rows_written: 0,
        }
    }

    /// Returns the total number of rows printed.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for StdoutRenderer<W> {
    fn render_block(&mut self, block: &DiffBlock) -> Result<()> {
        for line in &block.lines {
            writeln!(self.out, "{}", ansi_line(line))?;
            self.rows_written += 1;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Convert a styled line to a string with ANSI escapes.
pub fn ansi_line(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|span| styled(&span.content, line.style.patch(span.style)).to_string())
        .collect()
}

fn styled(text: &str, style: Style) -> ColoredString {
    let mut out = text.normal();
    if let Some(fg) = style.fg.and_then(to_colored) {
        out = out.color(fg);
    }
    if let Some(bg) = style.bg.and_then(to_colored) {
        out = out.on_color(bg);
    }
    let mods = style.add_modifier;
    if mods.contains(Modifier::BOLD) {
        out = out.bold();
    }
    if mods.contains(Modifier::DIM) {
        out = out.dimmed();
    }
    if mods.contains(Modifier::ITALIC) {
        out = out.italic();
    }
    if mods.contains(Modifier::UNDERLINED) {
        out = out.underline();
    }
    out
}

/// Map a ratatui color to the closest `colored` color.
///
/// Indexed and reset colors have no counterpart and are dropped.
fn to_colored(color: Color) -> Option<colored::Color> {
    use colored::Color as C;
    let mapped = match color {
        Color::Black => C::Black,
        Color::Red => C::Red,
        Color::Green => C::Green,
        Color::Yellow => C::Yellow,
        Color::Blue => C::Blue,
        Color::Magenta => C::Magenta,
        Color::Cyan => C::Cyan,
        Color::Gray => C::White,
        Color::DarkGray => C::BrightBlack,
        Color::LightRed => C::BrightRed,
        Color::LightGreen => C::BrightGreen,
        Color::LightYellow => C::BrightYellow,
        Color::LightBlue => C::BrightBlue,
        Color::LightMagenta => C::BrightMagenta,
        Color::LightCyan => C::BrightCyan,
        Color::White => C::BrightWhite,
        Color::Rgb(r, g, b) => C::TrueColor { r, g, b },
        Color::Indexed(_) | Color::Reset => return None,
    };
    Some(mapped)
}
