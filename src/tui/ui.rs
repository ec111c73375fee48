//! Pager drawing logic.
//!
//! Renders the diff in a bordered, scrollable pane with a one-line status
//! bar underneath.

use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::App;

/// Draws the pager frame.
///
/// The layout is split vertically:
/// - Top pane: the rendered diff with border and the file name as title
/// - Bottom line: visible row range and key hints
pub fn draw(f: &mut Frame, app: &mut App) {
    let [diff_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(f.area());

    // Inner size = pane minus the borders
    let inner_width = diff_area.width.saturating_sub(2).max(1) as usize;
    app.viewport_height = diff_area.height.saturating_sub(2);
    // Clamp against the block at the new width.
    app.block_for_width(inner_width);
    app.clamp_scroll();

    let title = format!(
        " {} ",
        app.options.filename.as_deref().unwrap_or(crate::constants::APP_NAME)
    );
    let scroll = app.scroll_offset;
    let viewport = app.viewport_height as usize;
    let block = app.block_for_width(inner_width);
    let total = block.lines.len();

    let diff_widget = Paragraph::new(block.lines.clone())
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((scroll, 0));
    f.render_widget(diff_widget, diff_area);

    let first = if total == 0 { 0 } else { scroll as usize + 1 };
    let last = (scroll as usize + viewport).min(total);
    let status = Line::from(vec![
        Span::styled(
            format!(" {}-{} of {} ", first, last, total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " ↑/↓ scroll  PgUp/PgDn page  g/G top/bottom  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(status), status_area);
}
