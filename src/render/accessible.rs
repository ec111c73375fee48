use ratatui::text::Line;

use crate::diff::DiffLine;

/// Plain `"<kind>: <text>"` lines for screen readers, one per record.
pub fn screen_reader_lines(lines: &[DiffLine]) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|line| Line::raw(format!("{}: {}", line.kind.label(), line.text)))
        .collect()
}
