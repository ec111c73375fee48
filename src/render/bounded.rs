//! Fits rendered lines into a height/width budget.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Lines that fit the budget plus how many rows were cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounded {
    pub lines: Vec<Line<'static>>,
    pub hidden_rows: usize,
}

/// Clip every line to `max_width` columns and keep at most `max_height` rows.
///
/// Overflow is removed from the top so the end of the content stays
/// visible; the first kept row is replaced by a notice counting the hidden
/// rows. The notice itself counts against the height budget.
pub fn bound(lines: Vec<Line<'static>>, max_height: Option<usize>, max_width: usize) -> Bounded {
    let mut lines: Vec<Line<'static>> = lines
        .into_iter()
        .map(|line| clip_line(line, max_width))
        .collect();

    let Some(max_height) = max_height else {
        return Bounded {
            lines,
            hidden_rows: 0,
        };
    };
    if lines.len() <= max_height {
        return Bounded {
            lines,
            hidden_rows: 0,
        };
    }
    if max_height == 0 {
        let hidden_rows = lines.len();
        return Bounded {
            lines: Vec::new(),
            hidden_rows,
        };
    }

    let keep = max_height - 1;
    let hidden_rows = lines.len() - keep;
    let tail = lines.split_off(hidden_rows);
    let mut out = Vec::with_capacity(max_height);
    out.push(clip_line(hidden_notice(hidden_rows), max_width));
    out.extend(tail);

    Bounded {
        lines: out,
        hidden_rows,
    }
}

fn hidden_notice(hidden: usize) -> Line<'static> {
    let noun = if hidden == 1 { "line" } else { "lines" };
    Line::from(Span::styled(
        format!("... first {} {} hidden ...", hidden, noun),
        Style::default().add_modifier(Modifier::DIM),
    ))
}

/// Truncate a line to `max_width` display columns, keeping span styles.
fn clip_line(line: Line<'static>, max_width: usize) -> Line<'static> {
    if line.width() <= max_width {
        return line;
    }

    let Line {
        spans,
        style,
        alignment,
    } = line;
    let mut remaining = max_width;
    let mut clipped = Vec::new();

    for span in spans {
        if remaining == 0 {
            break;
        }
        let mut text = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if w > remaining {
                remaining = 0;
                break;
            }
            remaining -= w;
            text.push(c);
        }
        clipped.push(Span::styled(text, span.style));
    }

    Line {
        spans: clipped,
        style,
        alignment,
    }
}
