//! Row layout for diff mode: gutters, markers, indentation and wrapping.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use crate::constants::{GAP_CHAR, MARKER_COLUMNS};
use crate::diff::{inline_diff, DiffLine, InlinePart, InlineStatus, LineKind, RenderItem, Row};

use super::highlight::Highlighter;
use super::theme::Theme;

/// Everything row layout needs besides the rows themselves.
pub struct LayoutContext<'a> {
    pub max_width: usize,
    pub language: Option<&'a str>,
    pub theme: &'a Theme,
    pub highlighter: &'a dyn Highlighter,
}

/// Replace every tab with `tab_width` spaces.
pub fn expand_tabs(text: &str, tab_width: usize) -> String {
    text.replace('\t', &" ".repeat(tab_width))
}

/// Digits needed for the largest old or new line number, at least 1.
pub fn gutter_width(lines: &[DiffLine]) -> usize {
    lines
        .iter()
        .flat_map(|l| [l.old_line, l.new_line])
        .flatten()
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
        .max(1)
}

fn leading_whitespace(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

/// Smallest leading-whitespace run over the non-blank lines.
///
/// Blank lines are skipped so they don't force the baseline to zero.
pub fn baseline_indent(lines: &[DiffLine]) -> usize {
    lines
        .iter()
        .filter(|l| !l.text.trim().is_empty())
        .map(|l| leading_whitespace(&l.text))
        .min()
        .unwrap_or(0)
}

/// Remove up to `indent` leading whitespace characters.
pub fn strip_indent(text: &str, indent: usize) -> &str {
    let skip = indent.min(leading_whitespace(text));
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

/// Lay out gap rows and render items as terminal lines.
///
/// `displayable` is the full set of numbered lines; it fixes the gutter
/// width and the baseline indentation shared by every row.
pub fn layout_rows(rows: &[Row], displayable: &[DiffLine], ctx: &LayoutContext<'_>) -> Vec<Line<'static>> {
    let gutter = gutter_width(displayable);
    let indent = baseline_indent(displayable);
    let mut out = Vec::new();

    for row in rows {
        match row {
            Row::Gap => out.push(gap_line(ctx)),
            Row::Item(RenderItem::Pair { deletion, addition }) => {
                let parts = inline_diff(
                    strip_indent(&deletion.text, indent),
                    strip_indent(&addition.text, indent),
                );
                let old_spans = inline_spans(&parts, InlinePart::on_old_side, ctx.theme);
                let new_spans = inline_spans(&parts, InlinePart::on_new_side, ctx.theme);
                push_diff_line(&mut out, deletion, old_spans, gutter, ctx);
                push_diff_line(&mut out, addition, new_spans, gutter, ctx);
            }
            Row::Item(item) => {
                for line in item.lines() {
                    let spans = ctx
                        .highlighter
                        .colorize_line(strip_indent(&line.text, indent), ctx.language);
                    push_diff_line(&mut out, line, spans, gutter, ctx);
                }
            }
        }
    }

    out
}

fn gap_line(ctx: &LayoutContext<'_>) -> Line<'static> {
    Line::from(Span::styled(
        GAP_CHAR.repeat(ctx.max_width),
        Style::default().fg(ctx.theme.gap),
    ))
}

fn inline_spans(
    parts: &[InlinePart],
    keep: fn(&InlinePart) -> bool,
    theme: &Theme,
) -> Vec<Span<'static>> {
    parts
        .iter()
        .filter(|p| keep(p))
        .map(|part| {
            let style = match part.status {
                InlineStatus::Unchanged => Style::default(),
                InlineStatus::Added => Style::default()
                    .bg(theme.highlight_added_bg)
                    .add_modifier(Modifier::BOLD),
                InlineStatus::Removed => Style::default()
                    .bg(theme.highlight_removed_bg)
                    .add_modifier(Modifier::BOLD),
            };
            Span::styled(part.text.clone(), style)
        })
        .collect()
}

/// Row colors for a line kind: marker, marker color, row background.
fn row_style(kind: LineKind, theme: &Theme) -> (char, Option<Color>, Option<Color>) {
    match kind {
        LineKind::Addition => ('+', Some(theme.added_fg), Some(theme.added_bg)),
        LineKind::Deletion => ('-', Some(theme.removed_fg), Some(theme.removed_bg)),
        _ => (' ', None, None),
    }
}

fn push_diff_line(
    out: &mut Vec<Line<'static>>,
    line: &DiffLine,
    content: Vec<Span<'static>>,
    gutter: usize,
    ctx: &LayoutContext<'_>,
) {
    let (marker, marker_fg, bg) = row_style(line.kind, ctx.theme);
    let number = match line.kind {
        LineKind::Deletion => line.old_line,
        _ => line.new_line,
    };
    let number = number.map(|n| n.to_string()).unwrap_or_default();

    let mut gutter_style = Style::default().fg(ctx.theme.gutter);
    let mut marker_style = Style::default().add_modifier(Modifier::BOLD);
    if let Some(bg) = bg {
        gutter_style = gutter_style.bg(bg);
        marker_style = marker_style.bg(bg);
    }
    if let Some(fg) = marker_fg {
        marker_style = marker_style.fg(fg);
    }

    let content: Vec<Span<'static>> = content
        .into_iter()
        .map(|span| match bg {
            Some(bg) if span.style.bg.is_none() => {
                let style = span.style.bg(bg);
                span.style(style)
            }
            _ => span,
        })
        .collect();

    let content_width = ctx.max_width.saturating_sub(gutter + MARKER_COLUMNS).max(1);
    for (i, chunk) in wrap_spans(content, content_width).into_iter().enumerate() {
        let mut spans = Vec::with_capacity(chunk.len() + 2);
        if i == 0 {
            spans.push(Span::styled(format!("{:>gutter$} ", number), gutter_style));
            spans.push(Span::styled(marker.to_string(), marker_style));
        } else {
            spans.push(Span::styled(format!("{:gutter$} ", ""), gutter_style));
            spans.push(Span::styled(" ", marker_style));
        }
        spans.extend(chunk);
        out.push(Line::from(spans));
    }
}

/// Wrap styled text to `width` display columns.
///
/// Breaks after the last whitespace that fits, or mid-word when a row has
/// none. Always returns at least one (possibly empty) row.
pub fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Vec<Span<'static>>> {
    let width = width.max(1);
    let cells: Vec<(char, Style)> = spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
        .collect();
    if cells.is_empty() {
        return vec![Vec::new()];
    }

    let chars: Vec<char> = cells.iter().map(|(c, _)| *c).collect();
    break_rows(&chars, width)
        .into_iter()
        .map(|(start, end)| group_cells(&cells[start..end]))
        .collect()
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Compute `(start, end)` char ranges for each wrapped row.
fn break_rows(chars: &[char], width: usize) -> Vec<(usize, usize)> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut col = 0;
    let mut last_space: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        let w = char_width(chars[i]);
        if col + w > width && i > start {
            let end = match last_space {
                Some(space) if space > start => space + 1,
                _ => i,
            };
            rows.push((start, end));
            start = end;
            col = chars[start..i].iter().map(|c| char_width(*c)).sum();
            last_space = chars[start..i]
                .iter()
                .rposition(|c| c.is_whitespace())
                .map(|p| start + p);
            continue;
        }
        if chars[i].is_whitespace() {
            last_space = Some(i);
        }
        col += w;
        i += 1;
    }

    rows.push((start, chars.len()));
    rows
}

/// Merge consecutive same-style characters back into spans.
fn group_cells(cells: &[(char, Style)]) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_style: Option<Style> = None;

    for (c, style) in cells {
        if current_style != Some(*style) {
            if let Some(prev) = current_style {
                spans.push(Span::styled(std::mem::take(&mut current), prev));
            }
            current_style = Some(*style);
        }
        current.push(*c);
    }
    if let Some(style) = current_style {
        spans.push(Span::styled(current, style));
    }
    spans
}

/// Wrap plain lines (new-file mode) without a gutter.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .flat_map(|line| {
            wrap_spans(line.spans, width)
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>()
        })
        .collect()
}
