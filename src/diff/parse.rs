//! Unified diff text → [`DiffLine`] records.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::{DiffLine, LineKind};

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("hunk header regex is valid")
});

/// Running line counters carried across the fold.
///
/// Counters hold the number of the *previous* line on each side; they are
/// incremented before being attached to the next emitted record, and stop
/// at `usize::MAX` for absurd hunk starts.
#[derive(Debug, Default)]
struct ParseState {
    old: usize,
    new: usize,
    in_hunk: bool,
}

/// Parse raw unified diff text into typed line records.
///
/// Everything before the first `@@` header (`diff --git`, `index`, `---`,
/// `+++`, ...) is skipped. Inside a hunk, lines are classified purely by
/// their first character; lines that fit no category are dropped.
/// Never fails: malformed input yields an empty or partial sequence.
pub fn parse(diff_text: &str) -> Vec<DiffLine> {
    let mut out = Vec::new();
    let mut state = ParseState::default();

    for line in diff_text.lines() {
        if let Some((old_start, new_start)) = parse_hunk_header(line) {
            state.old = old_start.saturating_sub(1);
            state.new = new_start.saturating_sub(1);
            state.in_hunk = true;
            out.push(DiffLine::hunk_header(line));
            continue;
        }

        if !state.in_hunk {
            continue;
        }

        if let Some(text) = line.strip_prefix('+') {
            state.new = state.new.saturating_add(1);
            out.push(DiffLine::addition(state.new, text));
        } else if let Some(text) = line.strip_prefix('-') {
            state.old = state.old.saturating_add(1);
            out.push(DiffLine::deletion(state.old, text));
        } else if let Some(text) = line.strip_prefix(' ') {
            state.old = state.old.saturating_add(1);
            state.new = state.new.saturating_add(1);
            out.push(DiffLine::context(state.old, state.new, text));
        } else if line.starts_with('\\') {
            out.push(DiffLine::other(line));
        } else {
            trace!(line, "dropping unrecognized line inside hunk");
        }
    }

    out
}

/// Extract `(old_start, new_start)` from a hunk header line.
fn parse_hunk_header(line: &str) -> Option<(usize, usize)> {
    let caps = HUNK_HEADER.captures(line)?;
    let old_start = caps.get(1)?.as_str().parse().ok()?;
    let new_start = caps.get(3)?.as_str().parse().ok()?;
    Some((old_start, new_start))
}

/// Path of the post-image named by the `+++` header, without the `b/` prefix.
///
/// Returns `None` for deletions (`+++ /dev/null`) or when no header precedes
/// the first hunk.
pub fn target_filename(diff_text: &str) -> Option<String> {
    diff_text
        .lines()
        .take_while(|line| parse_hunk_header(line).is_none())
        .find_map(|line| line.strip_prefix("+++ "))
        .map(|path| path.split('\t').next().unwrap_or(path).trim())
        .filter(|path| *path != "/dev/null")
        .map(|path| path.strip_prefix("b/").unwrap_or(path).to_string())
}

/// Records shown as numbered rows: additions, deletions and context.
pub fn displayable_lines(lines: &[DiffLine]) -> Vec<DiffLine> {
    lines.iter().filter(|l| l.is_displayable()).cloned().collect()
}

/// Rebuild the `@@ -a,b +c,d @@` header of the first hunk from its records.
///
/// Starts come from the first numbered record on each side; counts are the
/// number of records carrying a number for that side. A side with no lines
/// uses the line before the hunk as its start, the way `diff -u` does.
/// Returns `None` when the records contain no hunk.
pub fn format_hunk_header(lines: &[DiffLine]) -> Option<String> {
    let start = lines
        .iter()
        .position(|l| l.kind == LineKind::HunkHeader)?;
    let hunk: Vec<&DiffLine> = lines[start + 1..]
        .iter()
        .take_while(|l| l.kind != LineKind::HunkHeader)
        .collect();

    let old_numbers: Vec<usize> = hunk.iter().filter_map(|l| l.old_line).collect();
    let new_numbers: Vec<usize> = hunk.iter().filter_map(|l| l.new_line).collect();

    Some(format!(
        "@@ -{} +{} @@",
        format_range(&old_numbers, &new_numbers),
        format_range(&new_numbers, &old_numbers),
    ))
}

/// Format one side of a hunk range. `other` lets an empty side borrow its
/// position from the opposite side.
fn format_range(numbers: &[usize], other: &[usize]) -> String {
    match numbers.first() {
        Some(&first) if numbers.len() == 1 => format!("{}", first),
        Some(&first) => format!("{},{}", first, numbers.len()),
        None => {
            let before = other.first().map(|n| n.saturating_sub(1)).unwrap_or(0);
            format!("{},0", before)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_resets_counters() {
        let lines = parse("@@ -10,3 +10,4 @@\n context\n-old\n+new\n");
        assert_eq!(
            lines,
            vec![
                DiffLine::hunk_header("@@ -10,3 +10,4 @@"),
                DiffLine::context(10, 10, "context"),
                DiffLine::deletion(11, "old"),
                DiffLine::addition(11, "new"),
            ]
        );
    }

    #[test]
    fn test_file_headers_are_skipped() {
        let diff = "diff --git a/x.rs b/x.rs\nindex 123..456 100644\n--- a/x.rs\n+++ b/x.rs\n@@ -1 +1 @@\n-a\n+b\n";
        let lines = parse(diff);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].kind, LineKind::HunkHeader);
        assert_eq!(lines[1], DiffLine::deletion(1, "a"));
        assert_eq!(lines[2], DiffLine::addition(1, "b"));
    }

    #[test]
    fn test_body_before_header_is_dropped() {
        let lines = parse("+orphan\n-orphan\n context\n");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_malformed_header_not_recognized() {
        let lines = parse("@@ -x,1 +1,1 @@\n+a\n");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_no_newline_marker_keeps_counters() {
        let diff = "@@ -1,1 +1,1 @@\n-a\n\\ No newline at end of file\n+b\n";
        let lines = parse(diff);
        assert_eq!(lines[2], DiffLine::other("\\ No newline at end of file"));
        assert_eq!(lines[3], DiffLine::addition(1, "b"));
    }

    #[test]
    fn test_unknown_lines_inside_hunk_dropped() {
        let lines = parse("@@ -1,2 +1,2 @@\n a\n\n b\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], DiffLine::context(2, 2, "b"));
    }

    #[test]
    fn test_second_hunk_resets() {
        let diff = "@@ -1,2 +1,2 @@\n a\n-b\n+c\n@@ -40,2 +40,3 @@\n x\n+y\n z\n";
        let lines = parse(diff);
        let second: Vec<_> = lines.iter().skip(5).collect();
        assert_eq!(*second[0], DiffLine::context(40, 40, "x"));
        assert_eq!(*second[1], DiffLine::addition(41, "y"));
        assert_eq!(*second[2], DiffLine::context(41, 42, "z"));
    }

    #[test]
    fn test_crlf_input() {
        let lines = parse("@@ -1 +1 @@\r\n-a\r\n+b\r\n");
        assert_eq!(lines[1].text, "a");
        assert_eq!(lines[2].text, "b");
    }

    #[test]
    fn test_numbers_contiguous_per_hunk() {
        let diff = "@@ -5,6 +5,7 @@\n a\n-b\n-c\n+B\n d\n+e\n+f\n g\n@@ -30 +31 @@\n-h\n+H\n";
        let lines = parse(diff);
        for hunk in lines.split(|l| l.kind == LineKind::HunkHeader) {
            let news: Vec<usize> = hunk.iter().filter_map(|l| l.new_line).collect();
            let olds: Vec<usize> = hunk.iter().filter_map(|l| l.old_line).collect();
            assert!(news.windows(2).all(|w| w[1] == w[0] + 1), "{:?}", news);
            assert!(olds.windows(2).all(|w| w[1] == w[0] + 1), "{:?}", olds);
        }
    }

    #[test]
    fn test_huge_start_saturates() {
        let diff = format!("@@ -1 +{} @@\n+a\n+b\n", usize::MAX);
        let lines = parse(&diff);
        assert_eq!(lines[1], DiffLine::addition(usize::MAX, "a"));
        assert_eq!(lines[2], DiffLine::addition(usize::MAX, "b"));
    }

    #[test]
    fn test_zero_start_for_new_file() {
        let lines = parse("@@ -0,0 +1,2 @@\n+a\n+b\n");
        assert_eq!(lines[1], DiffLine::addition(1, "a"));
        assert_eq!(lines[2], DiffLine::addition(2, "b"));
    }

    #[test]
    fn test_displayable_filters_headers_and_markers() {
        let lines = parse("@@ -1 +1 @@\n-a\n\\ No newline at end of file\n+b\n");
        let shown = displayable_lines(&lines);
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(DiffLine::is_displayable));
    }

    #[test]
    fn test_header_round_trip() {
        let header = "@@ -10,3 +12,4 @@";
        let diff = format!("{}\n a\n-b\n c\n+d\n+e\n", header);
        assert_eq!(format_hunk_header(&parse(&diff)).as_deref(), Some(header));
    }

    #[test]
    fn test_header_round_trip_new_file() {
        let header = "@@ -0,0 +1,2 @@";
        let diff = format!("{}\n+a\n+b\n", header);
        assert_eq!(format_hunk_header(&parse(&diff)).as_deref(), Some(header));
    }

    #[test]
    fn test_header_round_trip_single_lines() {
        let header = "@@ -7 +7 @@";
        let diff = format!("{}\n-a\n+b\n", header);
        assert_eq!(format_hunk_header(&parse(&diff)).as_deref(), Some(header));
    }

    #[test]
    fn test_target_filename() {
        let diff = "--- a/src/app.py\n+++ b/src/app.py\t2024-01-01\n@@ -1 +1 @@\n-a\n+b\n";
        assert_eq!(target_filename(diff).as_deref(), Some("src/app.py"));
        assert_eq!(target_filename("--- a/x\n+++ /dev/null\n@@ -1 +0,0 @@\n-x\n"), None);
        assert_eq!(target_filename("@@ -1 +1 @@\n++++ b/not-a-header\n"), None);
    }

    #[test]
    fn test_format_header_without_hunk() {
        assert_eq!(format_hunk_header(&[]), None);
    }
}
