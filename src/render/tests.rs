use super::*;
use crate::diff::generate::{new_file_diff, unified_diff};
use pretty_assertions::assert_eq;

fn options(width: usize) -> RenderOptions {
    RenderOptions {
        max_width: width,
        ..Default::default()
    }
}

fn plain(diff: &str, options: &RenderOptions) -> Vec<String> {
    render_diff(diff, options, &PlainHighlighter)
        .plain_lines()
        .into_iter()
        .map(|l| l.trim_end().to_string())
        .collect()
}

#[test]
fn test_empty_input_shows_no_content() {
    assert_eq!(plain("", &options(80)), vec![NO_DIFF_CONTENT]);
}

#[test]
fn test_whitespace_input_shows_no_changes() {
    assert_eq!(plain("  \n\n", &options(80)), vec![NO_CHANGES_DETECTED]);
    assert_eq!(plain("  \n", &options(80)), vec![NO_CHANGES_DETECTED]);
}

#[test]
fn test_header_only_shows_no_changes() {
    let diff = "--- a/x.py\n+++ b/x.py\n";
    assert_eq!(plain(diff, &options(80)), vec![NO_CHANGES_DETECTED]);
}

#[test]
fn test_hunk_without_lines_shows_no_changes() {
    let diff = "@@ -1 +1 @@\n\\ No newline at end of file\n";
    assert_eq!(plain(diff, &options(80)), vec![NO_CHANGES_DETECTED]);
}

#[test]
fn test_new_file_rendered_without_gutter() {
    let diff = new_file_diff("import os\nprint(os.name)\n", "tool.py");
    let opts = RenderOptions {
        filename: Some("tool.py".to_string()),
        ..options(80)
    };
    assert_eq!(plain(&diff, &opts), vec!["import os", "print(os.name)"]);
}

#[test]
fn test_new_file_keeps_trailing_blank_line() {
    assert_eq!(plain("@@ -0,0 +1,2 @@\n+a\n+\n", &options(80)), vec!["a", ""]);
}

#[test]
fn test_new_file_of_one_blank_line() {
    let block = render_diff("@@ -0,0 +1 @@\n+\n", &options(80), &PlainHighlighter);
    assert_eq!(block.lines.len(), 1);
    assert_eq!(block.plain_lines(), vec![""]);
}

#[test]
fn test_huge_line_numbers_do_not_panic() {
    let diff = format!("@@ -1 +{} @@\n+a\n+b\n", usize::MAX);
    let rows = plain(&diff, &options(80));
    assert_eq!(rows, vec!["a", "b"]);

    let diff = format!(
        "@@ -1 +{} @@\n a\n b\n@@ -1 +1 @@\n x\n",
        usize::MAX - 1
    );
    let rows = plain(&diff, &options(80));
    assert_eq!(rows.len(), 3);
    assert!(rows[2].ends_with(" x"));
}

#[test]
fn test_modified_file_rendered_with_gutter() {
    let old = "a\nb\nc\n";
    let new = "a\nB\nc\n";
    let diff = unified_diff(old, new, "abc.txt");
    assert_eq!(plain(&diff, &options(80)), vec!["1  a", "2 -b", "2 +B", "3  c"]);
}

#[test]
fn test_distant_hunks_separated_by_gap() {
    let old: String = (1..=30).map(|i| format!("line {}\n", i)).collect();
    let new = old.replace("line 2\n", "line two\n").replace("line 28\n", "line twenty-eight\n");
    let diff = unified_diff(&old, &new, "lines.txt");
    let rows = plain(&diff, &options(40));
    let gaps = rows.iter().filter(|r| r.starts_with(crate::constants::GAP_CHAR)).count();
    assert_eq!(gaps, 1);
}

#[test]
fn test_screen_reader_lists_records() {
    let opts = RenderOptions {
        screen_reader: true,
        ..options(80)
    };
    let rows = plain("--- a/f\n+++ b/f\n@@ -1 +1 @@\n-x\n+y\n", &opts);
    assert_eq!(rows, vec!["hunk: @@ -1 +1 @@", "del: x", "add: y"]);
}

#[test]
fn test_tabs_expanded_before_indent_stripping() {
    let diff = "@@ -1,2 +1,2 @@\n \tone\n \t\ttwo\n";
    let opts = RenderOptions {
        tab_width: 2,
        ..options(80)
    };
    assert_eq!(plain(diff, &opts), vec!["1  one", "2    two"]);
}

#[test]
fn test_height_budget_truncates_from_top() {
    let body: String = (1..=10).map(|i| format!(" line {}\n", i)).collect();
    let diff = format!("@@ -1,10 +1,10 @@\n{}", body);
    let opts = RenderOptions {
        max_height: Some(3),
        ..options(80)
    };
    let block = render_diff(&diff, &opts, &PlainHighlighter);
    assert_eq!(block.hidden_rows, 8);
    assert_eq!(block.lines.len(), 3);
    assert_eq!(block.plain_lines()[2].trim_end(), "10  line 10");
}

#[test]
fn test_key_is_stable_and_content_addressed() {
    let opts = RenderOptions {
        filename: Some("a.rs".to_string()),
        ..options(80)
    };
    let first = render_diff("@@ -1 +1 @@\n-a\n+b\n", &opts, &PlainHighlighter);
    let again = render_diff("@@ -1 +1 @@\n-a\n+b\n", &opts, &PlainHighlighter);
    let other = render_diff("@@ -1 +1 @@\n-a\n+c\n", &opts, &PlainHighlighter);
    assert_eq!(first.key, again.key);
    assert_ne!(first.key, other.key);
    assert!(first.key.starts_with("diff-a.rs-"));
}

#[test]
fn test_syntect_colors_known_language() {
    let diff = new_file_diff("def f():\n    return 1\n", "f.py");
    let opts = RenderOptions {
        filename: Some("f.py".to_string()),
        ..options(80)
    };
    let block = render_diff(&diff, &opts, &SyntectHighlighter::default());
    assert!(block
        .lines
        .iter()
        .flat_map(|l| l.spans.iter())
        .any(|s| s.style.fg.is_some()));
}
