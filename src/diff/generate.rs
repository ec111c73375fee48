//! Unified diff text generation.
//!
//! Provides [`unified_diff`] for comparing old vs new content and
//! [`new_file_diff`] for the all-additions diff of a file that did not exist.
//! Used by `diffview compare` to feed the renderer realistic input.

use similar::{ChangeTag, TextDiff};

use crate::constants::DIFF_CONTEXT_LINES;

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// Generate a plain unified diff string.
///
/// Compares `old` and `new` content line-by-line. Returns only the file
/// headers if the contents are identical.
pub fn unified_diff(old: &str, new: &str, path: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    output.push_str(&format!("--- a/{}\n", path));
    output.push_str(&format!("+++ b/{}\n", path));

    for hunk in diff
        .unified_diff()
        .context_radius(DIFF_CONTEXT_LINES)
        .iter_hunks()
    {
        output.push_str(&format!("{}\n", hunk.header()));

        for change in hunk.iter_changes() {
            let marker = match change.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            output.push(marker);
            output.push_str(change.value());
            if change.missing_newline() {
                output.push('\n');
                output.push_str(NO_NEWLINE_MARKER);
                output.push('\n');
            }
        }
    }

    output
}

/// Generate the diff of a newly created file (all lines are additions).
pub fn new_file_diff(content: &str, path: &str) -> String {
    let mut output = String::new();
    output.push_str("--- /dev/null\n");
    output.push_str(&format!("+++ b/{}\n", path));

    let count = content.lines().count();
    if count == 0 {
        return output;
    }
    output.push_str(&format!("@@ -0,0 +1,{} @@\n", count));
    for line in content.lines() {
        output.push_str(&format!("+{}\n", line));
    }

    output
}
