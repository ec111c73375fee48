use super::{DiffLine, LineKind};

/// Whether the diff only ever adds lines, i.e. it creates a new file.
///
/// Metadata text (`diff --git`, `new file mode`) is tolerated in case it
/// slipped through unfiltered. An empty sequence is not a new file.
pub fn is_entirely_new_file(lines: &[DiffLine]) -> bool {
    !lines.is_empty()
        && lines.iter().all(|line| {
            matches!(
                line.kind,
                LineKind::Addition | LineKind::HunkHeader | LineKind::Other
            ) || line.text.starts_with("diff --git")
                || line.text.starts_with("new file mode")
        })
}

/// Concatenated text of every addition, one per line.
pub fn new_file_content(lines: &[DiffLine]) -> String {
    lines
        .iter()
        .filter(|l| l.kind == LineKind::Addition)
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
