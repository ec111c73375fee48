//! Unified diff model and the pure stages of the diff-to-display pipeline.
//!
//! Text flows through [`parse`] into [`DiffLine`] records, is checked by
//! [`is_entirely_new_file`], paired by [`build_render_items`], and finally
//! interleaved with gap rows by [`insert_gaps`]. Nothing here touches the
//! terminal; styling happens in [`crate::render`].

mod classify;
mod gap;
pub mod generate;
mod inline;
mod pairing;
mod parse;

pub use classify::{is_entirely_new_file, new_file_content};
pub use gap::{insert_gaps, Row};
pub use inline::{inline_diff, InlinePart, InlineStatus};
pub use pairing::{build_render_items, RenderItem};
pub use parse::{displayable_lines, format_hunk_header, parse, target_filename};

use serde::Serialize;

/// The role a single physical line plays in a unified diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Addition,
    Deletion,
    Context,
    HunkHeader,
    Other,
}

impl LineKind {
    /// Short label used by the screen-reader output.
    pub fn label(self) -> &'static str {
        match self {
            LineKind::Addition => "add",
            LineKind::Deletion => "del",
            LineKind::Context => "context",
            LineKind::HunkHeader => "hunk",
            LineKind::Other => "other",
        }
    }
}

/// One parsed line of a diff body.
///
/// `old_line` is set for deletions and context, `new_line` for additions and
/// context. Hunk headers and `\` markers carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line: Option<usize>,
    /// Line content with the leading `+`/`-`/` ` marker removed.
    pub text: String,
}

impl DiffLine {
    pub fn addition(new_line: usize, text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Addition,
            old_line: None,
            new_line: Some(new_line),
            text: text.into(),
        }
    }

    pub fn deletion(old_line: usize, text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Deletion,
            old_line: Some(old_line),
            new_line: None,
            text: text.into(),
        }
    }

    pub fn context(old_line: usize, new_line: usize, text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Context,
            old_line: Some(old_line),
            new_line: Some(new_line),
            text: text.into(),
        }
    }

    pub fn hunk_header(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::HunkHeader,
            old_line: None,
            new_line: None,
            text: text.into(),
        }
    }

    pub fn other(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Other,
            old_line: None,
            new_line: None,
            text: text.into(),
        }
    }

    /// Whether this record is shown as a numbered row (not a header or marker).
    pub fn is_displayable(&self) -> bool {
        matches!(
            self.kind,
            LineKind::Addition | LineKind::Deletion | LineKind::Context
        )
    }
}
