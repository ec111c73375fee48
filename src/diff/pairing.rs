//! Grouping of displayable lines into render items.

use super::{DiffLine, LineKind};

/// A unit of the rendered diff: one line, or a deletion shown directly
/// above the addition that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderItem {
    Context(DiffLine),
    Addition(DiffLine),
    Deletion(DiffLine),
    Pair {
        deletion: DiffLine,
        addition: DiffLine,
    },
}

impl RenderItem {
    /// Line number used for gap detection: the new side for additions,
    /// context and pairs, the old side for deletions.
    pub fn relevant_line(&self) -> Option<usize> {
        match self {
            RenderItem::Context(line) | RenderItem::Addition(line) => line.new_line,
            RenderItem::Deletion(line) => line.old_line,
            RenderItem::Pair { addition, .. } => addition.new_line,
        }
    }

    /// The records this item renders, in display order.
    pub fn lines(&self) -> Vec<&DiffLine> {
        match self {
            RenderItem::Context(line) | RenderItem::Addition(line) | RenderItem::Deletion(line) => {
                vec![line]
            }
            RenderItem::Pair { deletion, addition } => vec![deletion, addition],
        }
    }
}

/// Build render items from displayable lines with greedy adjacent pairing.
///
/// A deletion pairs only with an addition that directly follows it, and
/// each line is consumed at most once. A block of deletions followed by a
/// block of additions therefore pairs only at the boundary.
/// Hunk headers and `\` markers must already be filtered out; any that slip
/// through are skipped.
pub fn build_render_items(displayable: &[DiffLine]) -> Vec<RenderItem> {
    let mut items = Vec::with_capacity(displayable.len());
    let mut i = 0;

    while i < displayable.len() {
        let line = &displayable[i];
        let next = displayable.get(i + 1);

        match (line.kind, next) {
            (LineKind::Deletion, Some(next)) if next.kind == LineKind::Addition => {
                items.push(RenderItem::Pair {
                    deletion: line.clone(),
                    addition: next.clone(),
                });
                i += 2;
                continue;
            }
            (LineKind::Deletion, _) => items.push(RenderItem::Deletion(line.clone())),
            (LineKind::Addition, _) => items.push(RenderItem::Addition(line.clone())),
            (LineKind::Context, _) => items.push(RenderItem::Context(line.clone())),
            (LineKind::HunkHeader | LineKind::Other, _) => {}
        }
        i += 1;
    }

    items
}
