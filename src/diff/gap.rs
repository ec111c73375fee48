use crate::constants::GAP_THRESHOLD;

use super::RenderItem;

/// A rendered row: either an item or the separator drawn where unchanged
/// lines were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Gap,
    Item(RenderItem),
}

/// Interleave gap rows between items whose line numbers jump by more than
/// [`GAP_THRESHOLD`] lines.
///
/// Tracking starts empty, so the first item never gets a gap. A deletion
/// without an old-line number leaves the tracked number untouched.
pub fn insert_gaps(items: Vec<RenderItem>) -> Vec<Row> {
    let mut rows = Vec::with_capacity(items.len());
    let mut last: Option<usize> = None;

    for item in items {
        let relevant = item.relevant_line();

        if let (Some(prev), Some(current)) = (last, relevant) {
            if current.saturating_sub(prev) > GAP_THRESHOLD + 1 {
                rows.push(Row::Gap);
            }
        }

        match item {
            RenderItem::Deletion(_) => {
                if relevant.is_some() {
                    last = relevant;
                }
            }
            _ => last = relevant,
        }
        rows.push(Row::Item(item));
    }

    rows
}
