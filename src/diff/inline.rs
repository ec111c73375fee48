//! Intra-line word/character differences for paired lines.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use similar::{capture_diff_slices, Algorithm, ChangeTag, DiffTag, TextDiff};
use tracing::trace;

/// How a fragment of a paired line changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStatus {
    Unchanged,
    Added,
    Removed,
}

/// A fragment of text produced by comparing a deletion with its addition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinePart {
    pub text: String,
    pub status: InlineStatus,
}

impl InlinePart {
    fn new(text: impl Into<String>, status: InlineStatus) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }

    /// Whether this part belongs on the deletion row.
    pub fn on_old_side(&self) -> bool {
        self.status != InlineStatus::Added
    }

    /// Whether this part belongs on the addition row.
    pub fn on_new_side(&self) -> bool {
        self.status != InlineStatus::Removed
    }
}

/// A word plus the whitespace trailing it. Equality looks at the word only,
/// so lines differing purely in spacing compare equal word by word.
#[derive(Debug, Clone, Copy)]
struct WordToken<'a> {
    word: &'a str,
    text: &'a str,
}

impl PartialEq for WordToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for WordToken<'_> {}

impl PartialOrd for WordToken<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WordToken<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(other.word)
    }
}

impl Hash for WordToken<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

/// Split into word tokens. Leading whitespace becomes a token with an empty word.
fn tokenize(s: &str) -> Vec<WordToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = s;

    while !rest.is_empty() {
        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let after_word = &rest[word_len..];
        let ws_len = after_word
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(after_word.len());
        let (text, tail) = rest.split_at(word_len + ws_len);
        tokens.push(WordToken {
            word: &text[..word_len],
            text,
        });
        rest = tail;
    }

    tokens
}

/// Compare two lines word by word, falling back to characters.
///
/// The word pass ignores whitespace-only differences; when it finds nothing
/// added or removed the comparison is redone per character so the spacing
/// change is still visible. Callers strip the shared indentation first.
pub fn inline_diff(old: &str, new: &str) -> Vec<InlinePart> {
    let parts = word_diff(old, new);
    if parts.iter().any(|p| p.status != InlineStatus::Unchanged) {
        return parts;
    }
    trace!(old, new, "word diff found no changes, using char diff");
    char_diff(old, new)
}

fn word_diff(old: &str, new: &str) -> Vec<InlinePart> {
    let old_tokens = tokenize(old);
    let new_tokens = tokenize(new);
    let ops = capture_diff_slices(Algorithm::Myers, &old_tokens, &new_tokens);

    let mut parts = Vec::new();
    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let old_text = || concat(&old_tokens[old_range.clone()]);
        let new_text = || concat(&new_tokens[new_range.clone()]);
        match tag {
            DiffTag::Equal => push_part(&mut parts, new_text(), InlineStatus::Unchanged),
            DiffTag::Delete => push_part(&mut parts, old_text(), InlineStatus::Removed),
            DiffTag::Insert => push_part(&mut parts, new_text(), InlineStatus::Added),
            DiffTag::Replace => {
                push_part(&mut parts, old_text(), InlineStatus::Removed);
                push_part(&mut parts, new_text(), InlineStatus::Added);
            }
        }
    }
    parts
}

fn char_diff(old: &str, new: &str) -> Vec<InlinePart> {
    let diff = TextDiff::from_chars(old, new);
    let mut parts = Vec::new();
    for change in diff.iter_all_changes() {
        let status = match change.tag() {
            ChangeTag::Equal => InlineStatus::Unchanged,
            ChangeTag::Delete => InlineStatus::Removed,
            ChangeTag::Insert => InlineStatus::Added,
        };
        push_part(&mut parts, change.value().to_string(), status);
    }
    parts
}

fn concat(tokens: &[WordToken<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect()
}

/// Append text, merging with the previous part when the status matches.
fn push_part(parts: &mut Vec<InlinePart>, text: String, status: InlineStatus) {
    if text.is_empty() {
        return;
    }
    match parts.last_mut() {
        Some(last) if last.status == status => last.text.push_str(&text),
        _ => parts.push(InlinePart::new(text, status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn side(parts: &[InlinePart], keep: fn(&InlinePart) -> bool) -> String {
        parts.iter().filter(|p| keep(p)).map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_word_change_in_middle() {
        let parts = inline_diff("let x = 1;", "let y = 1;");
        assert!(parts.contains(&InlinePart::new("x ", InlineStatus::Removed)));
        assert!(parts.contains(&InlinePart::new("y ", InlineStatus::Added)));
        assert_eq!(parts[0], InlinePart::new("let ", InlineStatus::Unchanged));
    }

    #[test]
    fn test_sides_reassemble_lines() {
        let old = "fn main() { run(a, b) }";
        let new = "fn main() { run(a, c, d) }";
        let parts = inline_diff(old, new);
        assert_eq!(side(&parts, InlinePart::on_new_side), new);
        assert_eq!(side(&parts, InlinePart::on_old_side), old);
    }

    #[test]
    fn test_no_shared_words_stays_word_level() {
        let parts = inline_diff("aaa", "AAA");
        assert_eq!(
            parts,
            vec![
                InlinePart::new("aaa", InlineStatus::Removed),
                InlinePart::new("AAA", InlineStatus::Added),
            ]
        );
    }

    #[test]
    fn test_whitespace_only_change_falls_back_to_chars() {
        let parts = inline_diff("a b", "a  b");
        assert!(parts.iter().all(|p| p.status != InlineStatus::Removed));
        let added: Vec<_> = parts
            .iter()
            .filter(|p| p.status == InlineStatus::Added)
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].text, " ");
        assert_eq!(side(&parts, InlinePart::on_new_side), "a  b");
    }

    #[test]
    fn test_identical_lines_are_unchanged() {
        let parts = inline_diff("same", "same");
        assert_eq!(parts, vec![InlinePart::new("same", InlineStatus::Unchanged)]);
    }

    #[test]
    fn test_empty_old_line() {
        let parts = inline_diff("", "new text");
        assert_eq!(parts, vec![InlinePart::new("new text", InlineStatus::Added)]);
    }

    #[test]
    fn test_tokens_compare_on_word_only() {
        let narrow = tokenize("a b");
        let wide = tokenize("a   b");
        assert_eq!(narrow, wide);
        assert_eq!(narrow.cmp(&wide), Ordering::Equal);
        assert_eq!(narrow[0].partial_cmp(&wide[0]), Some(Ordering::Equal));
        assert_ne!(narrow[0].text, wide[0].text);
        assert_eq!(tokenize("a")[0].cmp(&tokenize("b")[0]), Ordering::Less);
    }

    #[test]
    fn test_tokenize_keeps_whitespace() {
        let tokens = tokenize("  a  b");
        let words: Vec<_> = tokens.iter().map(|t| t.word).collect();
        let texts: Vec<_> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(words, vec!["", "a", "b"]);
        assert_eq!(texts, vec!["  ", "a  ", "b"]);
    }
}
