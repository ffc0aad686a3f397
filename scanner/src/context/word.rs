use crate::Span;
use crate::span::checked_cursor;

/// Characters of a word: identifier characters plus `.` so attribute chains stay whole.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch == '_' || ch == '.' || ch.is_alphanumeric()
}

/// The word run touching the cursor from the left.
///
/// `None` when the character left of the cursor is not a word character, or when the run
/// left of the cursor is nothing but dots. Leading dots are not part of the word.
pub fn current_word(cursor: usize, line: &str) -> Option<Span> {
    let cursor = checked_cursor(line, cursor)?;
    let (before, after) = line.split_at(cursor);
    if !before.chars().next_back().is_some_and(is_word_char) {
        return None;
    }

    let start = before
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_word_char(c))
        .last()
        .map_or(cursor, |(i, _)| i);
    let end = cursor
        + after
            .char_indices()
            .find(|&(_, c)| !is_word_char(c))
            .map_or(after.len(), |(i, _)| i);

    let start = start + line[start..end].len() - line[start..end].trim_start_matches('.').len();
    if start >= cursor {
        return None;
    }
    Span::from_line(line, start, end)
}

/// Offset of the last dot of the current word strictly before the cursor.
fn last_dot_before_cursor(word: &Span, cursor: usize) -> Option<usize> {
    let head = &word.text[..cursor - word.start];
    head.rfind('.').map(|i| word.start + i)
}

/// The receiver part of an attribute chain: from the word start up to and including the
/// last dot before the cursor. `Object.attr1|` gives `Object.`.
pub fn current_object(cursor: usize, line: &str) -> Option<Span> {
    let word = current_word(cursor, line)?;
    let dot = last_dot_before_cursor(&word, cursor)?;
    Span::from_line(line, word.start, dot + 1)
}

/// The attribute segment under the cursor: from just after the last dot before the cursor
/// to the next dot or the end of the word. Empty right after a trailing dot.
pub fn current_object_attribute(cursor: usize, line: &str) -> Option<Span> {
    let word = current_word(cursor, line)?;
    let dot = last_dot_before_cursor(&word, cursor)?;
    let start = dot + 1;
    let end = line[start..word.end]
        .find('.')
        .map_or(word.end, |i| start + i);
    Span::from_line(line, start, end)
}
