use crate::lexer::{is_ident_start, is_keyword};
use crate::span::checked_cursor;
use crate::{BracketMatcher, Span};

use super::word::is_word_char;

/// An open subscript: the `[` offset and the container chain directly before it.
struct Subscript {
    open: usize,
    container: Span,
}

/// Innermost open `[` left of the cursor that indexes a name or attribute chain.
///
/// A `[` without a chain right before it (`x = [1, |`) is a list literal and is skipped in
/// favour of an enclosing subscript.
fn enclosing_subscript(cursor: usize, line: &str) -> Option<Subscript> {
    let cursor = checked_cursor(line, cursor)?;
    let state = BracketMatcher::scan(line, cursor);
    if state.malformed || state.comment.is_some() {
        return None;
    }
    state
        .brackets
        .iter()
        .rev()
        .filter(|bracket| bracket.bracket == '[')
        .find_map(|bracket| {
            container_before(line, bracket.pos).map(|container| Subscript {
                open: bracket.pos,
                container,
            })
        })
}

/// The identifier chain ending right at `end`, if there is one.
fn container_before(line: &str, end: usize) -> Option<Span> {
    let head = &line[..end];
    let start = head
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_word_char(c))
        .last()
        .map(|(i, _)| i)?;
    let chain = &line[start..end];
    if chain.ends_with('.')
        || !chain.chars().next().is_some_and(is_ident_start)
        || is_keyword(chain)
    {
        return None;
    }
    Span::from_line(line, start, end)
}

/// The key expression of the subscript being edited.
///
/// Runs from just after `[` to its matching `]` when the bracket is closed later on the
/// line, otherwise to the cursor. Nested brackets and strings are part of the key.
pub fn current_dict_key(cursor: usize, line: &str) -> Option<Span> {
    let subscript = enclosing_subscript(cursor, line)?;
    let end = BracketMatcher::matching_close(line, subscript.open).unwrap_or(cursor);
    Span::from_line(line, subscript.open + 1, end)
}

/// The container being subscripted: the chain right before the enclosing `[`.
pub fn current_dict(cursor: usize, line: &str) -> Option<Span> {
    enclosing_subscript(cursor, line).map(|subscript| subscript.container)
}
