use crate::span::checked_cursor;
use crate::{BracketMatcher, Span};

/// Contents of the string literal enclosing the cursor, quotes excluded.
///
/// The cursor counts as inside when it sits anywhere from just after the opening quote up
/// to the closing quote. An unterminated literal runs to the end of the line.
pub fn current_string(cursor: usize, line: &str) -> Option<Span> {
    let cursor = checked_cursor(line, cursor)?;
    BracketMatcher::string_regions(line)
        .into_iter()
        .take_while(|region| region.start < cursor)
        .find(|region| region.content_start <= cursor && cursor <= region.content_end)
        .and_then(|region| Span::from_line(line, region.content_start, region.content_end))
}
