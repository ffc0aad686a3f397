/// Half-open byte span into a line, `[start, end)`, together with the text it covers.
///
/// `start` and `end` are valid UTF-8 slice boundaries of the line the span was produced
/// from, and `text == line[start..end]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Span {
    /// Slices `line[start..end]`. `None` for inverted, out-of-range or non-boundary offsets.
    pub fn from_line(line: &str, start: usize, end: usize) -> Option<Span> {
        let text = line.get(start..end)?;
        Some(Span {
            start,
            end,
            text: text.to_string(),
        })
    }

    pub fn empty_at(offset: usize) -> Span {
        Span {
            start: offset,
            end: offset,
            text: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `start <= offset <= end`: a cursor on either edge touches the span.
    pub fn touches(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Returns `cursor` when it is a valid insertion point of `line`.
pub(crate) fn checked_cursor(line: &str, cursor: usize) -> Option<usize> {
    (cursor <= line.len() && line.is_char_boundary(cursor)).then_some(cursor)
}
