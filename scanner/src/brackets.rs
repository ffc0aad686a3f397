//! Quote- and bracket-aware forward scanning.
//!
//! Shared by the context scanners and the lexer. Quote state takes precedence over
//! brackets: a bracket inside a string literal is inert. Inside a string a backslash skips
//! the next character, so `\"` never closes a `"` string. Outside strings `#` starts a
//! comment that runs to the end of the line.
//!
//! Unterminated strings and brackets are not errors; the scan just ends with them open.
//! A closing bracket that does not match the innermost opener marks the scan malformed.

/// A string literal that is open at the current scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenQuote {
    pub quote: char,
    pub triple: bool,
    /// Offset of the first opening quote character.
    pub start: usize,
}

impl OpenQuote {
    fn delimiter_len(&self) -> usize {
        if self.triple { 3 } else { 1 }
    }

    pub fn content_start(&self) -> usize {
        self.start + self.delimiter_len()
    }
}

/// An unmatched opening bracket and its offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenBracket {
    pub bracket: char,
    pub pos: usize,
}

/// Scan state at a position: open string, open brackets (outermost first), comment start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketState {
    pub quote: Option<OpenQuote>,
    pub brackets: Vec<OpenBracket>,
    pub comment: Option<usize>,
    pub malformed: bool,
}

impl BracketState {
    pub fn depth(&self) -> usize {
        self.brackets.len()
    }

    pub fn in_string(&self) -> bool {
        self.quote.is_some()
    }

    pub fn innermost(&self) -> Option<OpenBracket> {
        self.brackets.last().copied()
    }
}

/// A string literal of a line. `content_end` is the closing quote offset, or the end of
/// the line for an unterminated literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringRegion {
    pub quote: char,
    pub triple: bool,
    pub start: usize,
    pub content_start: usize,
    pub content_end: usize,
    pub terminated: bool,
}

impl StringRegion {
    /// Offset just past the closing delimiter (or the line end when unterminated).
    pub fn end(&self) -> usize {
        match (self.terminated, self.triple) {
            (false, _) => self.content_end,
            (true, true) => self.content_end + 3,
            (true, false) => self.content_end + 1,
        }
    }

    fn open(quote: OpenQuote, content_end: usize, terminated: bool) -> Self {
        Self {
            quote: quote.quote,
            triple: quote.triple,
            start: quote.start,
            content_start: quote.content_start(),
            content_end,
            terminated,
        }
    }
}

pub(crate) fn closing_for(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

fn triple_of(quote: char) -> &'static str {
    if quote == '"' { "\"\"\"" } else { "'''" }
}

/// Incremental left-to-right scanner over one line.
#[derive(Debug, Clone)]
pub struct BracketMatcher<'a> {
    line: &'a str,
    pos: usize,
    state: BracketState,
    strings: Vec<StringRegion>,
}

impl<'a> BracketMatcher<'a> {
    pub fn new(line: &'a str) -> Self {
        Self::starting_at(line, 0)
    }

    fn starting_at(line: &'a str, pos: usize) -> Self {
        Self {
            line,
            pos,
            state: BracketState::default(),
            strings: Vec::new(),
        }
    }

    /// Scan state of `line` at `end` (clamped to the line length).
    pub fn scan(line: &str, end: usize) -> BracketState {
        let mut matcher = BracketMatcher::new(line);
        matcher.advance_to(end);
        matcher.state
    }

    /// Every string literal of `line`, terminated or not, in order.
    pub fn string_regions(line: &str) -> Vec<StringRegion> {
        let mut matcher = BracketMatcher::new(line);
        matcher.advance_to(line.len());
        matcher.into_strings()
    }

    /// Offset of the bracket closing the opener at `open`.
    ///
    /// `None` when `open` is not an opening bracket outside strings, when the bracket is
    /// still open at the end of the line, or when the nesting inside it is malformed.
    pub fn matching_close(line: &str, open: usize) -> Option<usize> {
        let mut matcher = BracketMatcher::new(line);
        matcher.advance_to(open);
        if matcher.pos != open || matcher.state.in_string() || matcher.state.comment.is_some() {
            return None;
        }
        let opener = line[open..].chars().next()?;
        closing_for(opener)?;

        matcher.state.malformed = false;
        let depth = matcher.state.depth();
        matcher.step();
        while matcher.pos < line.len() {
            let at = matcher.pos;
            matcher.step();
            if matcher.state.malformed {
                return None;
            }
            if matcher.state.depth() == depth {
                return Some(at);
            }
        }
        None
    }

    pub fn state(&self) -> &BracketState {
        &self.state
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Advances the scan to `end`, clamped to the line length.
    ///
    /// A multi-byte construct (triple quote, escape) that straddles `end` is consumed whole,
    /// so the position may land slightly past `end`.
    pub fn advance_to(&mut self, end: usize) -> &BracketState {
        let end = end.min(self.line.len());
        while self.pos < end {
            self.step();
        }
        &self.state
    }

    fn into_strings(mut self) -> Vec<StringRegion> {
        if let Some(open) = self.state.quote.take() {
            self.strings
                .push(StringRegion::open(open, self.line.len(), false));
        }
        self.strings
    }

    fn step(&mut self) {
        let rest = &self.line[self.pos..];
        let Some(ch) = rest.chars().next() else {
            return;
        };
        let width = ch.len_utf8();

        if let Some(open) = self.state.quote {
            if ch == '\\' {
                let escaped = rest[width..].chars().next().map_or(0, char::len_utf8);
                self.pos += width + escaped;
                return;
            }
            if ch == open.quote && (!open.triple || rest.starts_with(triple_of(ch))) {
                self.strings.push(StringRegion::open(open, self.pos, true));
                self.state.quote = None;
                self.pos += open.delimiter_len();
                return;
            }
            self.pos += width;
            return;
        }

        match ch {
            '\'' | '"' => {
                let triple = rest.starts_with(triple_of(ch));
                let quote = OpenQuote {
                    quote: ch,
                    triple,
                    start: self.pos,
                };
                self.state.quote = Some(quote);
                self.pos += quote.delimiter_len();
                return;
            }
            '#' => {
                self.state.comment = Some(self.pos);
                self.pos = self.line.len();
                return;
            }
            '(' | '[' | '{' => self.state.brackets.push(OpenBracket {
                bracket: ch,
                pos: self.pos,
            }),
            ')' | ']' | '}' => match self.state.brackets.last() {
                Some(top) if closing_for(top.bracket) == Some(ch) => {
                    self.state.brackets.pop();
                }
                _ => self.state.malformed = true,
            },
            _ => {}
        }
        self.pos += width;
    }
}

/// Scans the string literal whose opening quote is at `start`.
pub(crate) fn scan_string_literal(line: &str, start: usize) -> StringRegion {
    let mut matcher = BracketMatcher::starting_at(line, start);
    matcher.step();
    while matcher.state.in_string() && matcher.pos < line.len() {
        matcher.step();
    }
    matcher
        .into_strings()
        .into_iter()
        .next()
        .unwrap_or(StringRegion {
            quote: '"',
            triple: false,
            start,
            content_start: start,
            content_end: start,
            terminated: false,
        })
}
