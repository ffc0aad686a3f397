//! Lexer tokens.
//!
//! Token offsets are UTF-8 byte offsets into the lexed line, half-open `[start, end)`.
//! Unlike a compiler lexer this one keeps whitespace as tokens, so concatenating the text
//! of every token reproduces the line exactly.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier, with its text.
    Ident(String),
    /// One of [`KEYWORDS`].
    Keyword(&'static str),
    Number,
    /// String literal including its prefix and quotes.
    Str { terminated: bool },

    /* Structural symbols */
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semi,
    /// `.`
    Dot,
    /// `=` (assignment or keyword argument; never part of `==`, `<=`, `:=` ...)
    Eq,

    /// Any other operator, longest match.
    Op(&'static str),

    Whitespace,
    /// `#` up to the end of the line.
    Comment,
    /// A character no other rule accepts (`$`, `?`, a stray backslash).
    Unknown,
}

/// A token with its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword(kw) if kw == keyword)
    }

    /// The token's text in the line it was lexed from.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.start..self.end).unwrap_or_default()
    }
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn is_open_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace
        )
    }

    pub fn is_close_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace
        )
    }
}

/// Reserved words of the edited language.
pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

pub fn is_keyword(word: &str) -> bool {
    keyword(word).is_some()
}

pub(crate) fn keyword(word: &str) -> Option<&'static str> {
    KEYWORDS.iter().copied().find(|kw| *kw == word)
}
