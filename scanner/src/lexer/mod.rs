use crate::brackets::scan_string_literal;

mod token;

pub use token::{KEYWORDS, Token, TokenKind, is_keyword};

/// Operators other than `=`, `:` and `.`, longest first so that `**=` wins over `**`.
const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "->", ":=", "==", "!=", "<=", ">=", "**", "//", "<<", ">>",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=", "+", "-", "*", "/", "%", "@", "&",
    "|", "^", "~", "<", ">", "!",
];

/// Prefixes accepted directly before a string literal's opening quote.
const STRING_PREFIXES: &[&str] = &["r", "u", "b", "f", "br", "rb", "fr", "rf"];

/// Lex one line into tokens.
///
/// Never fails: unknown characters become [`TokenKind::Unknown`] and an unterminated string
/// runs to the end of the line. Whitespace and comments are kept, so the tokens tile the
/// line without gaps.
///
/// - Identifiers: letters, digits and `_`, not starting with a digit (any alphabetic
///   codepoint counts as a letter).
/// - Numbers: a digit (or `.` followed by a digit) and every following alphanumeric, `_`
///   and `.` character.
/// - Strings: `'`, `"`, their triple forms, optionally prefixed by one of
///   `r u b f br rb fr rf` in any case.
pub fn lex(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];
        let Some(ch) = rest.chars().next() else {
            break;
        };
        let start = pos;

        let (kind, end) = if ch.is_whitespace() {
            (TokenKind::Whitespace, start + run_len(rest, char::is_whitespace))
        } else if ch == '#' {
            (TokenKind::Comment, line.len())
        } else if ch == '\'' || ch == '"' {
            let region = scan_string_literal(line, start);
            (
                TokenKind::Str {
                    terminated: region.terminated,
                },
                region.end(),
            )
        } else if is_ident_start(ch) {
            let end = start + run_len(rest, is_ident_char);
            let word = &line[start..end];
            match line[end..].chars().next() {
                Some('\'' | '"') if is_string_prefix(word) => {
                    let region = scan_string_literal(line, end);
                    (
                        TokenKind::Str {
                            terminated: region.terminated,
                        },
                        region.end(),
                    )
                }
                _ => match token::keyword(word) {
                    Some(kw) => (TokenKind::Keyword(kw), end),
                    None => (TokenKind::Ident(word.to_string()), end),
                },
            }
        } else if ch.is_ascii_digit() || (ch == '.' && starts_with_digit(&rest[1..])) {
            let end = start + 1 + run_len(&rest[1..], |c| is_ident_char(c) || c == '.');
            (TokenKind::Number, end)
        } else if let Some(op) = OPERATORS.iter().copied().find(|op| rest.starts_with(op)) {
            (TokenKind::Op(op), start + op.len())
        } else {
            let kind = match ch {
                '(' => TokenKind::OpenParen,
                ')' => TokenKind::CloseParen,
                '[' => TokenKind::OpenBracket,
                ']' => TokenKind::CloseBracket,
                '{' => TokenKind::OpenBrace,
                '}' => TokenKind::CloseBrace,
                ',' => TokenKind::Comma,
                ':' => TokenKind::Colon,
                ';' => TokenKind::Semi,
                '.' => TokenKind::Dot,
                '=' => TokenKind::Eq,
                _ => TokenKind::Unknown,
            };
            (kind, start + ch.len_utf8())
        };

        tokens.push(Token { kind, start, end });
        pos = end;
    }

    tokens
}

pub(crate) fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

pub(crate) fn is_ident_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_string_prefix(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    STRING_PREFIXES.contains(&lower.as_str())
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Byte length of the leading run of `s` accepted by `pred`.
fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| i)
}
